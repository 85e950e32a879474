//! SQL text built from `Schema` and `Relation` declarations.
//!
//! Every select produces rows in the layout [`crate::encode::RawRecord`]
//! reads: `id, <data columns>, <owner or NULL>, updated_at`.

use social_core::{
  association::{Direction, Link, Relation},
  entity::Schema,
};

/// Select list for `schema` with every column qualified by `alias`.
pub fn select_list(schema: &Schema, alias: &str) -> String {
  let mut parts = vec![format!("{alias}.id")];
  parts.extend(schema.columns.iter().map(|c| format!("{alias}.{c}")));
  parts.push(match schema.owner {
    Some(column) => format!("{alias}.{column}"),
    None => "NULL".to_owned(),
  });
  parts.push(format!("{alias}.updated_at"));
  parts.join(", ")
}

/// `INSERT` binding the data columns as `?1..?n` and `updated_at` last.
pub fn insert(schema: &Schema) -> String {
  let width = schema.columns.len();
  let placeholders = (1..=width + 1)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "INSERT INTO {} ({}, updated_at) VALUES ({placeholders})",
    schema.table,
    schema.columns.join(", "),
  )
}

pub fn by_pk(schema: &Schema) -> String {
  format!(
    "SELECT {} FROM {} r WHERE r.id = ?1",
    select_list(schema, "r"),
    schema.table,
  )
}

pub fn all(schema: &Schema) -> String {
  format!(
    "SELECT {} FROM {} r ORDER BY r.id",
    select_list(schema, "r"),
    schema.table,
  )
}

pub fn count(schema: &Schema) -> String {
  format!("SELECT COUNT(*) FROM {}", schema.table)
}

pub fn exists(schema: &Schema) -> String {
  format!("SELECT 1 FROM {} WHERE id = ?1", schema.table)
}

/// Records reachable across `relation` from the id bound as `?1`.
pub fn related(relation: &Relation, direction: Direction) -> String {
  let result = relation.endpoint(direction);
  let select = select_list(result, "r");

  match (&relation.link, direction) {
    (Link::ForeignKey { column }, Direction::Forward) => format!(
      "SELECT {select} FROM {target} r WHERE r.{column} = ?1 ORDER BY r.id",
      target = relation.target.table,
    ),
    (Link::ForeignKey { column }, Direction::Inverse) => format!(
      "SELECT {select} FROM {source} r
       JOIN {target} o ON o.{column} = r.id
       WHERE o.id = ?1",
      source = relation.source.table,
      target = relation.target.table,
    ),
    (Link::JoinTable { table, source_column, target_column }, Direction::Forward) => {
      format!(
        "SELECT {select} FROM {target} r
         JOIN {table} j ON j.{target_column} = r.id
         WHERE j.{source_column} = ?1
         ORDER BY j.rowid",
        target = relation.target.table,
      )
    }
    (Link::JoinTable { table, source_column, target_column }, Direction::Inverse) => {
      format!(
        "SELECT {select} FROM {source} r
         JOIN {table} j ON j.{source_column} = r.id
         WHERE j.{target_column} = ?1
         ORDER BY j.rowid",
        source = relation.source.table,
      )
    }
  }
}

/// Detach every child of owner `?1` except `?3`, stamping `?2`.
pub fn detach_others(target: &Schema, column: &str) -> String {
  format!(
    "UPDATE {} SET {column} = NULL, updated_at = ?2
     WHERE {column} = ?1 AND id != ?3",
    target.table,
  )
}

/// Point child `?3` at owner `?1`, stamping `?2`.
pub fn assign(target: &Schema, column: &str) -> String {
  format!(
    "UPDATE {} SET {column} = ?1, updated_at = ?2 WHERE id = ?3",
    target.table,
  )
}

pub fn link(table: &str, source_column: &str, target_column: &str) -> String {
  format!("INSERT INTO {table} ({source_column}, {target_column}) VALUES (?1, ?2)")
}
