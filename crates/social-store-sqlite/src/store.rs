//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`] and
//! [`AssociationStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use social_core::{
  association::{AssociationStore, Cardinality, Direction, Link, Relation},
  entity::{Entity, RecordId, Schema, StoredRow},
  store::RecordStore,
};

use crate::{
  Error, Result,
  encode::{RawRecord, encode_dt},
  query,
  schema::{DROP_TABLES, PRAGMAS, TABLES},
};

/// Outcome of a write that checks referenced records inside its transaction:
/// `Err` names the first record found missing.
type Checked = std::result::Result<(), (&'static str, RecordId)>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A social model store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and create any missing tables.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        conn.execute_batch(TABLES)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` laid out for `E` with `id` bound as `?1` (when given).
  async fn fetch<E: Entity>(
    &self,
    sql: String,
    id: Option<RecordId>,
  ) -> Result<Vec<E>> {
    let width = E::SCHEMA.columns.len();

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let map = |row: &rusqlite::Row<'_>| RawRecord::from_row(row, width);
        let rows = match id {
          Some(id) => stmt.query_map(rusqlite::params![id], map)?,
          None => stmt.query_map([], map)?,
        }
        .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| -> Result<E> { Ok(E::assemble(raw.into_stored()?)?) })
      .collect()
  }

  /// Insert `batch` in one transaction, returning the generated ids in order.
  /// Nothing is persisted if any row fails.
  async fn insert_rows(
    &self,
    schema: &'static Schema,
    batch: Vec<Vec<String>>,
    stamp: String,
  ) -> Result<Vec<RecordId>> {
    let sql = query::insert(schema);

    let ids = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(batch.len());
        {
          let mut stmt = tx.prepare(&sql)?;
          for columns in &batch {
            let values = columns.iter().chain(std::iter::once(&stamp));
            stmt.execute(rusqlite::params_from_iter(values))?;
            ids.push(tx.last_insert_rowid());
          }
        }
        tx.commit()?;
        Ok(ids)
      })
      .await?;

    Ok(ids)
  }
}

/// Whether `schema` has a row with primary key `id`.
fn record_exists(
  conn: &rusqlite::Connection,
  schema: &Schema,
  id: RecordId,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(&query::exists(schema), rusqlite::params![id], |_| Ok(true))
      .optional()?
      .unwrap_or(false),
  )
}

fn ensure_endpoint<T: Entity>(
  relation: &Relation,
  direction: Direction,
) -> Result<()> {
  if relation.endpoint(direction).table != T::SCHEMA.table {
    return Err(Error::Core(social_core::Error::EndpointMismatch {
      relation: relation.name,
      entity:   T::SCHEMA.name,
    }));
  }
  Ok(())
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn resync(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(DROP_TABLES)?;
        conn.execute_batch(TABLES)?;
        Ok(())
      })
      .await?;
    tracing::debug!("schema dropped and recreated");
    Ok(())
  }

  async fn create<E: Entity>(&self, fields: E::Fields) -> Result<E> {
    let columns = E::columns(&fields);
    let updated_at = Utc::now();
    let sql = query::insert(E::SCHEMA);
    let values = columns.clone();
    let stamp = encode_dt(updated_at);

    let id = self
      .conn
      .call(move |conn| {
        let values = values.iter().chain(std::iter::once(&stamp));
        conn.execute(&sql, rusqlite::params_from_iter(values))?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(E::assemble(StoredRow { id, columns, owner: None, updated_at })?)
  }

  async fn bulk_create<E: Entity>(&self, fields: Vec<E::Fields>) -> Result<Vec<E>> {
    let batch: Vec<Vec<String>> = fields.iter().map(E::columns).collect();
    let updated_at = Utc::now();

    let ids = self
      .insert_rows(E::SCHEMA, batch.clone(), encode_dt(updated_at))
      .await?;
    tracing::debug!(table = E::SCHEMA.table, rows = ids.len(), "bulk insert");

    ids
      .into_iter()
      .zip(batch)
      .map(|(id, columns)| -> Result<E> {
        Ok(E::assemble(StoredRow { id, columns, owner: None, updated_at })?)
      })
      .collect()
  }

  async fn find_by_pk<E: Entity>(&self, id: RecordId) -> Result<Option<E>> {
    let rows = self.fetch::<E>(query::by_pk(E::SCHEMA), Some(id)).await?;
    Ok(rows.into_iter().next())
  }

  async fn find_all<E: Entity>(&self) -> Result<Vec<E>> {
    self.fetch::<E>(query::all(E::SCHEMA), None).await
  }

  async fn count<E: Entity>(&self) -> Result<u64> {
    let sql = query::count(E::SCHEMA);
    let n: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, [], |row| row.get(0))?))
      .await?;
    Ok(n as u64)
  }
}

// ─── AssociationStore impl ───────────────────────────────────────────────────

impl AssociationStore for SqliteStore {
  async fn related<T: Entity>(
    &self,
    relation: &'static Relation,
    direction: Direction,
    id: RecordId,
  ) -> Result<Vec<T>> {
    ensure_endpoint::<T>(relation, direction)?;
    self.fetch::<T>(query::related(relation, direction), Some(id)).await
  }

  async fn assign_owner(
    &self,
    relation: &'static Relation,
    owner: RecordId,
    children: Vec<RecordId>,
  ) -> Result<()> {
    let Link::ForeignKey { column } = relation.link else {
      return Err(Error::WrongLink(relation.name));
    };

    let source = relation.source;
    let target = relation.target;
    let one_to_one = relation.cardinality == Cardinality::OneToOne;
    let detach_sql = query::detach_others(target, column);
    let assign_sql = query::assign(target, column);
    let stamp = encode_dt(Utc::now());
    let assigned = children.len();

    let checked: Checked = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if !record_exists(&tx, source, owner)? {
          return Ok(Err((source.name, owner)));
        }
        for &child in &children {
          if !record_exists(&tx, target, child)? {
            return Ok(Err((target.name, child)));
          }
        }

        for &child in &children {
          if one_to_one {
            tx.execute(&detach_sql, rusqlite::params![owner, stamp, child])?;
          }
          tx.execute(&assign_sql, rusqlite::params![owner, stamp, child])?;
        }

        tx.commit()?;
        Ok(Ok(()))
      })
      .await?;

    checked.map_err(|(entity, id)| Error::MissingRecord { entity, id })?;
    tracing::debug!(relation = relation.name, owner, assigned, "owner assigned");
    Ok(())
  }

  async fn link(
    &self,
    relation: &'static Relation,
    pairs: Vec<(RecordId, RecordId)>,
  ) -> Result<()> {
    let Link::JoinTable { table, source_column, target_column } = relation.link
    else {
      return Err(Error::WrongLink(relation.name));
    };

    let source = relation.source;
    let target = relation.target;
    let sql = query::link(table, source_column, target_column);
    let linked = pairs.len();

    let checked: Checked = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        for &(source_id, target_id) in &pairs {
          if !record_exists(&tx, source, source_id)? {
            return Ok(Err((source.name, source_id)));
          }
          if !record_exists(&tx, target, target_id)? {
            return Ok(Err((target.name, target_id)));
          }
          tx.execute(&sql, rusqlite::params![source_id, target_id])?;
        }

        tx.commit()?;
        Ok(Ok(()))
      })
      .await?;

    checked.map_err(|(entity, id)| Error::MissingRecord { entity, id })?;
    tracing::debug!(relation = relation.name, linked, "join rows added");
    Ok(())
  }
}
