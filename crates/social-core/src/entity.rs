//! Schema-as-data for the record kinds.
//!
//! Every entity is described by a static [`Schema`] (table name, ordered data
//! columns, optional owner reference) and implements [`Entity`] to move
//! between its typed form and a backend-neutral [`StoredRow`]. Backends build
//! their queries from the schema; they never special-case an entity.

use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Surrogate primary key assigned by the store.
pub type RecordId = i64;

// ─── Schema ──────────────────────────────────────────────────────────────────

/// Static description of one entity's table.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
  /// Display name used in errors, e.g. `"User"`.
  pub name:    &'static str,
  pub table:   &'static str,
  /// Data columns in the order [`Entity::columns`] produces them.
  pub columns: &'static [&'static str],
  /// Nullable foreign-key column naming this record's owner, if any.
  pub owner:   Option<&'static str>,
}

// ─── Stored row ──────────────────────────────────────────────────────────────

/// A row as read back from a backend, before it is given its entity type.
#[derive(Debug, Clone)]
pub struct StoredRow {
  pub id:         RecordId,
  pub columns:    Vec<String>,
  pub owner:      Option<RecordId>,
  pub updated_at: DateTime<Utc>,
}

impl StoredRow {
  /// Split the data columns into a fixed-size array, checking the row shape
  /// against `schema`.
  pub fn take_columns<const N: usize>(
    &mut self,
    schema: &Schema,
  ) -> Result<[String; N]> {
    let columns = std::mem::take(&mut self.columns);
    let found = columns.len();
    columns.try_into().map_err(|_| Error::ColumnCount {
      entity: schema.name,
      expected: N,
      found,
    })
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A persisted record kind.
pub trait Entity: Clone + Send + Sync + Sized + 'static {
  /// The record literal accepted by create operations.
  type Fields: Clone + Send + Sync + 'static;

  const SCHEMA: &'static Schema;

  fn id(&self) -> RecordId;

  /// Column values for `fields`, ordered as [`Schema::columns`].
  fn columns(fields: &Self::Fields) -> Vec<String>;

  fn assemble(row: StoredRow) -> Result<Self>;

  /// The caller-supplied part of the record.
  fn fields(&self) -> Self::Fields;
}
