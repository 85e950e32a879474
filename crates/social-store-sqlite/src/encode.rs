//! Encoding and decoding helpers between the core row type and the values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Data columns are plain text.

use chrono::{DateTime, Utc};
use social_core::entity::{RecordId, StoredRow};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read from a row selected with [`crate::query::select_list`].
pub struct RawRecord {
  pub id:         RecordId,
  pub columns:    Vec<String>,
  pub owner:      Option<RecordId>,
  pub updated_at: String,
}

impl RawRecord {
  /// Read a row laid out as `id, <width data columns>, owner, updated_at`.
  pub fn from_row(row: &rusqlite::Row<'_>, width: usize) -> rusqlite::Result<Self> {
    let columns = (1..=width)
      .map(|i| row.get(i))
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(Self {
      id: row.get(0)?,
      columns,
      owner: row.get(width + 1)?,
      updated_at: row.get(width + 2)?,
    })
  }

  pub fn into_stored(self) -> Result<StoredRow> {
    Ok(StoredRow {
      id:         self.id,
      columns:    self.columns,
      owner:      self.owner,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
