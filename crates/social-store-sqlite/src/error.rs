//! Error type for `social-store-sqlite`.

use social_core::entity::RecordId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] social_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A set/add operation referenced a record that does not exist.
  #[error("{entity} {id} does not exist")]
  MissingRecord { entity: &'static str, id: RecordId },

  /// The relation is not persisted the way the operation needs (e.g. `link`
  /// on a foreign-key relation).
  #[error("relation {0} does not support this operation")]
  WrongLink(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
