//! Error types for `social-core`.

use thiserror::Error;

use crate::entity::RecordId;

#[derive(Debug, Error)]
pub enum Error {
  /// A set/add operation referenced a record that does not exist.
  #[error("{entity} {id} does not exist")]
  MissingRecord { entity: &'static str, id: RecordId },

  #[error("{entity} row has {found} columns, expected {expected}")]
  ColumnCount {
    entity:   &'static str,
    expected: usize,
    found:    usize,
  },

  #[error("relation {relation} has no {entity} endpoint")]
  EndpointMismatch {
    relation: &'static str,
    entity:   &'static str,
  },

  #[error("fixture error: {0}")]
  Fixture(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
