//! Like — a reaction shared by any number of users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  entity::{Entity, RecordId, Schema, StoredRow},
};

pub const LIKES: Schema = Schema {
  name:    "Like",
  table:   "likes",
  columns: &["reaction_type", "created_at"],
  owner:   None,
};

/// Record literal for [`Like`]. `reaction_type` is free text (e.g. "👍").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewLike {
  pub reaction_type: String,
  pub created_at:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
  pub id:            RecordId,
  pub reaction_type: String,
  pub created_at:    String,
  pub updated_at:    DateTime<Utc>,
}

impl Entity for Like {
  type Fields = NewLike;

  const SCHEMA: &'static Schema = &LIKES;

  fn id(&self) -> RecordId { self.id }

  fn columns(fields: &NewLike) -> Vec<String> {
    vec![fields.reaction_type.clone(), fields.created_at.clone()]
  }

  fn assemble(mut row: StoredRow) -> Result<Self> {
    let [reaction_type, created_at] = row.take_columns::<2>(&LIKES)?;
    Ok(Self {
      id: row.id,
      reaction_type,
      created_at,
      updated_at: row.updated_at,
    })
  }

  fn fields(&self) -> NewLike {
    NewLike {
      reaction_type: self.reaction_type.clone(),
      created_at:    self.created_at.clone(),
    }
  }
}
