//! Comment — belongs to a single post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  entity::{Entity, RecordId, Schema, StoredRow},
};

pub const COMMENTS: Schema = Schema {
  name:    "Comment",
  table:   "comments",
  columns: &["body", "created_at"],
  owner:   Some("post_id"),
};

/// Record literal for [`Comment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewComment {
  pub body:       String,
  pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  pub id:         RecordId,
  pub body:       String,
  pub created_at: String,
  pub post_id:    Option<RecordId>,
  pub updated_at: DateTime<Utc>,
}

impl Entity for Comment {
  type Fields = NewComment;

  const SCHEMA: &'static Schema = &COMMENTS;

  fn id(&self) -> RecordId { self.id }

  fn columns(fields: &NewComment) -> Vec<String> {
    vec![fields.body.clone(), fields.created_at.clone()]
  }

  fn assemble(mut row: StoredRow) -> Result<Self> {
    let [body, created_at] = row.take_columns::<2>(&COMMENTS)?;
    Ok(Self {
      id: row.id,
      body,
      created_at,
      post_id: row.owner,
      updated_at: row.updated_at,
    })
  }

  fn fields(&self) -> NewComment {
    NewComment {
      body:       self.body.clone(),
      created_at: self.created_at.clone(),
    }
  }
}
