//! Post — owned by a single user, owns many comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  entity::{Entity, RecordId, Schema, StoredRow},
};

pub const POSTS: Schema = Schema {
  name:    "Post",
  table:   "posts",
  columns: &["title", "body", "created_at"],
  owner:   Some("user_id"),
};

/// Record literal for [`Post`]. `created_at` is caller-supplied text and is
/// stored verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPost {
  pub title:      String,
  pub body:       String,
  pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  pub id:         RecordId,
  pub title:      String,
  pub body:       String,
  pub created_at: String,
  pub user_id:    Option<RecordId>,
  pub updated_at: DateTime<Utc>,
}

impl Entity for Post {
  type Fields = NewPost;

  const SCHEMA: &'static Schema = &POSTS;

  fn id(&self) -> RecordId { self.id }

  fn columns(fields: &NewPost) -> Vec<String> {
    vec![
      fields.title.clone(),
      fields.body.clone(),
      fields.created_at.clone(),
    ]
  }

  fn assemble(mut row: StoredRow) -> Result<Self> {
    let [title, body, created_at] = row.take_columns::<3>(&POSTS)?;
    Ok(Self {
      id: row.id,
      title,
      body,
      created_at,
      user_id: row.owner,
      updated_at: row.updated_at,
    })
  }

  fn fields(&self) -> NewPost {
    NewPost {
      title:      self.title.clone(),
      body:       self.body.clone(),
      created_at: self.created_at.clone(),
    }
  }
}
