//! User — the root of every association.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  entity::{Entity, RecordId, Schema, StoredRow},
};

pub const USERS: Schema = Schema {
  name:    "User",
  table:   "users",
  columns: &["name", "email"],
  owner:   None,
};

/// Record literal for [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub name:  String,
  #[serde(default)]
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:         RecordId,
  pub name:       String,
  pub email:      String,
  pub updated_at: DateTime<Utc>,
}

impl Entity for User {
  type Fields = NewUser;

  const SCHEMA: &'static Schema = &USERS;

  fn id(&self) -> RecordId { self.id }

  fn columns(fields: &NewUser) -> Vec<String> {
    vec![fields.name.clone(), fields.email.clone()]
  }

  fn assemble(mut row: StoredRow) -> Result<Self> {
    let [name, email] = row.take_columns::<2>(&USERS)?;
    Ok(Self { id: row.id, name, email, updated_at: row.updated_at })
  }

  fn fields(&self) -> NewUser {
    NewUser { name: self.name.clone(), email: self.email.clone() }
  }
}
