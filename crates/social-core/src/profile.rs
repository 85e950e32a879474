//! Profile — at most one per user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  entity::{Entity, RecordId, Schema, StoredRow},
};

pub const PROFILES: Schema = Schema {
  name:    "Profile",
  table:   "profiles",
  columns: &["bio", "profile_picture", "birthday"],
  owner:   Some("user_id"),
};

/// Record literal for [`Profile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProfile {
  pub bio:             String,
  pub profile_picture: String,
  pub birthday:        String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  pub id:              RecordId,
  pub bio:             String,
  pub profile_picture: String,
  pub birthday:        String,
  /// The owning user, if one has been set.
  pub user_id:         Option<RecordId>,
  pub updated_at:      DateTime<Utc>,
}

impl Entity for Profile {
  type Fields = NewProfile;

  const SCHEMA: &'static Schema = &PROFILES;

  fn id(&self) -> RecordId { self.id }

  fn columns(fields: &NewProfile) -> Vec<String> {
    vec![
      fields.bio.clone(),
      fields.profile_picture.clone(),
      fields.birthday.clone(),
    ]
  }

  fn assemble(mut row: StoredRow) -> Result<Self> {
    let [bio, profile_picture, birthday] = row.take_columns::<3>(&PROFILES)?;
    Ok(Self {
      id: row.id,
      bio,
      profile_picture,
      birthday,
      user_id: row.owner,
      updated_at: row.updated_at,
    })
  }

  fn fields(&self) -> NewProfile {
    NewProfile {
      bio:             self.bio.clone(),
      profile_picture: self.profile_picture.clone(),
      birthday:        self.birthday.clone(),
    }
  }
}
