//! Seed fixtures: static sample datasets for populating a store.
//!
//! The workspace `seed/` directory is embedded at compile time
//! ([`SeedSet::bundled`]); a directory with the same five files can be loaded
//! at runtime with [`SeedSet::load`].

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
  Result,
  comment::{Comment, NewComment},
  like::{Like, NewLike},
  post::{NewPost, Post},
  profile::{NewProfile, Profile},
  store::RecordStore,
  user::{NewUser, User},
};

const USERS_JSON: &str = include_str!("../../../seed/users.json");
const PROFILES_JSON: &str = include_str!("../../../seed/profiles.json");
const POSTS_JSON: &str = include_str!("../../../seed/posts.json");
const COMMENTS_JSON: &str = include_str!("../../../seed/comments.json");
const LIKES_JSON: &str = include_str!("../../../seed/likes.json");

/// One record literal list per entity kind.
#[derive(Debug, Clone, Default)]
pub struct SeedSet {
  pub users:    Vec<NewUser>,
  pub profiles: Vec<NewProfile>,
  pub posts:    Vec<NewPost>,
  pub comments: Vec<NewComment>,
  pub likes:    Vec<NewLike>,
}

impl SeedSet {
  /// The fixtures shipped in the workspace `seed/` directory.
  pub fn bundled() -> Result<Self> {
    Ok(Self {
      users:    serde_json::from_str(USERS_JSON)?,
      profiles: serde_json::from_str(PROFILES_JSON)?,
      posts:    serde_json::from_str(POSTS_JSON)?,
      comments: serde_json::from_str(COMMENTS_JSON)?,
      likes:    serde_json::from_str(LIKES_JSON)?,
    })
  }

  /// Read `users.json`, `profiles.json`, `posts.json`, `comments.json` and
  /// `likes.json` from `dir`. Every file must be present.
  pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref();
    Ok(Self {
      users:    read_json(&dir.join("users.json"))?,
      profiles: read_json(&dir.join("profiles.json"))?,
      posts:    read_json(&dir.join("posts.json"))?,
      comments: read_json(&dir.join("comments.json"))?,
      likes:    read_json(&dir.join("likes.json"))?,
    })
  }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
  let raw = std::fs::read_to_string(path)?;
  Ok(serde_json::from_str(&raw)?)
}

/// Number of records inserted per kind by [`seed_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
  pub users:    usize,
  pub profiles: usize,
  pub posts:    usize,
  pub comments: usize,
  pub likes:    usize,
}

/// Bulk-create every list in `set`, one batch per kind. Associations are not
/// set; fixture records start unowned.
pub async fn seed_all<S: RecordStore>(
  store: &S,
  set: &SeedSet,
) -> Result<SeedReport, S::Error> {
  let users = store.bulk_create::<User>(set.users.clone()).await?;
  let profiles = store.bulk_create::<Profile>(set.profiles.clone()).await?;
  let posts = store.bulk_create::<Post>(set.posts.clone()).await?;
  let comments = store.bulk_create::<Comment>(set.comments.clone()).await?;
  let likes = store.bulk_create::<Like>(set.likes.clone()).await?;

  Ok(SeedReport {
    users:    users.len(),
    profiles: profiles.len(),
    posts:    posts.len(),
    comments: comments.len(),
    likes:    likes.len(),
  })
}
