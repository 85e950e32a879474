//! Implementations of the `social` subcommands.

use anyhow::{Context as _, Result, anyhow};
use serde_json::{Value, json};
use social_core::{
  association::AssociationStore,
  comment::Comment,
  entity::{Entity, RecordId},
  fixtures::{SeedSet, seed_all},
  like::Like,
  post::Post,
  profile::Profile,
  store::RecordStore,
  user::User,
};
use social_store_sqlite::SqliteStore;

use crate::{Command, Kind};

pub(crate) async fn run(store: &SqliteStore, command: Command) -> Result<()> {
  match command {
    Command::Resync => {
      store.resync().await?;
      tracing::info!("schema recreated");
    }
    Command::Seed { fixtures, resync } => {
      let set = match &fixtures {
        Some(dir) => SeedSet::load(dir)
          .with_context(|| format!("failed to load fixtures from {dir:?}"))?,
        None => SeedSet::bundled()?,
      };
      if resync {
        store.resync().await?;
      }
      let report = seed_all(store, &set).await?;
      tracing::info!(
        users = report.users,
        profiles = report.profiles,
        posts = report.posts,
        comments = report.comments,
        likes = report.likes,
        "fixtures loaded"
      );
      print_json(&serde_json::to_value(report)?)?;
    }
    Command::Show { kind, id } => print_json(&show(store, kind, id).await?)?,
    Command::List { kind } => print_json(&list(store, kind).await?)?,
    Command::Count => {
      print_json(&json!({
        "users":    store.count::<User>().await?,
        "profiles": store.count::<Profile>().await?,
        "posts":    store.count::<Post>().await?,
        "comments": store.count::<Comment>().await?,
        "likes":    store.count::<Like>().await?,
      }))?;
    }
  }
  Ok(())
}

async fn find<E: Entity>(store: &SqliteStore, id: RecordId) -> Result<E> {
  store
    .find_by_pk::<E>(id)
    .await?
    .ok_or_else(|| anyhow!("{} {id} not found", E::SCHEMA.name))
}

async fn show(store: &SqliteStore, kind: Kind, id: RecordId) -> Result<Value> {
  let value = match kind {
    Kind::User => {
      let user = find::<User>(store, id).await?;
      json!({
        "profile": store.get_user_profile(&user).await?,
        "posts":   store.get_user_posts(&user).await?,
        "likes":   store.get_user_likes(&user).await?,
        "user":    user,
      })
    }
    Kind::Profile => {
      let profile = find::<Profile>(store, id).await?;
      json!({
        "user":    store.get_profile_user(&profile).await?,
        "profile": profile,
      })
    }
    Kind::Post => {
      let post = find::<Post>(store, id).await?;
      json!({
        "user":     store.get_post_user(&post).await?,
        "comments": store.get_post_comments(&post).await?,
        "post":     post,
      })
    }
    Kind::Comment => {
      let comment = find::<Comment>(store, id).await?;
      json!({
        "post":    store.get_comment_post(&comment).await?,
        "comment": comment,
      })
    }
    Kind::Like => {
      let like = find::<Like>(store, id).await?;
      json!({
        "users": store.get_like_users(&like).await?,
        "like":  like,
      })
    }
  };
  Ok(value)
}

async fn list(store: &SqliteStore, kind: Kind) -> Result<Value> {
  let value = match kind {
    Kind::User => serde_json::to_value(store.find_all::<User>().await?)?,
    Kind::Profile => serde_json::to_value(store.find_all::<Profile>().await?)?,
    Kind::Post => serde_json::to_value(store.find_all::<Post>().await?)?,
    Kind::Comment => serde_json::to_value(store.find_all::<Comment>().await?)?,
    Kind::Like => serde_json::to_value(store.find_all::<Like>().await?)?,
  };
  Ok(value)
}

fn print_json(value: &Value) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
