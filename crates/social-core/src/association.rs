//! The association registry and the `AssociationStore` trait.
//!
//! Each [`Relation`] is declared once, statically, and describes how two
//! schemas are linked: either by a foreign-key column on the target table or
//! by a dedicated join table. Backends implement three primitives over a
//! relation ([`AssociationStore::related`], [`AssociationStore::assign_owner`],
//! [`AssociationStore::link`]); the named per-pair accessors
//! (`get_user_profile`, `add_post_comment`, ...) are provided on top of them.
//!
//! Single-valued sides (a profile's user, a post's user, a comment's post,
//! a user's profile) are overwritten by every set. Multi-valued sides
//! accumulate.

use std::future::Future;

use crate::{
  comment::{COMMENTS, Comment},
  entity::{Entity, RecordId, Schema},
  like::{LIKES, Like},
  post::{POSTS, Post},
  profile::{PROFILES, Profile},
  store::RecordStore,
  user::{USERS, User},
};

// ─── Declarations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
  /// Each source has at most one target and vice versa.
  OneToOne,
  /// Each target has at most one source.
  OneToMany,
  ManyToMany,
}

/// How a relation is persisted.
#[derive(Debug, PartialEq, Eq)]
pub enum Link {
  /// Nullable column on the target table referencing the source's id.
  ForeignKey { column: &'static str },
  /// Dedicated table of `(source, target)` id pairs with no other columns.
  JoinTable {
    table:         &'static str,
    source_column: &'static str,
    target_column: &'static str,
  },
}

/// Which way a relation is being traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  /// Source to target (user → profile, user → posts, ...).
  Forward,
  /// Target to source (profile → user, comment → post, ...).
  Inverse,
}

#[derive(Debug)]
pub struct Relation {
  pub name:        &'static str,
  pub cardinality: Cardinality,
  pub source:      &'static Schema,
  pub target:      &'static Schema,
  pub link:        Link,
}

impl Relation {
  /// The schema a traversal in `direction` starts from.
  pub fn origin(&self, direction: Direction) -> &'static Schema {
    match direction {
      Direction::Forward => self.source,
      Direction::Inverse => self.target,
    }
  }

  /// The schema a traversal in `direction` yields.
  pub fn endpoint(&self, direction: Direction) -> &'static Schema {
    match direction {
      Direction::Forward => self.target,
      Direction::Inverse => self.source,
    }
  }
}

/// User has one Profile; Profile belongs to User.
pub static USER_PROFILE: Relation = Relation {
  name:        "user_profile",
  cardinality: Cardinality::OneToOne,
  source:      &USERS,
  target:      &PROFILES,
  link:        Link::ForeignKey { column: "user_id" },
};

/// User has many Posts; Post belongs to User.
pub static USER_POSTS: Relation = Relation {
  name:        "user_posts",
  cardinality: Cardinality::OneToMany,
  source:      &USERS,
  target:      &POSTS,
  link:        Link::ForeignKey { column: "user_id" },
};

/// Post has many Comments; Comment belongs to Post.
pub static POST_COMMENTS: Relation = Relation {
  name:        "post_comments",
  cardinality: Cardinality::OneToMany,
  source:      &POSTS,
  target:      &COMMENTS,
  link:        Link::ForeignKey { column: "post_id" },
};

/// User belongs to many Likes and Like belongs to many Users.
pub static USER_LIKES: Relation = Relation {
  name:        "user_likes",
  cardinality: Cardinality::ManyToMany,
  source:      &USERS,
  target:      &LIKES,
  link:        Link::JoinTable {
    table:         "user_likes",
    source_column: "user_id",
    target_column: "like_id",
  },
};

pub static REGISTRY: [&Relation; 4] =
  [&USER_PROFILE, &USER_POSTS, &POST_COMMENTS, &USER_LIKES];

fn first<T>(rows: Vec<T>) -> Option<T> { rows.into_iter().next() }

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Association accessors over a [`RecordStore`].
pub trait AssociationStore: RecordStore {
  // ── Primitives ────────────────────────────────────────────────────────

  /// Records reachable from `id` across `relation`, in insertion order: by
  /// record id for foreign-key links, by join row for join tables.
  ///
  /// Fails if `T` is not the relation's endpoint for `direction`.
  fn related<T: Entity>(
    &self,
    relation: &'static Relation,
    direction: Direction,
    id: RecordId,
  ) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send + '_;

  /// Point each of `children` at `owner` through a foreign-key relation.
  ///
  /// For a [`Cardinality::OneToOne`] relation any other child currently
  /// pointing at `owner` is detached first. Fails with a referential
  /// integrity error if `owner` or any child does not exist; nothing is
  /// written in that case.
  fn assign_owner(
    &self,
    relation: &'static Relation,
    owner: RecordId,
    children: Vec<RecordId>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Append `(source, target)` pairs to a join-table relation. Existing pairs
  /// are kept and duplicates are stored as given.
  fn link(
    &self,
    relation: &'static Relation,
    pairs: Vec<(RecordId, RecordId)>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── User ↔ Profile ────────────────────────────────────────────────────

  fn get_user_profile(
    &self,
    user: &User,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send {
    let id = user.id;
    async move {
      self
        .related(&USER_PROFILE, Direction::Forward, id)
        .await
        .map(first)
    }
  }

  /// Replace the user's profile with `profile`.
  fn set_user_profile(
    &self,
    user: &User,
    profile: &Profile,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    self.assign_owner(&USER_PROFILE, user.id, vec![profile.id])
  }

  fn get_profile_user(
    &self,
    profile: &Profile,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send {
    let id = profile.id;
    async move {
      self
        .related(&USER_PROFILE, Direction::Inverse, id)
        .await
        .map(first)
    }
  }

  /// Replace the profile's user with `user`. The user's previous profile,
  /// if any, is detached.
  fn set_profile_user(
    &self,
    profile: &Profile,
    user: &User,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    self.assign_owner(&USER_PROFILE, user.id, vec![profile.id])
  }

  // ── User → Posts ──────────────────────────────────────────────────────

  fn get_user_posts(
    &self,
    user: &User,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send {
    self.related(&USER_POSTS, Direction::Forward, user.id)
  }

  fn add_user_post(
    &self,
    user: &User,
    post: &Post,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    self.assign_owner(&USER_POSTS, user.id, vec![post.id])
  }

  fn add_user_posts(
    &self,
    user: &User,
    posts: &[Post],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    let children = posts.iter().map(Post::id).collect();
    self.assign_owner(&USER_POSTS, user.id, children)
  }

  fn get_post_user(
    &self,
    post: &Post,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send {
    let id = post.id;
    async move {
      self
        .related(&USER_POSTS, Direction::Inverse, id)
        .await
        .map(first)
    }
  }

  fn set_post_user(
    &self,
    post: &Post,
    user: &User,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    self.assign_owner(&USER_POSTS, user.id, vec![post.id])
  }

  // ── Post → Comments ───────────────────────────────────────────────────

  fn get_post_comments(
    &self,
    post: &Post,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send {
    self.related(&POST_COMMENTS, Direction::Forward, post.id)
  }

  fn add_post_comment(
    &self,
    post: &Post,
    comment: &Comment,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    self.assign_owner(&POST_COMMENTS, post.id, vec![comment.id])
  }

  fn add_post_comments(
    &self,
    post: &Post,
    comments: &[Comment],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    let children = comments.iter().map(Comment::id).collect();
    self.assign_owner(&POST_COMMENTS, post.id, children)
  }

  fn get_comment_post(
    &self,
    comment: &Comment,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send {
    let id = comment.id;
    async move {
      self
        .related(&POST_COMMENTS, Direction::Inverse, id)
        .await
        .map(first)
    }
  }

  fn set_comment_post(
    &self,
    comment: &Comment,
    post: &Post,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    self.assign_owner(&POST_COMMENTS, post.id, vec![comment.id])
  }

  // ── User ↔ Likes ──────────────────────────────────────────────────────

  fn get_user_likes(
    &self,
    user: &User,
  ) -> impl Future<Output = Result<Vec<Like>, Self::Error>> + Send {
    self.related(&USER_LIKES, Direction::Forward, user.id)
  }

  fn add_user_like(
    &self,
    user: &User,
    like: &Like,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    self.link(&USER_LIKES, vec![(user.id, like.id)])
  }

  fn add_user_likes(
    &self,
    user: &User,
    likes: &[Like],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    let pairs = likes.iter().map(|like| (user.id, like.id)).collect();
    self.link(&USER_LIKES, pairs)
  }

  fn get_like_users(
    &self,
    like: &Like,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send {
    self.related(&USER_LIKES, Direction::Inverse, like.id)
  }

  fn add_like_user(
    &self,
    like: &Like,
    user: &User,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    self.link(&USER_LIKES, vec![(user.id, like.id)])
  }

  fn add_like_users(
    &self,
    like: &Like,
    users: &[User],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send {
    let pairs = users.iter().map(|user| (user.id, like.id)).collect();
    self.link(&USER_LIKES, pairs)
  }
}
