//! Integration tests for `SqliteStore` against an in-memory database.

use social_core::{
  association::{AssociationStore, Direction, USER_LIKES, USER_POSTS},
  comment::Comment,
  entity::Entity,
  fixtures::{SeedSet, seed_all},
  like::Like,
  post::Post,
  profile::Profile,
  store::RecordStore,
  user::{NewUser, User},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn seeds() -> SeedSet { SeedSet::bundled().expect("bundled fixtures") }

// ─── Create & find ───────────────────────────────────────────────────────────

#[tokio::test]
async fn can_create_users() {
  let s = store().await;
  let seeds = seeds();

  s.bulk_create::<User>(seeds.users.clone()).await.unwrap();
  let found = s.find_by_pk::<User>(1).await.unwrap().unwrap();

  assert_eq!(found.name, "alice");
  assert_eq!(found.fields(), seeds.users[0]);
}

#[tokio::test]
async fn can_create_profiles() {
  let s = store().await;
  let seeds = seeds();

  s.bulk_create::<Profile>(seeds.profiles.clone()).await.unwrap();
  let found = s.find_by_pk::<Profile>(1).await.unwrap().unwrap();

  assert_eq!(found.fields(), seeds.profiles[0]);
  assert_eq!(found.user_id, None);
}

#[tokio::test]
async fn can_create_posts() {
  let s = store().await;
  let seeds = seeds();

  s.bulk_create::<Post>(seeds.posts.clone()).await.unwrap();
  let found = s.find_by_pk::<Post>(1).await.unwrap().unwrap();
  assert_eq!(found.fields(), seeds.posts[0]);
}

#[tokio::test]
async fn can_create_likes() {
  let s = store().await;
  let seeds = seeds();

  s.bulk_create::<Like>(seeds.likes.clone()).await.unwrap();
  let found = s.find_by_pk::<Like>(1).await.unwrap().unwrap();
  assert_eq!(found.fields(), seeds.likes[0]);
}

#[tokio::test]
async fn can_create_comments() {
  let s = store().await;
  let seeds = seeds();

  s.bulk_create::<Comment>(seeds.comments.clone()).await.unwrap();
  let found = s.find_by_pk::<Comment>(1).await.unwrap().unwrap();
  assert_eq!(found.fields(), seeds.comments[0]);
}

#[tokio::test]
async fn create_returns_generated_id() {
  let s = store().await;
  let seeds = seeds();

  let first = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let second = s.create::<User>(seeds.users[1].clone()).await.unwrap();
  assert_eq!(first.id, 1);
  assert_eq!(second.id, 2);

  let found = s.find_by_pk::<User>(second.id).await.unwrap().unwrap();
  assert_eq!(found.id, second.id);
  assert_eq!(found.fields(), second.fields());
  assert_eq!(found.updated_at, second.updated_at);
}

#[tokio::test]
async fn find_by_pk_missing_returns_none() {
  let s = store().await;
  assert!(s.find_by_pk::<User>(42).await.unwrap().is_none());
  assert!(s.find_by_pk::<Like>(1).await.unwrap().is_none());
}

#[tokio::test]
async fn fields_are_opaque_strings() {
  let s = store().await;
  let user = s
    .create::<User>(NewUser { name: "".into(), email: "not an email".into() })
    .await
    .unwrap();

  let found = s.find_by_pk::<User>(user.id).await.unwrap().unwrap();
  assert_eq!(found.name, "");
  assert_eq!(found.email, "not an email");
}

#[tokio::test]
async fn find_all_is_ordered_by_id() {
  let s = store().await;
  let seeds = seeds();
  s.bulk_create::<Post>(seeds.posts.clone()).await.unwrap();

  let posts = s.find_all::<Post>().await.unwrap();
  let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
  assert_eq!(ids, (1..=seeds.posts.len() as i64).collect::<Vec<_>>());
  assert_eq!(s.count::<Post>().await.unwrap(), seeds.posts.len() as u64);
}

// ─── User ↔ Profile ──────────────────────────────────────────────────────────

#[tokio::test]
async fn user_can_have_only_one_profile() {
  let s = store().await;
  let seeds = seeds();

  let user = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let profile1 = s.create::<Profile>(seeds.profiles[0].clone()).await.unwrap();
  let profile2 = s.create::<Profile>(seeds.profiles[1].clone()).await.unwrap();

  s.set_user_profile(&user, &profile1).await.unwrap();
  s.set_user_profile(&user, &profile2).await.unwrap();

  let associated = s.get_user_profile(&user).await.unwrap().unwrap();
  assert_eq!(associated.id, profile2.id);
  assert_eq!(associated.user_id, Some(user.id));

  // The replaced profile is detached, not left pointing at the user.
  let old = s.find_by_pk::<Profile>(profile1.id).await.unwrap().unwrap();
  assert_eq!(old.user_id, None);
  assert!(s.get_profile_user(&old).await.unwrap().is_none());
}

#[tokio::test]
async fn profile_can_only_have_one_user() {
  let s = store().await;
  let seeds = seeds();

  let profile = s.create::<Profile>(seeds.profiles[0].clone()).await.unwrap();
  let user1 = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let user2 = s.create::<User>(seeds.users[1].clone()).await.unwrap();

  s.set_profile_user(&profile, &user1).await.unwrap();
  s.set_profile_user(&profile, &user2).await.unwrap();

  let associated = s.get_profile_user(&profile).await.unwrap().unwrap();
  assert_eq!(associated.id, user2.id);
  assert!(s.get_user_profile(&user1).await.unwrap().is_none());
}

#[tokio::test]
async fn setting_profile_from_profile_side_keeps_user_at_one_profile() {
  let s = store().await;
  let seeds = seeds();

  let user = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let profile1 = s.create::<Profile>(seeds.profiles[0].clone()).await.unwrap();
  let profile2 = s.create::<Profile>(seeds.profiles[1].clone()).await.unwrap();

  s.set_profile_user(&profile1, &user).await.unwrap();
  s.set_profile_user(&profile2, &user).await.unwrap();

  let associated = s.get_user_profile(&user).await.unwrap().unwrap();
  assert_eq!(associated.id, profile2.id);
  assert!(s.get_profile_user(&profile1).await.unwrap().is_none());
}

#[tokio::test]
async fn user_without_profile_returns_none() {
  let s = store().await;
  let user = s.create::<User>(seeds().users[0].clone()).await.unwrap();
  assert!(s.get_user_profile(&user).await.unwrap().is_none());
}

// ─── User → Posts ────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_can_have_many_posts() {
  let s = store().await;
  let seeds = seeds();

  let user = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let post1 = s.create::<Post>(seeds.posts[0].clone()).await.unwrap();
  let post2 = s.create::<Post>(seeds.posts[1].clone()).await.unwrap();

  s.add_user_post(&user, &post1).await.unwrap();
  s.add_user_post(&user, &post2).await.unwrap();

  let posts = s.get_user_posts(&user).await.unwrap();
  assert_eq!(posts.len(), 2);
  assert_eq!(posts[0].id, post1.id);
  assert_eq!(posts[1].id, post2.id);
  assert_eq!(posts[0].fields(), seeds.posts[0]);
}

#[tokio::test]
async fn add_user_posts_accepts_a_sequence() {
  let s = store().await;
  let seeds = seeds();

  let user = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let posts = s.bulk_create::<Post>(seeds.posts.clone()).await.unwrap();

  s.add_user_posts(&user, &posts).await.unwrap();
  assert_eq!(s.get_user_posts(&user).await.unwrap().len(), posts.len());
}

#[tokio::test]
async fn a_post_can_only_have_one_user() {
  let s = store().await;
  let seeds = seeds();

  let post = s.create::<Post>(seeds.posts[0].clone()).await.unwrap();
  let user1 = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let user2 = s.create::<User>(seeds.users[1].clone()).await.unwrap();

  s.set_post_user(&post, &user1).await.unwrap();
  s.set_post_user(&post, &user2).await.unwrap();

  let owner = s.get_post_user(&post).await.unwrap().unwrap();
  assert_eq!(owner.id, user2.id);
  assert!(s.get_user_posts(&user1).await.unwrap().is_empty());
  assert_eq!(s.get_user_posts(&user2).await.unwrap().len(), 1);
}

#[tokio::test]
async fn reassigning_a_post_moves_it_between_users() {
  let s = store().await;
  let seeds = seeds();

  let user1 = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let user2 = s.create::<User>(seeds.users[1].clone()).await.unwrap();
  let post = s.create::<Post>(seeds.posts[0].clone()).await.unwrap();

  s.add_user_post(&user1, &post).await.unwrap();
  s.add_user_post(&user2, &post).await.unwrap();

  assert!(s.get_user_posts(&user1).await.unwrap().is_empty());
  assert_eq!(s.get_user_posts(&user2).await.unwrap()[0].id, post.id);
}

// ─── Post → Comments ─────────────────────────────────────────────────────────

#[tokio::test]
async fn post_can_have_many_comments() {
  let s = store().await;
  let seeds = seeds();

  let post = s.create::<Post>(seeds.posts[0].clone()).await.unwrap();
  let comment1 = s.create::<Comment>(seeds.comments[0].clone()).await.unwrap();
  let comment2 = s.create::<Comment>(seeds.comments[1].clone()).await.unwrap();

  s.add_post_comment(&post, &comment1).await.unwrap();
  s.add_post_comment(&post, &comment2).await.unwrap();

  let comments = s.get_post_comments(&post).await.unwrap();
  assert_eq!(comments.len(), 2);
  assert_eq!(comments[0].id, comment1.id);
  assert_eq!(comments[1].id, comment2.id);
  assert!(comments.iter().all(|c| c.post_id == Some(post.id)));
}

#[tokio::test]
async fn a_comment_can_only_have_one_post() {
  let s = store().await;
  let seeds = seeds();

  let comment = s.create::<Comment>(seeds.comments[0].clone()).await.unwrap();
  let post1 = s.create::<Post>(seeds.posts[0].clone()).await.unwrap();
  let post2 = s.create::<Post>(seeds.posts[1].clone()).await.unwrap();

  s.set_comment_post(&comment, &post1).await.unwrap();
  s.set_comment_post(&comment, &post2).await.unwrap();

  let post = s.get_comment_post(&comment).await.unwrap().unwrap();
  assert_eq!(post.id, post2.id);
  assert!(s.get_post_comments(&post1).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_post_comments_accepts_a_sequence() {
  let s = store().await;
  let seeds = seeds();

  let post = s.create::<Post>(seeds.posts[0].clone()).await.unwrap();
  let comments = s.bulk_create::<Comment>(seeds.comments.clone()).await.unwrap();

  s.add_post_comments(&post, &comments).await.unwrap();
  let fetched = s.get_post_comments(&post).await.unwrap();
  assert_eq!(fetched.len(), comments.len());
}

// ─── User ↔ Likes ────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_can_have_many_likes() {
  let s = store().await;
  let seeds = seeds();

  let user = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let like1 = s.create::<Like>(seeds.likes[0].clone()).await.unwrap();
  let like2 = s.create::<Like>(seeds.likes[1].clone()).await.unwrap();

  s.add_user_like(&user, &like1).await.unwrap();
  s.add_user_like(&user, &like2).await.unwrap();

  let likes = s.get_user_likes(&user).await.unwrap();
  assert_eq!(likes.len(), 2);
  assert_eq!(likes[0].id, like1.id);
  assert_eq!(likes[1].id, like2.id);
}

#[tokio::test]
async fn likes_can_have_many_users() {
  let s = store().await;
  let seeds = seeds();

  let user1 = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let user2 = s.create::<User>(seeds.users[1].clone()).await.unwrap();
  let like = s.create::<Like>(seeds.likes[0].clone()).await.unwrap();

  s.add_like_user(&like, &user1).await.unwrap();
  s.add_like_user(&like, &user2).await.unwrap();

  let users = s.get_like_users(&like).await.unwrap();
  assert_eq!(users.len(), 2);
  assert_eq!(users[0].id, user1.id);
  assert_eq!(users[1].id, user2.id);
}

#[tokio::test]
async fn likes_are_visible_from_both_sides() {
  let s = store().await;
  let seeds = seeds();

  let user1 = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let user2 = s.create::<User>(seeds.users[1].clone()).await.unwrap();
  let like = s.create::<Like>(seeds.likes[0].clone()).await.unwrap();
  let other = s.create::<Like>(seeds.likes[1].clone()).await.unwrap();

  s.add_like_user(&like, &user1).await.unwrap();
  s.add_user_like(&user2, &like).await.unwrap();
  s.add_user_like(&user1, &other).await.unwrap();

  let ids: Vec<_> =
    s.get_like_users(&like).await.unwrap().iter().map(|u| u.id).collect();
  assert_eq!(ids, [user1.id, user2.id]);

  let user1_likes: Vec<_> =
    s.get_user_likes(&user1).await.unwrap().iter().map(|l| l.id).collect();
  assert_eq!(user1_likes, [like.id, other.id]);
}

#[tokio::test]
async fn duplicate_likes_accumulate() {
  let s = store().await;
  let seeds = seeds();

  let user = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let like = s.create::<Like>(seeds.likes[0].clone()).await.unwrap();

  s.add_user_like(&user, &like).await.unwrap();
  s.add_user_like(&user, &like).await.unwrap();

  assert_eq!(s.get_user_likes(&user).await.unwrap().len(), 2);
  assert_eq!(s.get_like_users(&like).await.unwrap().len(), 2);
}

#[tokio::test]
async fn add_like_users_accepts_a_sequence() {
  let s = store().await;
  let seeds = seeds();

  let users = s.bulk_create::<User>(seeds.users.clone()).await.unwrap();
  let like = s.create::<Like>(seeds.likes[0].clone()).await.unwrap();

  s.add_like_users(&like, &users).await.unwrap();
  assert_eq!(s.get_like_users(&like).await.unwrap().len(), users.len());

  let likes = s.bulk_create::<Like>(seeds.likes.clone()).await.unwrap();
  s.add_user_likes(&users[0], &likes).await.unwrap();
  assert_eq!(s.get_user_likes(&users[0]).await.unwrap().len(), likes.len() + 1);
}

// ─── Referential integrity ───────────────────────────────────────────────────

#[tokio::test]
async fn setting_a_missing_owner_is_missing_record() {
  let s = store().await;
  let seeds = seeds();

  let user = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let post = s.create::<Post>(seeds.posts[0].clone()).await.unwrap();

  let ghost = User { id: 99, ..user.clone() };
  let err = s.set_post_user(&post, &ghost).await.unwrap_err();
  assert!(matches!(err, Error::MissingRecord { entity: "User", id: 99 }));

  // Nothing was written.
  assert!(s.get_post_user(&post).await.unwrap().is_none());
}

#[tokio::test]
async fn adding_a_missing_child_is_missing_record() {
  let s = store().await;
  let seeds = seeds();

  let post = s.create::<Post>(seeds.posts[0].clone()).await.unwrap();
  let comment = s.create::<Comment>(seeds.comments[0].clone()).await.unwrap();
  let ghost = Comment { id: 77, ..comment.clone() };

  let err = s
    .add_post_comments(&post, &[comment.clone(), ghost])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::MissingRecord { entity: "Comment", id: 77 }));

  // The batch is rejected as a whole.
  assert!(s.get_post_comments(&post).await.unwrap().is_empty());
}

#[tokio::test]
async fn linking_a_missing_like_is_missing_record() {
  let s = store().await;
  let seeds = seeds();

  let user = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let like = s.create::<Like>(seeds.likes[0].clone()).await.unwrap();
  let ghost = Like { id: 5, ..like };

  let err = s.add_user_like(&user, &ghost).await.unwrap_err();
  assert!(matches!(err, Error::MissingRecord { entity: "Like", id: 5 }));
  assert!(s.get_user_likes(&user).await.unwrap().is_empty());
}

// ─── Primitives ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn related_rejects_wrong_endpoint_type() {
  let s = store().await;
  let err = s
    .related::<Comment>(&USER_POSTS, Direction::Forward, 1)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(social_core::Error::EndpointMismatch { entity: "Comment", .. })
  ));
}

#[tokio::test]
async fn link_on_foreign_key_relation_is_rejected() {
  let s = store().await;
  let err = s.link(&USER_POSTS, vec![(1, 1)]).await.unwrap_err();
  assert!(matches!(err, Error::WrongLink("user_posts")));

  let err = s.assign_owner(&USER_LIKES, 1, vec![1]).await.unwrap_err();
  assert!(matches!(err, Error::WrongLink("user_likes")));
}

#[tokio::test]
async fn association_restamps_updated_at() {
  let s = store().await;
  let seeds = seeds();

  let user = s.create::<User>(seeds.users[0].clone()).await.unwrap();
  let post = s.create::<Post>(seeds.posts[0].clone()).await.unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(20)).await;
  s.add_user_post(&user, &post).await.unwrap();

  let stored = s.find_by_pk::<Post>(post.id).await.unwrap().unwrap();
  assert!(stored.updated_at > post.updated_at);
  assert_eq!(stored.created_at, post.created_at);
}

// ─── Schema lifecycle ────────────────────────────────────────────────────────

#[tokio::test]
async fn resync_twice_leaves_store_empty() {
  let s = store().await;
  seed_all(&s, &seeds()).await.unwrap();
  assert!(s.count::<User>().await.unwrap() > 0);

  s.resync().await.unwrap();
  assert_eq!(s.count::<User>().await.unwrap(), 0);
  assert_eq!(s.count::<Like>().await.unwrap(), 0);

  s.resync().await.unwrap();
  assert_eq!(s.count::<User>().await.unwrap(), 0);
  assert_eq!(s.count::<Profile>().await.unwrap(), 0);
  assert_eq!(s.count::<Post>().await.unwrap(), 0);
  assert_eq!(s.count::<Comment>().await.unwrap(), 0);
  assert_eq!(s.count::<Like>().await.unwrap(), 0);
}

#[tokio::test]
async fn resync_restarts_ids_and_drops_join_rows() {
  let s = store().await;
  let seeds = seeds();

  let users = s.bulk_create::<User>(seeds.users.clone()).await.unwrap();
  let like = s.create::<Like>(seeds.likes[0].clone()).await.unwrap();
  s.add_like_users(&like, &users).await.unwrap();

  s.resync().await.unwrap();

  let users = s.bulk_create::<User>(seeds.users.clone()).await.unwrap();
  let like = s.create::<Like>(seeds.likes[0].clone()).await.unwrap();
  assert_eq!(users[0].id, 1);
  assert_eq!(s.find_by_pk::<User>(1).await.unwrap().unwrap().name, "alice");
  assert!(s.get_like_users(&like).await.unwrap().is_empty());
}

#[tokio::test]
async fn seed_all_reports_counts() {
  let s = store().await;
  let seeds = seeds();

  let report = seed_all(&s, &seeds).await.unwrap();
  assert_eq!(report.users, seeds.users.len());
  assert_eq!(report.likes, seeds.likes.len());
  assert_eq!(s.count::<Comment>().await.unwrap(), seeds.comments.len() as u64);
}

#[tokio::test]
async fn open_file_store_persists_between_handles() {
  let dir = std::env::temp_dir().join(format!("social-store-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("persist.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create::<User>(seeds().users[0].clone()).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.count::<User>().await.unwrap(), 1);
  std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn bulk_create_failure_saves_nothing() {
  let dir = std::env::temp_dir().join(format!("social-bulk-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("bulk.db");
  let _ = std::fs::remove_file(&path);

  let s = SqliteStore::open(&path).await.unwrap();

  // Reject the second seed user from a separate connection.
  let side = rusqlite::Connection::open(&path).unwrap();
  side
    .execute_batch(
      "CREATE TRIGGER reject_bob BEFORE INSERT ON users WHEN NEW.name = 'bob'
       BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();
  drop(side);

  let users = seeds().users;
  assert!(users.len() > 2 && users[1].name == "bob");

  let err = s.bulk_create::<User>(users).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)));
  assert_eq!(s.count::<User>().await.unwrap(), 0);
  assert!(s.find_by_pk::<User>(1).await.unwrap().is_none());

  std::fs::remove_dir_all(&dir).ok();
}
