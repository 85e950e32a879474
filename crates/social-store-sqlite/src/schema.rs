//! SQL schema for the social SQLite store.
//!
//! Column names here must match the `Schema` and `Relation` declarations in
//! `social-core`; the store builds its queries from those.

/// Per-connection settings, applied on open.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const TABLES: &str = "
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    updated_at  TEXT NOT NULL      -- ISO 8601 UTC; store-assigned
);

CREATE TABLE IF NOT EXISTS profiles (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    bio             TEXT NOT NULL,
    profile_picture TEXT NOT NULL,
    birthday        TEXT NOT NULL,
    user_id         INTEGER REFERENCES users(id),
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL,     -- caller-supplied, stored verbatim
    user_id     INTEGER REFERENCES users(id),
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    post_id     INTEGER REFERENCES posts(id),
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS likes (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    reaction_type TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

-- Implicit User <-> Like association. Pairs are not unique; rowid keeps
-- insertion order.
CREATE TABLE IF NOT EXISTS user_likes (
    user_id  INTEGER NOT NULL REFERENCES users(id),
    like_id  INTEGER NOT NULL REFERENCES likes(id)
);

CREATE INDEX IF NOT EXISTS profiles_user_idx    ON profiles(user_id);
CREATE INDEX IF NOT EXISTS posts_user_idx       ON posts(user_id);
CREATE INDEX IF NOT EXISTS comments_post_idx    ON comments(post_id);
CREATE INDEX IF NOT EXISTS user_likes_user_idx  ON user_likes(user_id);
CREATE INDEX IF NOT EXISTS user_likes_like_idx  ON user_likes(like_id);
";

/// Drops every table, referencing tables first.
pub const DROP_TABLES: &str = "
DROP TABLE IF EXISTS user_likes;
DROP TABLE IF EXISTS comments;
DROP TABLE IF EXISTS posts;
DROP TABLE IF EXISTS profiles;
DROP TABLE IF EXISTS likes;
DROP TABLE IF EXISTS users;
";
