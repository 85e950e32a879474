//! Core types and trait definitions for the social model store.
//!
//! Five record kinds (users, profiles, posts, comments, likes), the
//! association registry binding them together, and the store traits that
//! backends implement. This crate has no database dependency.

// Native `async fn` in traits; the returned futures are bounded `Send`
// explicitly in the trait signatures.
#![allow(async_fn_in_trait)]

pub mod association;
pub mod comment;
pub mod entity;
pub mod error;
pub mod fixtures;
pub mod like;
pub mod post;
pub mod profile;
pub mod store;
pub mod user;

pub use error::{Error, Result};
