//! The `RecordStore` trait: generic persistence for any [`Entity`].
//!
//! One trait parameterised by entity schema replaces per-model persistence
//! code. Association accessors live in [`crate::association`].

use std::future::Future;

use crate::entity::{Entity, RecordId};

/// Abstraction over a storage backend holding the five record kinds.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Drop and recreate every table, including join tables. All data is lost.
  fn resync(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert one record and return it with its generated id.
  fn create<E: Entity>(
    &self,
    fields: E::Fields,
  ) -> impl Future<Output = Result<E, Self::Error>> + Send + '_;

  /// Insert every record in order. The batch is atomic: if any insert fails,
  /// none are persisted.
  fn bulk_create<E: Entity>(
    &self,
    fields: Vec<E::Fields>,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  /// Retrieve a record by primary key. Returns `None` if not found.
  fn find_by_pk<E: Entity>(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + '_;

  /// All records of a kind, ordered by id.
  fn find_all<E: Entity>(
    &self,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  fn count<E: Entity>(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
