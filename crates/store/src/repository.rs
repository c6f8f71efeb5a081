//! Typed record store abstraction.

use std::sync::Arc;

use thiserror::Error;

use portcullis_core::{Domain, Grant, Object, Operation, TypeTag, User};

/// Store operation error.
///
/// These are infrastructure failures (key constraints, locks, persistence),
/// kept apart from the classified access-control taxonomy in
/// `portcullis-core`. The engine maps `Conflict`/`NotFound` back into
/// classified results at its own boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Primary key already present on insert.
    #[error("duplicate key: {0}")]
    Conflict(String),

    /// The target of a merge does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Narrow, typed accessors over the user/object/grant collections.
///
/// Every method is one atomic round trip against the backing store: lookups
/// take a consistent view, inserts are check-then-insert under the store's
/// write guard, and the `merge_*` operations union labels into an entity's
/// set in a single critical section. Callers never need to hold state across
/// calls to stay consistent, which is what makes the engine safe to share
/// behind an `Arc` in a long-lived process.
///
/// Sequence-valued queries return records in collection order (insertion
/// order), not sorted.
pub trait RecordStore: Send + Sync {
    fn find_user(&self, username: &str) -> Result<Option<User>, StoreError>;

    fn find_object(&self, name: &str) -> Result<Option<Object>, StoreError>;

    fn find_grant(
        &self,
        operation: &Operation,
        domain: &Domain,
        type_tag: &TypeTag,
    ) -> Result<Option<Grant>, StoreError>;

    /// Users whose domain set contains `domain`.
    fn users_with_domain(&self, domain: &Domain) -> Result<Vec<User>, StoreError>;

    /// Objects whose type set contains `type_tag`.
    fn objects_with_type(&self, type_tag: &TypeTag) -> Result<Vec<Object>, StoreError>;

    /// Insert a new user; `Conflict` if the username is taken.
    fn insert_user(&self, user: User) -> Result<(), StoreError>;

    /// Insert a new object; `Conflict` if the name is taken.
    fn insert_object(&self, object: Object) -> Result<(), StoreError>;

    /// Idempotent set insert; returns whether the triple was new.
    fn insert_grant(&self, grant: Grant) -> Result<bool, StoreError>;

    /// Union `domains` into the user's domain set, preserving the order of
    /// first addition; `NotFound` if the user does not exist. Returns whether
    /// the set changed.
    fn merge_user_domains(&self, username: &str, domains: &[Domain])
        -> Result<bool, StoreError>;

    /// Union `types` into the object's type set; `NotFound` if the object
    /// does not exist. Returns whether the set changed.
    fn merge_object_types(&self, name: &str, types: &[TypeTag]) -> Result<bool, StoreError>;

    /// Drop all three collections.
    fn clear(&self) -> Result<(), StoreError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        (**self).find_user(username)
    }

    fn find_object(&self, name: &str) -> Result<Option<Object>, StoreError> {
        (**self).find_object(name)
    }

    fn find_grant(
        &self,
        operation: &Operation,
        domain: &Domain,
        type_tag: &TypeTag,
    ) -> Result<Option<Grant>, StoreError> {
        (**self).find_grant(operation, domain, type_tag)
    }

    fn users_with_domain(&self, domain: &Domain) -> Result<Vec<User>, StoreError> {
        (**self).users_with_domain(domain)
    }

    fn objects_with_type(&self, type_tag: &TypeTag) -> Result<Vec<Object>, StoreError> {
        (**self).objects_with_type(type_tag)
    }

    fn insert_user(&self, user: User) -> Result<(), StoreError> {
        (**self).insert_user(user)
    }

    fn insert_object(&self, object: Object) -> Result<(), StoreError> {
        (**self).insert_object(object)
    }

    fn insert_grant(&self, grant: Grant) -> Result<bool, StoreError> {
        (**self).insert_grant(grant)
    }

    fn merge_user_domains(
        &self,
        username: &str,
        domains: &[Domain],
    ) -> Result<bool, StoreError> {
        (**self).merge_user_domains(username, domains)
    }

    fn merge_object_types(&self, name: &str, types: &[TypeTag]) -> Result<bool, StoreError> {
        (**self).merge_object_types(name, types)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}
