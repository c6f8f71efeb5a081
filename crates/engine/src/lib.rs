//! `portcullis-engine` — validated mutations and permission resolution.
//!
//! The [`Registry`] owns the mutation surface plus the label info queries;
//! the [`Authorizer`] answers `can_access`. Both are thin stateless layers
//! over a shared [`portcullis_store::RecordStore`].

use thiserror::Error;

use portcullis_core::{AccessError, Field};
use portcullis_store::StoreError;

pub mod authorize;
pub mod registry;

pub use authorize::Authorizer;
pub use registry::Registry;

/// Engine-level error: either a classified access-control result or an
/// infrastructure failure from the record store.
///
/// Callers that render status lines match on `Access`; `Store` is the only
/// fatal case.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// The classified result, if this is one.
    pub fn as_access(&self) -> Option<&AccessError> {
        match self {
            EngineError::Access(e) => Some(e),
            EngineError::Store(_) => None,
        }
    }
}

/// Validate that a required argument is non-empty.
pub(crate) fn require(field: Field, value: &str) -> Result<(), AccessError> {
    if value.is_empty() {
        Err(AccessError::MissingField(field))
    } else {
        Ok(())
    }
}
