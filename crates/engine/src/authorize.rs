//! Permission resolution over the label cross product.

use portcullis_core::{AccessError, Field, Operation};
use portcullis_store::RecordStore;

use crate::{require, EngineError};

/// Decides whether an actor may perform an operation on a resource.
///
/// - No mutation
/// - No panics
/// - Pure existence query over the grant set
#[derive(Debug, Clone)]
pub struct Authorizer<S> {
    store: S,
}

impl<S: RecordStore> Authorizer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access is granted iff some pair from the user's domains and the
    /// object's types carries the operation in the grant set.
    ///
    /// Short-circuits on the first match; since any match is sufficient,
    /// evaluation order never changes the outcome, only the number of grant
    /// lookups (at most |domains| * |types|).
    pub fn can_access(
        &self,
        operation: &str,
        username: &str,
        object_name: &str,
    ) -> Result<(), EngineError> {
        require(Field::Operation, operation)?;
        require(Field::Username, username)?;
        require(Field::Object, object_name)?;

        let user = self
            .store
            .find_user(username)?
            .ok_or(AccessError::UserNotFound)?;
        let object = self
            .store
            .find_object(object_name)?
            .ok_or(AccessError::ObjectNotFound)?;

        let operation = Operation::new(operation.to_owned());
        for domain in &user.domains {
            for type_tag in &object.types {
                if self
                    .store
                    .find_grant(&operation, domain, type_tag)?
                    .is_some()
                {
                    tracing::debug!(
                        operation = %operation,
                        username,
                        object = object_name,
                        domain = %domain,
                        type_tag = %type_tag,
                        "access granted"
                    );
                    return Ok(());
                }
            }
        }

        tracing::debug!(
            operation = %operation,
            username,
            object = object_name,
            "access denied"
        );
        Err(AccessError::AccessDenied.into())
    }
}
