//! Validated, idempotent mutation operations over the record store.

use portcullis_core::{AccessError, Domain, Field, Grant, Object, Operation, TypeTag, User};
use portcullis_store::{RecordStore, StoreError};

use crate::{require, EngineError};

/// The mutation surface, plus the two label info queries.
///
/// Every operation validates its arguments, performs at most one logical
/// mutation, and returns a classified result; nothing here aborts the
/// process. The check-then-act sequences live inside the store's atomic
/// primitives, so a `Registry` shared across threads cannot lose updates.
#[derive(Debug, Clone)]
pub struct Registry<S> {
    store: S,
}

impl<S: RecordStore> Registry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a user with an empty domain set.
    ///
    /// The password is stored verbatim and is not itself validated; it may be
    /// empty.
    pub fn add_user(&self, username: &str, password: &str) -> Result<(), EngineError> {
        require(Field::Username, username)?;

        match self.store.insert_user(User::new(username, password)) {
            Ok(()) => {
                tracing::debug!(username, "user added");
                Ok(())
            }
            Err(StoreError::Conflict(_)) => Err(AccessError::UserExists.into()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check a presented credential against the stored one. Side-effect free;
    /// comparison is exact, case-sensitive string equality.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), EngineError> {
        let user = self
            .store
            .find_user(username)?
            .ok_or(AccessError::NoSuchUser)?;

        if user.password != password {
            return Err(AccessError::BadPassword.into());
        }
        Ok(())
    }

    /// Add `domain` to the user's memberships. Re-adding is a no-op, not an
    /// error. An unknown user is reported before an empty domain.
    pub fn set_domain(&self, username: &str, domain: &str) -> Result<(), EngineError> {
        if self.store.find_user(username)?.is_none() {
            return Err(AccessError::NoSuchUser.into());
        }
        require(Field::Domain, domain)?;

        let label = Domain::new(domain.to_owned());
        match self
            .store
            .merge_user_domains(username, std::slice::from_ref(&label))
        {
            Ok(changed) => {
                tracing::debug!(username, domain, changed, "domain set");
                Ok(())
            }
            // The user vanished between the lookup and the merge; only a
            // concurrent reset can do that.
            Err(StoreError::NotFound(_)) => Err(AccessError::NoSuchUser.into()),
            Err(e) => Err(e.into()),
        }
    }

    /// Tag an object with a type, creating the object on first sight.
    /// Re-tagging with a type it already carries is a no-op.
    pub fn set_type(&self, object_name: &str, type_name: &str) -> Result<(), EngineError> {
        require(Field::Object, object_name)?;
        require(Field::Type, type_name)?;

        let label = TypeTag::new(type_name.to_owned());
        match self
            .store
            .merge_object_types(object_name, std::slice::from_ref(&label))
        {
            Ok(changed) => {
                tracing::debug!(object = object_name, type_tag = type_name, changed, "type set");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => {
                match self
                    .store
                    .insert_object(Object::tagged(object_name, label.clone()))
                {
                    Ok(()) => {
                        tracing::debug!(object = object_name, type_tag = type_name, "object created");
                        Ok(())
                    }
                    // Another writer created the object between the merge and
                    // the insert; fold the tag into the existing record.
                    Err(StoreError::Conflict(_)) => {
                        self.store
                            .merge_object_types(object_name, std::slice::from_ref(&label))?;
                        Ok(())
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Record an allowed (operation, domain, type) triple. An identical
    /// existing triple makes this a no-op.
    pub fn add_grant(
        &self,
        operation: &str,
        domain: &str,
        type_name: &str,
    ) -> Result<(), EngineError> {
        require(Field::Operation, operation)?;
        require(Field::Domain, domain)?;
        require(Field::Type, type_name)?;

        let grant = Grant::new(
            Operation::new(operation.to_owned()),
            Domain::new(domain.to_owned()),
            TypeTag::new(type_name.to_owned()),
        );
        let inserted = self.store.insert_grant(grant)?;
        tracing::debug!(operation, domain, type_tag = type_name, inserted, "grant added");
        Ok(())
    }

    /// Wipe all three collections.
    pub fn reset(&self) -> Result<(), EngineError> {
        self.store.clear()?;
        tracing::debug!("database cleared");
        Ok(())
    }

    /// Usernames holding `domain`, in user insertion order. No match is an
    /// empty sequence, not an error.
    pub fn domain_info(&self, domain: &str) -> Result<Vec<String>, EngineError> {
        require(Field::Domain, domain)?;

        let users = self
            .store
            .users_with_domain(&Domain::new(domain.to_owned()))?;
        Ok(users.into_iter().map(|user| user.username).collect())
    }

    /// Object names carrying `type_name`, in object insertion order.
    pub fn type_info(&self, type_name: &str) -> Result<Vec<String>, EngineError> {
        require(Field::Type, type_name)?;

        let objects = self
            .store
            .objects_with_type(&TypeTag::new(type_name.to_owned()))?;
        Ok(objects.into_iter().map(|object| object.name).collect())
    }
}
