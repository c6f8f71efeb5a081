//! In-memory record store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use portcullis_core::{Domain, Grant, Object, Operation, TypeTag, User};

use crate::repository::{RecordStore, StoreError};
use crate::tables::Tables;

/// In-memory store: insertion-ordered tables behind one lock.
///
/// Intended for tests and short-lived tooling. Every trait method is a single
/// critical section, so concurrent callers cannot observe or produce a torn
/// read-modify-write.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }
}

impl RecordStore for InMemoryStore {
    fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.find_user(username))
    }

    fn find_object(&self, name: &str) -> Result<Option<Object>, StoreError> {
        Ok(self.read()?.find_object(name))
    }

    fn find_grant(
        &self,
        operation: &Operation,
        domain: &Domain,
        type_tag: &TypeTag,
    ) -> Result<Option<Grant>, StoreError> {
        Ok(self.read()?.find_grant(operation, domain, type_tag))
    }

    fn users_with_domain(&self, domain: &Domain) -> Result<Vec<User>, StoreError> {
        Ok(self.read()?.users_with_domain(domain))
    }

    fn objects_with_type(&self, type_tag: &TypeTag) -> Result<Vec<Object>, StoreError> {
        Ok(self.read()?.objects_with_type(type_tag))
    }

    fn insert_user(&self, user: User) -> Result<(), StoreError> {
        self.write()?.insert_user(user)
    }

    fn insert_object(&self, object: Object) -> Result<(), StoreError> {
        self.write()?.insert_object(object)
    }

    fn insert_grant(&self, grant: Grant) -> Result<bool, StoreError> {
        Ok(self.write()?.insert_grant(grant))
    }

    fn merge_user_domains(
        &self,
        username: &str,
        domains: &[Domain],
    ) -> Result<bool, StoreError> {
        self.write()?.merge_user_domains(username, domains)
    }

    fn merge_object_types(&self, name: &str, types: &[TypeTag]) -> Result<bool, StoreError> {
        self.write()?.merge_object_types(name, types)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.write()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_find_user() {
        let store = InMemoryStore::new();
        store.insert_user(User::new("bob", "password123")).unwrap();

        let found = store.find_user("bob").unwrap().unwrap();
        assert_eq!(found.username, "bob");
        assert_eq!(found.password, "password123");
        assert!(store.find_user("alice").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_is_a_conflict() {
        let store = InMemoryStore::new();
        store.insert_user(User::new("bob", "first")).unwrap();

        let err = store.insert_user(User::new("bob", "second")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(key) if key == "bob"));

        // The original record is untouched.
        let found = store.find_user("bob").unwrap().unwrap();
        assert_eq!(found.password, "first");
    }

    #[test]
    fn merge_unions_domains_and_reports_change() {
        let store = InMemoryStore::new();
        store.insert_user(User::new("bob", "pw")).unwrap();

        let student = Domain::new("student");
        assert!(store.merge_user_domains("bob", &[student.clone()]).unwrap());
        assert!(!store.merge_user_domains("bob", &[student.clone()]).unwrap());

        let user = store.find_user("bob").unwrap().unwrap();
        assert_eq!(user.domains, vec![student]);
    }

    #[test]
    fn merge_into_missing_user_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .merge_user_domains("ghost", &[Domain::new("student")])
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(key) if key == "ghost"));
    }

    #[test]
    fn users_with_domain_preserves_insertion_order() {
        let store = InMemoryStore::new();
        let student = Domain::new("student");
        for name in ["bob", "alice", "james"] {
            store.insert_user(User::new(name, "pw")).unwrap();
            store.merge_user_domains(name, &[student.clone()]).unwrap();
        }

        let names: Vec<_> = store
            .users_with_domain(&student)
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["bob", "alice", "james"]);
    }

    #[test]
    fn grant_insert_is_idempotent() {
        let store = InMemoryStore::new();
        let grant = Grant::new(
            Operation::new("write"),
            Domain::new("student"),
            TypeTag::new("homework"),
        );

        assert!(store.insert_grant(grant.clone()).unwrap());
        assert!(!store.insert_grant(grant.clone()).unwrap());
        assert!(store
            .find_grant(&grant.operation, &grant.domain, &grant.type_tag)
            .unwrap()
            .is_some());
    }

    #[test]
    fn clear_drops_every_collection() {
        let store = InMemoryStore::new();
        store.insert_user(User::new("bob", "pw")).unwrap();
        store
            .insert_object(Object::tagged("essay.txt", TypeTag::new("homework")))
            .unwrap();
        store
            .insert_grant(Grant::new(
                Operation::new("write"),
                Domain::new("student"),
                TypeTag::new("homework"),
            ))
            .unwrap();

        store.clear().unwrap();

        assert!(store.find_user("bob").unwrap().is_none());
        assert!(store.find_object("essay.txt").unwrap().is_none());
        assert!(store
            .users_with_domain(&Domain::new("student"))
            .unwrap()
            .is_empty());
    }
}
