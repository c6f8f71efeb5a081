//! The three record collections, shared by every backend.

use indexmap::{IndexMap, IndexSet};

use portcullis_core::{Domain, Grant, Object, Operation, TypeTag, User};

use crate::repository::StoreError;

/// Insertion-ordered collections keyed by primary key.
///
/// Locking is the backend's concern; all operations here assume exclusive or
/// shared access has already been arranged.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: IndexMap<String, User>,
    pub(crate) objects: IndexMap<String, Object>,
    pub(crate) grants: IndexSet<Grant>,
}

impl Tables {
    pub(crate) fn find_user(&self, username: &str) -> Option<User> {
        self.users.get(username).cloned()
    }

    pub(crate) fn find_object(&self, name: &str) -> Option<Object> {
        self.objects.get(name).cloned()
    }

    pub(crate) fn find_grant(
        &self,
        operation: &Operation,
        domain: &Domain,
        type_tag: &TypeTag,
    ) -> Option<Grant> {
        let key = Grant::new(operation.clone(), domain.clone(), type_tag.clone());
        self.grants.get(&key).cloned()
    }

    pub(crate) fn users_with_domain(&self, domain: &Domain) -> Vec<User> {
        self.users
            .values()
            .filter(|user| user.has_domain(domain))
            .cloned()
            .collect()
    }

    pub(crate) fn objects_with_type(&self, type_tag: &TypeTag) -> Vec<Object> {
        self.objects
            .values()
            .filter(|object| object.has_type(type_tag))
            .cloned()
            .collect()
    }

    pub(crate) fn insert_user(&mut self, user: User) -> Result<(), StoreError> {
        if self.users.contains_key(&user.username) {
            return Err(StoreError::Conflict(user.username));
        }
        self.users.insert(user.username.clone(), user);
        Ok(())
    }

    pub(crate) fn insert_object(&mut self, object: Object) -> Result<(), StoreError> {
        if self.objects.contains_key(&object.name) {
            return Err(StoreError::Conflict(object.name));
        }
        self.objects.insert(object.name.clone(), object);
        Ok(())
    }

    pub(crate) fn insert_grant(&mut self, grant: Grant) -> bool {
        self.grants.insert(grant)
    }

    pub(crate) fn merge_user_domains(
        &mut self,
        username: &str,
        domains: &[Domain],
    ) -> Result<bool, StoreError> {
        let user = self
            .users
            .get_mut(username)
            .ok_or_else(|| StoreError::NotFound(username.to_string()))?;

        let mut changed = false;
        for domain in domains {
            if !user.has_domain(domain) {
                user.domains.push(domain.clone());
                changed = true;
            }
        }
        Ok(changed)
    }

    pub(crate) fn merge_object_types(
        &mut self,
        name: &str,
        types: &[TypeTag],
    ) -> Result<bool, StoreError> {
        let object = self
            .objects
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let mut changed = false;
        for type_tag in types {
            if !object.has_type(type_tag) {
                object.types.push(type_tag.clone());
                changed = true;
            }
        }
        Ok(changed)
    }

    pub(crate) fn clear(&mut self) {
        self.users.clear();
        self.objects.clear();
        self.grants.clear();
    }
}
