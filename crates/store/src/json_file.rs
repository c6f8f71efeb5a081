//! File-backed record store: one JSON snapshot document per mutation.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use portcullis_core::{Domain, Grant, Object, Operation, TypeTag, User};

use crate::repository::{RecordStore, StoreError};
use crate::tables::Tables;

/// On-disk snapshot document. Collections are stored in insertion order so a
/// reload observes the same iteration order as the original process.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    saved_at: DateTime<Utc>,
    users: Vec<User>,
    objects: Vec<Object>,
    grants: Vec<Grant>,
}

/// Record store persisted as a single JSON snapshot file.
///
/// Every mutation rewrites the snapshot while still holding the write lock,
/// via write-to-temp-then-rename, so a concurrent reader of the path never
/// observes a torn document. Suited to the CLI's one-command-per-process
/// lifecycle; a busy long-lived service would want an incremental log
/// instead.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tables: RwLock<Tables>,
}

impl JsonFileStore {
    /// Open the snapshot at `path`, or start empty if the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tables = match fs::read(&path) {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
                tracing::debug!(
                    path = %path.display(),
                    users = snapshot.users.len(),
                    objects = snapshot.objects.len(),
                    grants = snapshot.grants.len(),
                    "loaded snapshot"
                );
                restore(snapshot)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Tables::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            tables: RwLock::new(tables),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }

    /// Write the full snapshot. Called with the write lock still held, so
    /// mutation and persistence form one critical section.
    fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            saved_at: Utc::now(),
            users: tables.users.values().cloned().collect(),
            objects: tables.objects.values().cloned().collect(),
            grants: tables.grants.iter().cloned().collect(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        let mut tmp_name: OsString = self.path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn restore(snapshot: Snapshot) -> Tables {
    let mut tables = Tables::default();
    for user in snapshot.users {
        tables.users.insert(user.username.clone(), user);
    }
    for object in snapshot.objects {
        tables.objects.insert(object.name.clone(), object);
    }
    for grant in snapshot.grants {
        tables.grants.insert(grant);
    }
    tables
}

impl RecordStore for JsonFileStore {
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
        let mut tables = self.write()?;
        tables.insert_user(user)?;
        self.persist(&tables)
    }

    fn insert_object(&self, object: Object) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables.insert_object(object)?;
        self.persist(&tables)
    }

    fn insert_grant(&self, grant: Grant) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let inserted = tables.insert_grant(grant);
        if inserted {
            self.persist(&tables)?;
        }
        Ok(inserted)
    }

    fn merge_user_domains(
        &self,
        username: &str,
        domains: &[Domain],
    ) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let changed = tables.merge_user_domains(username, domains)?;
        if changed {
            self.persist(&tables)?;
        }
        Ok(changed)
    }

    fn merge_object_types(&self, name: &str, types: &[TypeTag]) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let changed = tables.merge_object_types(name, types)?;
        if changed {
            self.persist(&tables)?;
        }
        Ok(changed)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables.clear();
        self.persist(&tables)
    }
}
