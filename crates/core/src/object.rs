//! Object record: a resource with type tags.

use serde::{Deserialize, Serialize};

use crate::TypeTag;

/// A named resource.
///
/// # Invariants
/// - `name` is the primary key: unique across the collection, non-empty.
/// - `types` never contains duplicate labels.
///
/// Objects come into existence through their first type tagging; there is no
/// untagged-object creation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,

    /// Type labels, in the order they were attached.
    pub types: Vec<TypeTag>,
}

impl Object {
    /// An object tagged with its first (and so far only) type.
    pub fn tagged(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            types: vec![type_tag],
        }
    }

    pub fn has_type(&self, type_tag: &TypeTag) -> bool {
        self.types.iter().any(|t| t == type_tag)
    }
}
