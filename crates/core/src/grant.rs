//! Grant record: an allowed (operation, domain, type) combination.

use serde::{Deserialize, Serialize};

use crate::{Domain, Operation, TypeTag};

/// A grant authorizes every user carrying `domain` to perform `operation` on
/// every object carrying `type_tag`.
///
/// Grants are compared as whole triples; the collection never holds two
/// identical ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    pub operation: Operation,
    pub domain: Domain,
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
}

impl Grant {
    pub fn new(operation: Operation, domain: Domain, type_tag: TypeTag) -> Self {
        Self {
            operation,
            domain,
            type_tag,
        }
    }
}

impl core::fmt::Display for Grant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.operation, self.domain, self.type_tag)
    }
}
