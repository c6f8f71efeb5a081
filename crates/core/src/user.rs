//! User record: credential plus domain memberships.

use serde::{Deserialize, Serialize};

use crate::Domain;

/// A named actor.
///
/// # Invariants
/// - `username` is the primary key: unique across the collection, non-empty.
/// - `domains` never contains duplicate labels and only ever grows (labels
///   are not removed outside a full reset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,

    /// Stored verbatim; authentication is exact string comparison.
    pub password: String,

    /// Domain memberships, in the order they were granted.
    pub domains: Vec<Domain>,
}

impl User {
    /// A fresh user carries no domain memberships.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            domains: Vec::new(),
        }
    }

    pub fn has_domain(&self, domain: &Domain) -> bool {
        self.domains.iter().any(|d| d == domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_no_domains() {
        let user = User::new("bob", "password123");
        assert_eq!(user.username, "bob");
        assert_eq!(user.password, "password123");
        assert!(user.domains.is_empty());
    }

    #[test]
    fn has_domain_checks_membership() {
        let mut user = User::new("bob", "password123");
        user.domains.push(Domain::new("student"));
        assert!(user.has_domain(&Domain::new("student")));
        assert!(!user.has_domain(&Domain::new("staff")));
    }
}
