//! Classified error taxonomy for registry and authorizer operations.

use thiserror::Error;

/// Result type used across the access-control surface.
pub type AccessResult<T> = Result<T, AccessError>;

/// A required argument of a registry or authorizer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Domain,
    Type,
    Object,
    Operation,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Domain => "domain",
            Field::Type => "type",
            Field::Object => "object",
            Field::Operation => "operation",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error for access-control operations.
///
/// Keep this focused on deterministic, classified outcomes (validation,
/// uniqueness, lookup misses, denials). Infrastructure failures belong to the
/// store layer.
///
/// The `Display` text of each variant is the `<reason>` part of the command
/// surface's `Error: <reason>` status line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A required argument was the empty string.
    #[error("missing {0}")]
    MissingField(Field),

    /// The target username is already taken.
    #[error("user exists")]
    UserExists,

    /// Username unknown to the credential surface (`Authenticate`/`SetDomain`).
    #[error("no such user")]
    NoSuchUser,

    /// Stored credential differs from the presented one.
    #[error("bad password")]
    BadPassword,

    /// Username unknown to the authorizer.
    #[error("user not found")]
    UserNotFound,

    /// Object name unknown to the authorizer.
    #[error("object not found")]
    ObjectNotFound,

    /// No (operation, domain, type) combination matched. This is a negative
    /// authorization result, not a system fault.
    #[error("access denied")]
    AccessDenied,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The command surface renders these verbatim after "Error: ".
    #[test]
    fn display_matches_status_line_contract() {
        assert_eq!(
            AccessError::MissingField(Field::Username).to_string(),
            "missing username"
        );
        assert_eq!(
            AccessError::MissingField(Field::Operation).to_string(),
            "missing operation"
        );
        assert_eq!(AccessError::UserExists.to_string(), "user exists");
        assert_eq!(AccessError::NoSuchUser.to_string(), "no such user");
        assert_eq!(AccessError::BadPassword.to_string(), "bad password");
        assert_eq!(AccessError::UserNotFound.to_string(), "user not found");
        assert_eq!(AccessError::ObjectNotFound.to_string(), "object not found");
        assert_eq!(AccessError::AccessDenied.to_string(), "access denied");
    }
}
