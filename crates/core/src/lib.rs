//! `portcullis-core` — domain foundation for the access-control engine.
//!
//! This crate contains the **pure data model** (records, labels, classified
//! errors). No I/O, no storage concerns.

pub mod error;
pub mod grant;
pub mod labels;
pub mod object;
pub mod user;

pub use error::{AccessError, AccessResult, Field};
pub use grant::Grant;
pub use labels::{Domain, Operation, TypeTag};
pub use object::Object;
pub use user::User;
