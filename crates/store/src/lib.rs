//! `portcullis-store` — record persistence for the access-control engine.
//!
//! A typed repository trait ([`RecordStore`]) over the three collections,
//! plus two backends: [`InMemoryStore`] for tests/dev and [`JsonFileStore`]
//! for the one-command-per-process CLI lifecycle.

pub mod json_file;
pub mod memory;
pub mod repository;

mod tables;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use repository::{RecordStore, StoreError};
