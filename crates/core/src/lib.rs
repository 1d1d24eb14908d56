//! Shared domain types and logic for the qboard backend.
//!
//! This crate is persistence- and transport-agnostic: it holds the error
//! taxonomy, id/timestamp aliases, notification channel constants, and the
//! pure pieces of domain logic (feed annotation, revision event kinds,
//! storage key generation) that the db/api/events crates build on.

pub mod channels;
pub mod error;
pub mod feed;
pub mod revision;
pub mod storage;
pub mod types;
