//! echo-core: shared types for the Echo anonymous note board
//!
//! This crate provides:
//! - The note, page and request/error shapes exchanged with the notes service
//! - Draft validation rules applied before anything is sent
//!
//! It performs no I/O; the HTTP client and state controllers live in
//! `echo-client`.

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{Field, ValidationErrors, Violation, ViolationKind, trimmed_len, validate_draft};
