//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains the post lifecycle and the storage contracts, with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
