//! # Studiokit
//!
//! Minimal blocking client for the group administration surface of a Studio
//! workbench server.
//!
//! Four calls, one resource: fetch, create, replace-definition, delete.
//! A missing group is a typed signal (`Ok(None)` from
//! [`StudioClient::fetch_group`]), never an error to parse out of message
//! text. Everything else surfaces as a [`Error`] with a category for user
//! feedback.

pub mod client;
pub mod error;

pub use client::{GroupDefinition, StudioClient};
pub use error::{Error, ErrorCategory, Result};
