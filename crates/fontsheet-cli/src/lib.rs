//! fontsheet CLI library.
//!
//! This crate provides the command implementations behind the `fontsheet`
//! binary: single builds, manifest builds and metadata inspection.

pub mod commands;
