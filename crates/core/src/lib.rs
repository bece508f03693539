//! Backoffice Core - Shared types library.
//!
//! This crate provides common types used across all Backoffice components:
//! - `admin` - Record stores, filters, forms and tables for the dashboard screens
//! - `cli` - Command-line front end for inspecting datasets
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no rendering,
//! no state containers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
