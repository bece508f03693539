//! Integration tests for Backoffice.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p backoffice-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `screens` - Record screens driven end to end from a seeded dataset
//! - `forms` - Login, registration and settings flows
//! - `dataset` - Loading, validating and rendering the seed dataset

#![cfg_attr(not(test), forbid(unsafe_code))]

use backoffice_admin::{AdminState, Dataset};

/// Seed dataset shared by the tests.
pub const DASHBOARD_YAML: &str = include_str!("../fixtures/dashboard.yaml");

/// Path of the seed dataset, for tests that read it from disk.
#[must_use]
pub fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/dashboard.yaml")
}

/// Parse the seed dataset.
///
/// # Panics
///
/// Panics if the fixture does not parse.
#[must_use]
#[allow(clippy::expect_used)]
pub fn dataset() -> Dataset {
    Dataset::from_yaml_str(DASHBOARD_YAML).expect("fixture parses")
}

/// Dashboard state seeded with [`dataset`].
#[must_use]
pub fn seeded_state() -> AdminState {
    AdminState::from_dataset(dataset())
}
