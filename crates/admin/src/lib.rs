//! Backoffice Admin library.
//!
//! Record stores, filters, validated forms, settings and tables behind the
//! dashboard screens. Everything runs on an exclusively owned [`AdminState`];
//! nothing here touches the network or writes files.
//!
//! # Screens
//!
//! - Users, roles and locations: filterable table plus create/edit form
//! - Notifications: inbox with read tracking and bulk actions
//! - Settings: four independently validated sections
//! - Login, password reset, profile and registration forms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod models;
pub mod screens;
pub mod settings;
pub mod state;
pub mod store;
pub mod validation;

pub use error::AdminError;
pub use state::{AdminState, Dataset};
