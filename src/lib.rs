//! agm-server is a self-hosted admin settings service for an embeddable
//! map widget.
//!
//! # Features
//!
//! - Single persisted options record (widget box, map center/zoom, marker,
//!   info window, interaction toggles)
//! - Field-by-field sanitizing validator that never rejects a submission
//! - Capability-gated settings page rendered from a Handlebars template
//! - Read-only client hand-off object for the in-page map preview
//! - Pluggable storage (SQLite included, in-memory for tests)

#![forbid(unsafe_code)]

pub mod error;
pub mod core;
pub mod options_adapter;
pub mod settings;
pub mod prelude;
pub mod routes;

pub use crate::core::app::{App, AppBuilder, VERSION};

// vim: ts=4
