//! Map widget settings subsystem
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): the persisted options record and the `Flag` type
//! - **Schema** (`schema.rs`): default values, single source of truth
//! - **Sanitize** (`sanitize.rs`): plain-text and restricted-HTML sanitizers
//! - **Validate** (`validate.rs`): total form-submission validator
//! - **Store** (`store.rs`): exclusive owner of the persisted record
//! - **Handler** (`handler.rs`): HTTP endpoints for the admin page
//! - **Help** (`help.rs`): static help tabs shown on the settings page
//!
//! The record is a singleton: exactly one options record exists, stored under
//! a fixed name in the backing options store. Every write goes through the
//! validator, which produces a fully populated record. Partial updates never
//! reach the store.

pub mod handler;
pub mod help;
pub mod sanitize;
pub mod schema;
pub mod store;
pub mod types;
pub mod validate;

pub use schema::{default_options, OPTIONS_KEY};
pub use store::SettingsStore;
pub use types::{Flag, MapOptions};
pub use validate::validate;

// vim: ts=4
