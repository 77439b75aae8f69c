//! Shared test fixtures for SquadForge crates.
//!
//! This crate provides items, pools and scenario data for testing.
//!
//! - [`item`] - Item builder and price helpers
//! - [`pool`] - A realistic 34-item pool for the default constraint set
//! - [`scenario`] - Small pools that pin down allocator and validator behaviour
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! squadforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use squadforge_test::pool::{standard_pool, standard_constraints};
//! use squadforge_test::item::{price, ItemBuilder};
//! ```

pub mod item;
pub mod pool;
pub mod scenario;

pub use item::{item, price, ItemBuilder};
pub use pool::{standard_constraints, standard_pool};
pub use scenario::Scenario;
