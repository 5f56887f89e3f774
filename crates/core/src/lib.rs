//! Total Aéreas Core - Shared types library.
//!
//! Domain types used by the `site` crate and its integration tests.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no session access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, email addresses, price labels, and the
//!   page/section selectors that drive navigation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
