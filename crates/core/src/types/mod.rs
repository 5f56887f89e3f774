//! Core types for Total Aéreas.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod page;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use page::{LOGIN_REQUIRED_NOTICE, Navigation, Page, Section};
pub use price::PriceLabel;
