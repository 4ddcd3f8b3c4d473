//! Core types for Lumen.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod profile;

pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use profile::*;
