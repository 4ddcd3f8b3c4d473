//! Lumen Core - Shared types library.
//!
//! This crate provides common types used across the Lumen components:
//! - `storefront` - Public-facing e-commerce site and skincare quiz
//! - `integration-tests` - HTTP-level tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Shopify global IDs, prices, and the skincare-profile vocabulary

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
