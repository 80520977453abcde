//! Storeroom Core - Shared types library.
//!
//! This crate provides common types used across the Storeroom workspace:
//! - `admin` - The administration dashboard (web service)
//! - `integration-tests` - End-to-end tests (including the platform API stub)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere, including inside test fixtures that fake the platform API.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, hex colors, emails, and prices
//! - [`entities`] - Wire-format records and mutation payloads for the platform API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod entities;
pub mod types;

pub use entities::*;
pub use types::*;
