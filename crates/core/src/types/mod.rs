//! Core types for Storeroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod color;
pub mod email;
pub mod id;
pub mod price;

pub use color::{HexColor, HexColorError};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
