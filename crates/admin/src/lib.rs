//! Storeroom Admin library.
//!
//! This crate provides the dashboard as a library, allowing it to be
//! booted in-process by the integration tests as well as by the binary.
//!
//! # Security
//!
//! This crate holds a platform API service token with full write access
//! to every store. Deploy it behind an authenticating proxy; the app
//! trusts the identity headers the proxy injects.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod forms;
pub mod guard;
pub mod middleware;
pub mod models;
pub mod notifications;
pub mod platform;
pub mod routes;
pub mod state;
