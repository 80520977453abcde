//! HTTP middleware for the admin dashboard.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions, `PostgreSQL` or in-memory store)
//!
//! Identity and store scoping are not layers: the `RequireOperator` and
//! `ActiveStore` extractors enforce them per handler, so a handler's
//! signature shows exactly what it requires.

pub mod auth;
pub mod session;
pub mod store;

pub use auth::RequireOperator;
pub use store::ActiveStore;
