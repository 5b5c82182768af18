//! # Database module: PostgreSQL connection pool management
//!
//! The shared pool used by every server function. Entirely gated behind
//! `#[cfg(feature = "server")]` so WASM builds never pull in SQLx.
//!
//! The pool is a lazy, process-wide singleton: the first call to [`get_pool`]
//! reads `DATABASE_URL` (via `dotenvy`), opens up to 5 connections and caches the
//! result. Schema migrations live in `packages/api/migrations` and are applied by
//! the web binary at start-up.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::get_pool;
