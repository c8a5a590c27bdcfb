//! # Postboard Shared Library
//!
//! Domain types and the authentication core used by the Postboard API server.
//!
//! ## Module Organization
//!
//! - `models`: users, posts and questions
//! - `auth`: password hashing, bearer tokens, the request guard and the
//!   registration/login flows
//! - `store`: persistence traits with in-memory and PostgreSQL backends
//! - `repository`: owner-scoped create/list/delete over any resource
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod repository;
pub mod store;

/// Current version of the Postboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
