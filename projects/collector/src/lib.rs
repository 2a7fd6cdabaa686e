//! Data collection service
//!
//! - REST API endpoints in `endpoints/`
//! - PostgreSQL models and queries in `db/`
//! - Fetch-and-store orchestration in `collector/`
//! - Requires DATABASE_URL env var; GITHUB_TOKEN is optional

pub mod collector;
pub mod config;
pub mod db;
pub mod endpoints;
pub mod metrics;
