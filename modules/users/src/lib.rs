//! User collection service.
//!
//! Layering follows ports-and-adapters: `domain` owns the business
//! rules and the repository port, `infra` adapts them to SeaORM, and
//! `api` exposes the REST surface plus the authorization gates.

pub mod api;
pub mod domain;
pub mod infra;
