//! InternHub library
//!
//! Data layer for a campus placement portal: a persistent collection store,
//! per-entity services, eligibility filtering, flexible date parsing and the
//! clients for the remote auth and extraction services.

pub mod app;
pub mod config;
pub mod database;
pub mod dates;
pub mod eligibility;
pub mod error;
pub mod ids;
pub mod remote;
pub mod services;
