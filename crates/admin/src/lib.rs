//! Sunstock Admin library.
//!
//! This crate provides the admin panel functionality as a library, allowing
//! it to be tested and reused from the CLI.
//!
//! # Security
//!
//! The panel manages the distributor's full inventory and staff records.
//! Only deploy behind VPN-protected infrastructure; the binary binds to
//! 127.0.0.1 by default.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
