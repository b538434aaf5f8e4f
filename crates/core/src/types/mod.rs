//! Core types for Sunstock.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod direction;
pub mod email;
pub mod id;
pub mod role;

pub use direction::StockDirection;
pub use email::{Email, EmailError};
pub use id::*;
pub use role::StaffRole;
