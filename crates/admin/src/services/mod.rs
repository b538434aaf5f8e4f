//! Business logic services for the admin panel.
//!
//! - [`auth`] - Email + password authentication (argon2)
//! - [`reports`] - Pure read-model aggregation over item/transaction lists
//! - [`export`] - CSV rendering for transaction and RFQ exports

pub mod auth;
pub mod export;
pub mod reports;
