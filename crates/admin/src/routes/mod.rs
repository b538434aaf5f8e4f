//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (in main.rs)
//!
//! # Auth (email + password)
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login form submission
//! POST /auth/logout            - Logout
//!
//! # Dashboard
//! GET  /                       - Dashboard overview (?project= filter)
//!
//! # Inventory
//! GET  /inventory              - Item listing (?q= search)
//! GET  /inventory/new          - New item form
//! POST /inventory              - Create item
//! GET  /inventory/{id}/edit    - Edit item form
//! POST /inventory/{id}         - Update item
//! POST /inventory/{id}/delete  - Delete item
//!
//! # Stock transactions
//! GET  /stock/input            - Goods-received form
//! POST /stock/input            - Record an input transaction
//! GET  /stock/output           - Goods-issued form
//! POST /stock/output           - Record an output transaction
//!
//! # Staff
//! GET  /staff                  - Staff listing
//! GET  /staff/new              - New staff form
//! POST /staff                  - Create staff member
//! GET  /staff/{id}/edit        - Edit staff form
//! POST /staff/{id}             - Update staff member
//! POST /staff/{id}/delete      - Delete staff member
//!
//! # History & clients
//! GET  /history                - Transaction log (?q=&direction=)
//! GET  /clients                - Per-project consumption rollups
//! GET  /clients/export.csv     - CSV of the filtered output transactions
//!
//! # RFQ
//! GET  /rfq                    - Draft screen
//! POST /rfq/items              - Add an item to the draft
//! POST /rfq/items/update       - Set a line's quantity
//! POST /rfq/items/remove       - Remove a line
//! POST /rfq/clear              - Empty the draft
//! GET  /rfq/print              - Printable A4 document
//! GET  /rfq/export.csv         - Draft as CSV
//! ```

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod history;
pub mod inventory;
pub mod rfq;
pub mod staff;
pub mod stock;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the application router.
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Auth
        .merge(auth::router())
        // Inventory
        .route("/inventory", get(inventory::index).post(inventory::create))
        .route("/inventory/new", get(inventory::new_form))
        .route("/inventory/{id}/edit", get(inventory::edit_form))
        .route("/inventory/{id}", post(inventory::update))
        .route("/inventory/{id}/delete", post(inventory::delete))
        // Stock transactions
        .route(
            "/stock/input",
            get(stock::input_form).post(stock::record_input),
        )
        .route(
            "/stock/output",
            get(stock::output_form).post(stock::record_output),
        )
        // Staff
        .route("/staff", get(staff::index).post(staff::create))
        .route("/staff/new", get(staff::new_form))
        .route("/staff/{id}/edit", get(staff::edit_form))
        .route("/staff/{id}", post(staff::update))
        .route("/staff/{id}/delete", post(staff::delete))
        // History & clients
        .route("/history", get(history::index))
        .route("/clients", get(clients::index))
        .route("/clients/export.csv", get(clients::export_csv))
        // RFQ
        .route("/rfq", get(rfq::index))
        .route("/rfq/items", post(rfq::add_item))
        .route("/rfq/items/update", post(rfq::update_item))
        .route("/rfq/items/remove", post(rfq::remove_item))
        .route("/rfq/clear", post(rfq::clear))
        .route("/rfq/print", get(rfq::print))
        .route("/rfq/export.csv", get(rfq::export_csv))
}
