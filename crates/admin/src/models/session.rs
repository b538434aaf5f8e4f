//! Session-related types for admin authentication.

use serde::{Deserialize, Serialize};

use sunstock_core::{AdminUserId, Email, StaffRole};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: StaffRole,
}

impl From<&super::AdminUser> for CurrentAdmin {
    fn from(user: &super::AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Session keys for panel state.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the in-progress RFQ draft.
    pub const RFQ_DRAFT: &str = "rfq_draft";
}
