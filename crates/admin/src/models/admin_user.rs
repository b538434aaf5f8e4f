//! Admin login domain types.

use chrono::{DateTime, Utc};

use sunstock_core::{AdminUserId, Email, StaffRole};

/// A panel login (domain type).
///
/// Separate from [`super::StaffMember`]: staff rows are inventory-facing
/// records; admin users are credentials for the panel itself.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
