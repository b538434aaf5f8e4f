//! Staff member domain types.

use chrono::{DateTime, Utc};

use sunstock_core::{Email, StaffId, StaffRole};

/// A staff member who can be referenced by stock transactions.
#[derive(Debug, Clone)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub email: Email,
    pub role: StaffRole,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a staff member.
#[derive(Debug, Clone)]
pub struct StaffInput {
    pub name: String,
    pub email: Email,
    pub role: StaffRole,
    pub department: String,
}
