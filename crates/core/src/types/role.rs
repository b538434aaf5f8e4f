//! Staff role for authorization and display.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role assigned to staff members and panel logins.
///
/// Stored capitalized (`"Admin"` / `"Manager"` / `"Staff"`), matching the
/// values the panel's forms submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Admin,
    Manager,
    Staff,
}

impl StaffRole {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Staff => "Staff",
        }
    }

    /// All roles, in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Admin, Self::Manager, Self::Staff]
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown staff role: {0} (expected Admin, Manager or Staff)")]
pub struct ParseRoleError(String);

impl std::str::FromStr for StaffRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // CLI accepts lowercase, forms submit capitalized
        match s {
            "Admin" | "admin" => Ok(Self::Admin),
            "Manager" | "manager" => Ok(Self::Manager),
            "Staff" | "staff" => Ok(Self::Staff),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

// SQLx support (with postgres feature): stored as TEXT.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for StaffRole {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for StaffRole {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for StaffRole {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_casings() {
        assert_eq!("Admin".parse::<StaffRole>().ok(), Some(StaffRole::Admin));
        assert_eq!(
            "manager".parse::<StaffRole>().ok(),
            Some(StaffRole::Manager)
        );
        assert!("viewer".parse::<StaffRole>().is_err());
    }

    #[test]
    fn test_display_capitalized() {
        assert_eq!(StaffRole::Staff.to_string(), "Staff");
    }
}
