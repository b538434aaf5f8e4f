//! Database operations for staff members.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sunstock_core::{Email, StaffId, StaffRole};

use super::RepositoryError;
use crate::models::{StaffInput, StaffMember};

/// Internal row type for staff queries.
#[derive(Debug, sqlx::FromRow)]
struct StaffRow {
    id: i32,
    name: String,
    email: String,
    role: String,
    department: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StaffRow> for StaffMember {
    type Error = RepositoryError;

    fn try_from(row: StaffRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: StaffRole = row.role.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        Ok(Self {
            id: StaffId::new(row.id),
            name: row.name,
            email,
            role,
            department: row.department,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const STAFF_COLUMNS: &str = "id, name, email, role, department, created_at, updated_at";

/// Repository for staff member database operations.
pub struct StaffRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StaffRepository<'a> {
    /// Create a new staff repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List staff members, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` for unreadable rows.
    pub async fn list(&self) -> Result<Vec<StaffMember>, RepositoryError> {
        let sql = format!(
            "SELECT {STAFF_COLUMNS} FROM admin.staff_member ORDER BY created_at DESC"
        );

        let rows = sqlx::query_as::<_, StaffRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a staff member by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: StaffId) -> Result<Option<StaffMember>, RepositoryError> {
        let sql = format!("SELECT {STAFF_COLUMNS} FROM admin.staff_member WHERE id = $1");

        let row = sqlx::query_as::<_, StaffRow>(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new staff member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &StaffInput) -> Result<StaffMember, RepositoryError> {
        let sql = format!(
            "INSERT INTO admin.staff_member (name, email, role, department)
             VALUES ($1, $2, $3, $4)
             RETURNING {STAFF_COLUMNS}"
        );

        let row = sqlx::query_as::<_, StaffRow>(&sql)
            .bind(&input.name)
            .bind(input.email.as_str())
            .bind(input.role.as_str())
            .bind(&input.department)
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    /// Update an existing staff member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no staff member has the given ID.
    pub async fn update(
        &self,
        id: StaffId,
        input: &StaffInput,
    ) -> Result<StaffMember, RepositoryError> {
        let sql = format!(
            "UPDATE admin.staff_member
             SET name = $2, email = $3, role = $4, department = $5, updated_at = now()
             WHERE id = $1
             RETURNING {STAFF_COLUMNS}"
        );

        let row = sqlx::query_as::<_, StaffRow>(&sql)
            .bind(id.as_i32())
            .bind(&input.name)
            .bind(input.email.as_str())
            .bind(input.role.as_str())
            .bind(&input.department)
            .fetch_optional(self.pool)
            .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a staff member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no staff member has the given ID.
    pub async fn delete(&self, id: StaffId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admin.staff_member WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
