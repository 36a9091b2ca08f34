//! PostgreSQL implementation of FormRepository.
//!
//! The ordered field sequence is stored as a JSONB column, so a form row is
//! always written and read as a whole aggregate.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE forms (
//!     id         UUID PRIMARY KEY,
//!     owner_id   TEXT NOT NULL,
//!     title      TEXT NOT NULL,
//!     status     TEXT NOT NULL,
//!     fields     JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, FormId, FormStatus, Timestamp, UserId,
};
use crate::domain::form::{Field, Form};
use crate::ports::FormRepository;

/// PostgreSQL implementation of FormRepository.
#[derive(Clone)]
pub struct PostgresFormRepository {
    pool: PgPool,
}

impl PostgresFormRepository {
    /// Creates a new PostgresFormRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormRepository for PostgresFormRepository {
    async fn save(&self, form: &Form) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO forms (
                id, owner_id, title, status, fields, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(form.id().as_uuid())
        .bind(form.owner_id().as_str())
        .bind(form.title())
        .bind(form.status().as_str())
        .bind(fields_to_json(form.fields())?)
        .bind(form.created_at().as_datetime())
        .bind(form.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert form: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, form: &Form) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE forms SET
                title = $2,
                status = $3,
                fields = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(form.id().as_uuid())
        .bind(form.title())
        .bind(form.status().as_str())
        .bind(fields_to_json(form.fields())?)
        .bind(form.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update form: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::FormNotFound,
                format!("Form not found: {}", form.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &FormId) -> Result<Option<Form>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, title, status, fields, created_at, updated_at
            FROM forms
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch form: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_form(row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Form>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, status, fields, created_at, updated_at
            FROM forms
            WHERE owner_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list forms: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_form).collect()
    }

    async fn delete(&self, id: &FormId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete form: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::FormNotFound,
                format!("Form not found: {}", id),
            ));
        }

        Ok(())
    }
}

fn fields_to_json(fields: &[Field]) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(fields).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to serialize fields: {}", e),
        )
    })
}

fn row_to_form(row: sqlx::postgres::PgRow) -> Result<Form, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| column_error("id", e))?;
    let owner_id: String = row
        .try_get("owner_id")
        .map_err(|e| column_error("owner_id", e))?;
    let title: String = row
        .try_get("title")
        .map_err(|e| column_error("title", e))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| column_error("status", e))?;
    let fields: serde_json::Value = row
        .try_get("fields")
        .map_err(|e| column_error("fields", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| column_error("updated_at", e))?;

    let owner_id = UserId::new(owner_id).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Corrupt owner_id column: {}", e),
        )
    })?;
    let status = FormStatus::parse(&status).ok_or_else(|| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Unknown form status '{}'", status),
        )
    })?;
    let fields: Vec<Field> = serde_json::from_value(fields).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to deserialize fields: {}", e),
        )
    })?;

    Ok(Form::reconstitute(
        FormId::from_uuid(id),
        owner_id,
        title,
        status,
        fields,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read column '{}': {}", column, e),
    )
}
