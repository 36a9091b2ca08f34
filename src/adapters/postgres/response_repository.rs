//! PostgreSQL implementation of ResponseRepository.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE responses (
//!     id           UUID PRIMARY KEY,
//!     form_id      UUID NOT NULL REFERENCES forms(id),
//!     answers      JSONB NOT NULL,
//!     submitted_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE INDEX responses_form_id_idx ON responses (form_id, submitted_at);
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, FormId, ResponseId, Timestamp};
use crate::domain::form::AnswerMap;
use crate::domain::response::Response;
use crate::ports::ResponseRepository;

/// PostgreSQL implementation of ResponseRepository.
#[derive(Clone)]
pub struct PostgresResponseRepository {
    pool: PgPool,
}

impl PostgresResponseRepository {
    /// Creates a new PostgresResponseRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseRepository for PostgresResponseRepository {
    async fn save(&self, response: &Response) -> Result<(), DomainError> {
        let answers = serde_json::to_value(response.answers()).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize answers: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO responses (id, form_id, answers, submitted_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(response.id().as_uuid())
        .bind(response.form_id().as_uuid())
        .bind(answers)
        .bind(response.submitted_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert response: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ResponseId) -> Result<Option<Response>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, form_id, answers, submitted_at
            FROM responses
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch response: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_response(row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_form(&self, form_id: &FormId) -> Result<Vec<Response>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, form_id, answers, submitted_at
            FROM responses
            WHERE form_id = $1
            ORDER BY submitted_at ASC
            "#,
        )
        .bind(form_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list responses: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_response).collect()
    }

    async fn count_by_form(&self, form_id: &FormId) -> Result<u64, DomainError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM responses WHERE form_id = $1")
            .bind(form_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to count responses: {}", e),
                )
            })?;

        Ok(count.0 as u64)
    }
}

fn row_to_response(row: sqlx::postgres::PgRow) -> Result<Response, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| column_error("id", e))?;
    let form_id: uuid::Uuid = row
        .try_get("form_id")
        .map_err(|e| column_error("form_id", e))?;
    let answers: serde_json::Value = row
        .try_get("answers")
        .map_err(|e| column_error("answers", e))?;
    let submitted_at: DateTime<Utc> = row
        .try_get("submitted_at")
        .map_err(|e| column_error("submitted_at", e))?;

    let answers: AnswerMap = serde_json::from_value(answers).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to deserialize answers: {}", e),
        )
    })?;

    Ok(Response::reconstitute(
        ResponseId::from_uuid(id),
        FormId::from_uuid(form_id),
        answers,
        Timestamp::from_datetime(submitted_at),
    ))
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read column '{}': {}", column, e),
    )
}
