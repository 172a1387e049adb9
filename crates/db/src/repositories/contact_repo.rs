//! Repository for the append-only `contact_submissions` table.

use sqlx::PgPool;

use crate::models::contact::{ContactSubmission, CreateContactSubmission};

const COLUMNS: &str = "id, name, email, message, created_at";

pub struct ContactRepo;

impl ContactRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactSubmission,
    ) -> Result<ContactSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_submissions (name, email, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// All submissions, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContactSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_submissions ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .fetch_all(pool)
            .await
    }
}
