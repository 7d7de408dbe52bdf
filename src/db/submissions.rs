use sqlx::PgPool;

use crate::models::{NewSubmission, Submission};

pub async fn create(pool: &PgPool, new: &NewSubmission) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "INSERT INTO form_submissions
           (name, phone, address, city, state, zip_code,
            type_of_place, retention_days, status, notes, latitude, longitude)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(&new.name)
    .bind(&new.phone)
    .bind(&new.address)
    .bind(&new.city)
    .bind(&new.state)
    .bind(&new.zip_code)
    .bind(&new.type_of_place)
    .bind(&new.retention_days)
    .bind(&new.status)
    .bind(&new.notes)
    .bind(new.latitude)
    .bind(new.longitude)
    .fetch_one(pool)
    .await
}

/// The dashboard's initial bulk read: every submission, newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "SELECT * FROM form_submissions ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}
