use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::{ModelManager, Result, Store};

// ###################################
// ->   STRUCTS
// ###################################
/// A captured email. Never updated, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Lead {
    pub id: i64,
    pub gmail: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum CaptureOutcome {
    Created(Lead),
    /// A lead with exactly this email was already stored. Nothing was written.
    Duplicate,
}

/// Backend model controller for `leads`.
pub struct LeadBmc;

impl LeadBmc {
    /// Stores the email unless it is already on file, compared exactly as written.
    /// The uniqueness check and the write happen in the store as one operation.
    pub async fn capture(mm: &ModelManager, gmail: &str) -> Result<CaptureOutcome> {
        match &mm.store {
            Store::Postgres(pool) => {
                let query_result = sqlx::query_as::<_, Lead>(
                    r#"
                    INSERT INTO leads (gmail)
                    VALUES ($1)
                    RETURNING id, gmail, created_at
                    "#,
                )
                .bind(gmail)
                .fetch_one(pool)
                .await;

                match query_result {
                    Ok(lead) => Ok(CaptureOutcome::Created(lead)),
                    // The email is already stored, this is not an error.
                    Err(er) if is_unique_violation(&er) => Ok(CaptureOutcome::Duplicate),
                    Err(er) => Err(er.into()),
                }
            }
            Store::Memory(store) => {
                let mut store = store.lock().await;
                let outcome = store
                    .insert_if_absent(gmail)
                    .map_or(CaptureOutcome::Duplicate, CaptureOutcome::Created);
                Ok(outcome)
            }
        }
    }

    /// All leads, most recent first.
    pub async fn list(mm: &ModelManager) -> Result<Vec<Lead>> {
        match &mm.store {
            Store::Postgres(pool) => {
                let leads = sqlx::query_as::<_, Lead>(
                    r#"
                    SELECT id, gmail, created_at
                    FROM leads
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .fetch_all(pool)
                .await?;
                Ok(leads)
            }
            Store::Memory(store) => Ok(store.lock().await.newest_first()),
        }
    }
}

// ###################################
// ->   HELPERS
// ###################################
/// Checks whether the query failed because of the `UNIQUE` constraint on `leads.gmail`.
fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(er) => er.is_unique_violation(),
        _ => false,
    }
}
