//! Storage trait and shared types

use async_trait::async_trait;
use casefile::{CaseEnvelope, EnvelopeError};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Ser(String),

    #[error("Stored case {case_id} is corrupt: {reason}")]
    Corrupt { case_id: String, reason: String },

    #[error("Envelope holds case {found}, refusing to store it under {expected}")]
    IdMismatch { expected: String, found: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::Migration(e.to_string())
    }
}

impl From<EnvelopeError> for StoreError {
    fn from(e: EnvelopeError) -> Self {
        StoreError::Ser(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// One row of a listing.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredCase {
    pub envelope: CaseEnvelope,
    pub updated_at: DateTime<Utc>,
}

impl StoredCase {
    pub fn case_id(&self) -> &str {
        self.envelope.case_id()
    }
}

/// Full-state key-value store for cases.
///
/// Every call is self-contained: `put` replaces the whole envelope, so there
/// is no multi-step locking. Returned envelopes are owned copies.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Insert or overwrite.
    async fn put(&self, case_id: &str, envelope: &CaseEnvelope) -> Result<()>;

    /// `Ok(None)` when no case has this id.
    async fn get(&self, case_id: &str) -> Result<Option<CaseEnvelope>>;

    /// Idempotent. Returns whether a row was removed.
    async fn delete(&self, case_id: &str) -> Result<bool>;

    /// All readable cases, most recently updated first.
    async fn list(&self) -> Result<Vec<StoredCase>>;
}

/// Checks shared by every backend before a write.
pub(crate) fn encode_for_put(case_id: &str, envelope: &CaseEnvelope) -> Result<String> {
    if envelope.case_id() != case_id {
        return Err(StoreError::IdMismatch {
            expected: case_id.to_string(),
            found: envelope.case_id().to_string(),
        });
    }
    envelope.verify()?;
    Ok(envelope.to_json()?)
}

pub(crate) fn decode_row(case_id: &str, state: &str) -> Result<CaseEnvelope> {
    CaseEnvelope::from_json(state).map_err(|e| StoreError::Corrupt {
        case_id: case_id.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn millis_to_utc(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default()
}
