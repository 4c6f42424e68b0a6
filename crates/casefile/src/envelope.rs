//! Versioned persisted form of a case.
//!
//! The store never writes a bare aggregate. It writes an envelope carrying the
//! schema version and a BLAKE3 digest of the aggregate's JSON, and refuses to
//! hand back anything that fails either check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Case, CaseMemory, Hash32};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Serialization error: {0}")]
    Ser(String),

    #[error("Unsupported schema version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("Digest mismatch for case {case_id}")]
    Digest { case_id: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseEnvelope {
    pub schema_version: u32,
    pub case: Case,
    pub memory: CaseMemory,
    /// hex(BLAKE3(json(case)))
    pub digest: String,
}

impl CaseEnvelope {
    /// Wrap a case, deriving its memory view and digest.
    pub fn seal(case: Case) -> Result<Self, EnvelopeError> {
        let digest = hex::encode(case_digest(&case)?);
        let memory = CaseMemory::from_case(&case);
        Ok(Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            case,
            memory,
            digest,
        })
    }

    pub fn case_id(&self) -> &str {
        &self.case.case_id
    }

    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        serde_json::to_string(self).map_err(|e| EnvelopeError::Ser(e.to_string()))
    }

    /// Parse and validate persisted text.
    pub fn from_json(text: &str) -> Result<Self, EnvelopeError> {
        let env: CaseEnvelope =
            serde_json::from_str(text).map_err(|e| EnvelopeError::Ser(e.to_string()))?;
        env.verify()?;
        Ok(env)
    }

    pub fn verify(&self) -> Result<(), EnvelopeError> {
        if self.schema_version != CURRENT_SCHEMA_VERSION {
            return Err(EnvelopeError::Version {
                found: self.schema_version,
                expected: CURRENT_SCHEMA_VERSION,
            });
        }
        let expected = hex::encode(case_digest(&self.case)?);
        if expected != self.digest {
            return Err(EnvelopeError::Digest {
                case_id: self.case.case_id.clone(),
            });
        }
        Ok(())
    }
}

pub fn case_digest(case: &Case) -> Result<Hash32, EnvelopeError> {
    let bytes = serde_json::to_vec(case).map_err(|e| EnvelopeError::Ser(e.to_string()))?;
    Ok(blake3::hash(&bytes).into())
}
