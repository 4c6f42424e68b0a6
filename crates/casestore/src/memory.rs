//! In-memory case store (for testing and demos)

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use casefile::CaseEnvelope;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::storage::{decode_row, encode_for_put, CaseStore, Result, StoreError, StoredCase};

#[derive(Clone)]
struct Slot {
    state: String,
    updated_at: DateTime<Utc>,
    seq: u64,
}

#[derive(Default)]
struct Inner {
    rows: HashMap<String, Slot>,
    next_seq: u64,
}

/// Holds serialized envelopes, so reads go through the same validation as
/// the SQLite store and callers never alias stored state.
#[derive(Clone, Default)]
pub struct InMemoryCaseStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl CaseStore for InMemoryCaseStore {
    async fn put(&self, case_id: &str, envelope: &CaseEnvelope) -> Result<()> {
        let state = encode_for_put(case_id, envelope)?;
        let mut guard = self.inner.write().map_err(poisoned)?;
        let seq = guard.next_seq;
        guard.next_seq += 1;
        guard.rows.insert(
            case_id.to_string(),
            Slot {
                state,
                updated_at: Utc::now(),
                seq,
            },
        );
        Ok(())
    }

    async fn get(&self, case_id: &str) -> Result<Option<CaseEnvelope>> {
        let slot = {
            let guard = self.inner.read().map_err(poisoned)?;
            guard.rows.get(case_id).cloned()
        };
        match slot {
            Some(s) => Ok(Some(decode_row(case_id, &s.state)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, case_id: &str) -> Result<bool> {
        let mut guard = self.inner.write().map_err(poisoned)?;
        Ok(guard.rows.remove(case_id).is_some())
    }

    async fn list(&self) -> Result<Vec<StoredCase>> {
        let mut slots: Vec<(String, Slot)> = {
            let guard = self.inner.read().map_err(poisoned)?;
            guard
                .rows
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        };
        slots.sort_by(|a, b| {
            (b.1.updated_at, b.1.seq).cmp(&(a.1.updated_at, a.1.seq))
        });

        let mut out = Vec::with_capacity(slots.len());
        for (case_id, slot) in slots {
            match decode_row(&case_id, &slot.state) {
                Ok(envelope) => out.push(StoredCase {
                    envelope,
                    updated_at: slot.updated_at,
                }),
                Err(e) => warn!(case_id = %case_id, "skipping unreadable case: {e}"),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casefile::testing::sample_case;

    #[tokio::test]
    async fn test_corrupt_slot_skipped() {
        let store = InMemoryCaseStore::new();
        let env = CaseEnvelope::seal(sample_case("CASE-good")).unwrap();
        store.put("CASE-good", &env).await.unwrap();

        {
            let mut guard = store.inner.write().unwrap();
            let seq = guard.next_seq;
            guard.next_seq += 1;
            guard.rows.insert(
                "CASE-bad".to_string(),
                Slot {
                    state: "{oops".to_string(),
                    updated_at: Utc::now(),
                    seq,
                },
            );
        }

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].case_id(), "CASE-good");

        let err = store.get("CASE-bad").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref case_id, .. } if case_id == "CASE-bad"));
    }
}
