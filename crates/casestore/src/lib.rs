//! Case persistence: one full-state envelope per case id.

mod storage;
mod memory;
mod sqlite;

pub use storage::{CaseStore, StoreError, StoredCase, Result};
pub use memory::InMemoryCaseStore;
pub use sqlite::SqliteCaseStore;
