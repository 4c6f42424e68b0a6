//! Case aggregate types and their versioned persisted envelope.

pub mod schema;
pub mod envelope;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use schema::*;
pub use envelope::*;

pub type Hash32 = [u8; 32];
