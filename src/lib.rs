// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod api;
pub mod metrics;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::types::{
    NormalizedEntry, SourceErrorKind, SourceKind, SourceResult, SourceSpec,
};
pub use crate::api::{create_router, AppState};
