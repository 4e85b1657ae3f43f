// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod criteria;
pub mod dataset;
pub mod geojson;
pub mod metrics;
pub mod score;
pub mod store;
pub mod weights;

// ---- Re-exports for stable public API ----
// Convenient router access: `crate_root::api::router` as well as `crate_root::router`
pub use crate::api::{router, AppState};
pub use crate::score::rescore;
pub use crate::weights::WeightVector;
