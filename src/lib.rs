// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod sources;
pub mod transform;

// ---- Re-exports for stable public API ----
pub use crate::fetch::config::{load_config_default, load_config_from, FetchConfig};
pub use crate::fetch::types::{FetchError, FetchResult, SourceFetcher, SourcePayload};
pub use crate::pipeline::{run_pipeline, run_pipeline_with_config, run_with_fetchers};
pub use crate::sources::Source;
pub use crate::transform::{CanonicalRecord, RecordData};
