// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod ingest;
mod progress;

pub use ingest::{FailedManifest, IngestReport, IngestRun};
pub use progress::{PipelineStats, ProgressTracker};
