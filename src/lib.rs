// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod classifier;
pub mod config;
pub mod error;
pub mod exporter;
pub mod manifest;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod scan;
pub mod utils;

pub use classifier::{
    BasenameClassifier, FilenameClassifier, LegacyBaseDecoder, LegacyOptions, ProjectClassifier,
    classifier_for,
};
pub use crate::config::{IngestConfig, OutputConfig, ScanConfig};
pub use error::{IngestError, Result, SchemaDrift};
pub use exporter::{ExportManifest, JsonExporter};
pub use manifest::{ManifestEntry, ManifestOutcome, ManifestParser};
pub use models::{
    ArtifactClass, ArtifactRecord, Classification, FieldValue, Issue, IssueKind, ManifestRecord,
    Project,
};
pub use pipeline::{IngestReport, IngestRun, PipelineStats, ProgressTracker};
pub use registry::{Pattern, PatternRegistry};
pub use scan::{DeliverableScanner, ScannedFile};
pub use utils::Validator;
