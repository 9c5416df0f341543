// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod artifact;
pub mod field;
pub mod issue;
pub mod manifest;
pub mod project;

pub use artifact::{ArtifactRecord, Classification, FieldMap, Miss};
pub use field::{Facility, FieldSpec, FieldType, FieldValue, ReadTag};
pub use issue::{Issue, IssueKind, IssueLocation, IssueSink, TracingSink};
pub use manifest::ManifestRecord;
pub use project::{ArtifactClass, Project};
