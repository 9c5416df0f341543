// file: src/models/artifact.rs
// description: classification results for a single deliverable basename
// reference: internal data structures

use crate::models::field::FieldValue;
use crate::models::project::{ArtifactClass, Project};
use serde::Serialize;
use std::collections::BTreeMap;

/// Captured fields keyed by schema name. `None` marks an optional group that
/// did not take part in the match, which is distinct from an empty capture.
pub type FieldMap = BTreeMap<String, Option<FieldValue>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRecord {
    pub project: Project,
    pub artifact_class: ArtifactClass,
    pub filename: String,
    pub fields: FieldMap,
    pub priority: u16,
}

impl ArtifactRecord {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).and_then(Option::as_ref)
    }

    /// Display form of a present field, e.g. `L007` for a lane.
    pub fn value(&self, name: &str) -> Option<String> {
        self.field(name).map(ToString::to_string)
    }

    /// True when the schema lists `name` but its group did not participate.
    pub fn is_absent(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(None))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Miss {
    pub project: Project,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Classification {
    Matched(ArtifactRecord),
    Miss(Miss),
}

impl Classification {
    pub fn record(&self) -> Option<&ArtifactRecord> {
        match self {
            Classification::Matched(record) => Some(record),
            Classification::Miss(_) => None,
        }
    }

    pub fn artifact_class(&self) -> Option<ArtifactClass> {
        self.record().map(|r| r.artifact_class)
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Classification::Miss(_))
    }
}
