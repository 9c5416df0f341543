// file: src/models/manifest.rs
// description: classified manifest entries
// reference: internal data structures

use crate::models::artifact::ArtifactRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRecord {
    /// Lowercase 32-character hex digest.
    pub md5: String,
    /// Relative path exactly as the manifest wrote it.
    pub path: String,
    pub basename: String,
    pub line: usize,
    pub artifact: ArtifactRecord,
}
