// file: src/models/issue.rs
// description: structured issue channel for skipped manifest lines and files
// reference: issues are data carried next to records, sinks decide where they go

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Malformed,
    Unclassified,
    SchemaDrift,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Malformed => "malformed",
            IssueKind::Unclassified => "unclassified",
            IssueKind::SchemaDrift => "schema_drift",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueLocation {
    /// 1-based line number within a manifest.
    ManifestLine { manifest: PathBuf, line: usize },
    Artifact { filename: String },
}

impl fmt::Display for IssueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueLocation::ManifestLine { manifest, line } => {
                write!(f, "{}:{}", manifest.display(), line)
            }
            IssueLocation::Artifact { filename } => f.write_str(filename),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub location: IssueLocation,
    /// Basename the issue concerns, when one could be determined.
    pub basename: Option<String>,
    pub message: String,
}

impl Issue {
    pub fn at_line(
        kind: IssueKind,
        manifest: impl Into<PathBuf>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            location: IssueLocation::ManifestLine {
                manifest: manifest.into(),
                line,
            },
            basename: None,
            message: message.into(),
        }
    }

    pub fn for_artifact(kind: IssueKind, filename: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: IssueLocation::Artifact {
                filename: filename.to_string(),
            },
            basename: Some(filename.to_string()),
            message: message.into(),
        }
    }

    pub fn with_basename(mut self, basename: &str) -> Self {
        self.basename = Some(basename.to_string());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.as_str(), self.location, self.message)
    }
}

/// Destination for issues. The core never logs them itself.
pub trait IssueSink {
    fn report(&mut self, issue: &Issue);
}

impl IssueSink for Vec<Issue> {
    fn report(&mut self, issue: &Issue) {
        self.push(issue.clone());
    }
}

/// Forwards issues to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl IssueSink for TracingSink {
    fn report(&mut self, issue: &Issue) {
        warn!(kind = issue.kind.as_str(), "{}", issue);
    }
}
