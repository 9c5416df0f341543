// file: src/pipeline/ingest.rs
// description: scans a delivery directory, parses its manifests and classifies loose files
// reference: drives scanner, manifest parser and classifier, collecting issues as data

use crate::classifier::BasenameClassifier;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::manifest::{ManifestOutcome, ManifestParser};
use crate::models::{ArtifactRecord, Classification, Issue, IssueKind, IssueSink, ManifestRecord};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::scan::{DeliverableScanner, ScannedFile};
use crate::utils::Validator;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Clone, Serialize)]
pub struct FailedManifest {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub root: PathBuf,
    pub manifests: Vec<ManifestOutcome>,
    pub failed_manifests: Vec<FailedManifest>,
    /// Files found on disk, classified by basename.
    pub deliverables: Vec<ArtifactRecord>,
    /// Issues raised while classifying files on disk.
    pub file_issues: Vec<Issue>,
    pub stats: PipelineStats,
}

impl IngestReport {
    pub fn records(&self) -> impl Iterator<Item = &ManifestRecord> {
        self.manifests.iter().flat_map(|m| m.records.iter())
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.manifests
            .iter()
            .flat_map(|m| m.issues.iter())
            .chain(self.file_issues.iter())
    }

    pub fn report_issues(&self, sink: &mut dyn IssueSink) {
        for issue in self.issues() {
            sink.report(issue);
        }
    }
}

pub struct IngestRun<'c> {
    classifier: &'c dyn BasenameClassifier,
    scanner: DeliverableScanner,
    show_progress: bool,
    colored: bool,
}

impl<'c> IngestRun<'c> {
    pub fn new(classifier: &'c dyn BasenameClassifier, scan: ScanConfig) -> Self {
        Self {
            classifier,
            scanner: DeliverableScanner::new(scan),
            show_progress: false,
            colored: false,
        }
    }

    pub fn with_progress(mut self, colored: bool) -> Self {
        self.show_progress = true;
        self.colored = colored;
        self
    }

    pub fn run(&self, root: &Path) -> Result<IngestReport> {
        Validator::validate_directory(root)?;
        info!(
            "Starting {} ingest of {}",
            self.classifier.project(),
            root.display()
        );

        let scanned = self.scanner.scan_directory(root)?;
        let total = scanned.manifests.len()
            + scanned.unreadable_manifests.len()
            + scanned.deliverables.len();
        let tracker = if self.show_progress {
            ProgressTracker::with_color(total, self.colored)
        } else {
            ProgressTracker::hidden(total)
        };

        let parser = ManifestParser::new(self.classifier);
        let mut report = IngestReport {
            root: root.to_path_buf(),
            manifests: Vec::new(),
            failed_manifests: Vec::new(),
            deliverables: Vec::new(),
            file_issues: Vec::new(),
            stats: PipelineStats::new(),
        };

        for manifest in &scanned.manifests {
            tracker.set_message(manifest.relative_path.clone());
            match parser.parse(&manifest.path) {
                Ok(outcome) => {
                    tracker.inc_manifests_processed(outcome.records.len(), outcome.issues.len());
                    report.manifests.push(outcome);
                }
                Err(e) => {
                    error!("Failed to read manifest {}: {}", manifest.relative_path, e);
                    tracker.inc_manifests_failed();
                    report.failed_manifests.push(FailedManifest {
                        path: manifest.path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        for entry in &scanned.unreadable_manifests {
            error!("Failed to read manifest {}: {}", entry.relative_path, entry.error);
            tracker.inc_manifests_failed();
            report.failed_manifests.push(FailedManifest {
                path: entry.path.clone(),
                error: entry.error.clone(),
            });
        }

        for file in &scanned.deliverables {
            let issue = self.classify_file(file, &mut report.deliverables);
            tracker.inc_files_classified(usize::from(issue.is_some()));
            report.file_issues.extend(issue);
        }

        tracker.finish();
        report.stats = tracker.get_stats();

        info!(
            "Ingest complete: {} records, {} deliverables, {} issues",
            report.stats.records_emitted,
            report.deliverables.len(),
            report.stats.issues_reported
        );
        Ok(report)
    }

    fn classify_file(&self, file: &ScannedFile, records: &mut Vec<ArtifactRecord>) -> Option<Issue> {
        let name = file.file_name();

        match self.classifier.classify_basename(name) {
            Ok(Classification::Matched(record)) => {
                let note = self.classifier.review(name, &record);
                records.push(record);
                note.map(|note| {
                    Issue::for_artifact(IssueKind::SchemaDrift, &file.relative_path, note)
                        .with_basename(name)
                })
            }
            Ok(Classification::Miss(miss)) => Some(
                Issue::for_artifact(
                    IssueKind::Unclassified,
                    &file.relative_path,
                    format!("no {} pattern matches {}", miss.project, name),
                )
                .with_basename(name),
            ),
            Err(drift) => Some(
                Issue::for_artifact(IssueKind::SchemaDrift, &file.relative_path, drift.to_string())
                    .with_basename(name),
            ),
        }
    }
}
