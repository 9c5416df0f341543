// file: src/exporter/json.rs
// description: json export of classified records and ingest issues
// reference: https://docs.rs/serde_json

use crate::error::Result;
use crate::manifest::ManifestOutcome;
use crate::models::{ArtifactRecord, Issue, ManifestRecord};
use crate::pipeline::{IngestReport, PipelineStats};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const RECORDS_FILE: &str = "records.json";
const DELIVERABLES_FILE: &str = "deliverables.json";
const ISSUES_FILE: &str = "issues.json";
const MANIFEST_FILE: &str = "export_manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_records: usize,
    pub total_deliverables: usize,
    pub total_issues: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<PipelineStats>,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn export_outcome(&self, outcome: &ManifestOutcome, pretty: bool) -> Result<ExportManifest> {
        let records: Vec<&ManifestRecord> = outcome.records.iter().collect();
        let issues: Vec<&Issue> = outcome.issues.iter().collect();
        self.export(&records, &[], &issues, None, pretty)
    }

    pub fn export_report(&self, report: &IngestReport, pretty: bool) -> Result<ExportManifest> {
        let records: Vec<&ManifestRecord> = report.records().collect();
        let deliverables: Vec<&ArtifactRecord> = report.deliverables.iter().collect();
        let issues: Vec<&Issue> = report.issues().collect();
        self.export(
            &records,
            &deliverables,
            &issues,
            Some(report.stats.clone()),
            pretty,
        )
    }

    fn export(
        &self,
        records: &[&ManifestRecord],
        deliverables: &[&ArtifactRecord],
        issues: &[&Issue],
        stats: Option<PipelineStats>,
        pretty: bool,
    ) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let mut files = vec![
            self.write_json(RECORDS_FILE, &records, pretty)?,
            self.write_json(ISSUES_FILE, &issues, pretty)?,
        ];
        if !deliverables.is_empty() {
            files.push(self.write_json(DELIVERABLES_FILE, &deliverables, pretty)?);
        }

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_records: records.len(),
            total_deliverables: deliverables.len(),
            total_issues: issues.len(),
            stats,
            files,
        };
        self.write_json(MANIFEST_FILE, &manifest, pretty)?;

        info!(
            "Export complete: {} records, {} issues",
            manifest.total_records, manifest.total_issues
        );
        Ok(manifest)
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        fs::write(self.output_dir.join(name), json)?;
        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FilenameClassifier;
    use crate::manifest::ManifestParser;
    use crate::models::Project;
    use crate::registry::PatternRegistry;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("nested/out"));
        assert!(exporter.is_ok());
        assert!(dir.path().join("nested/out").is_dir());
    }

    #[test]
    fn test_export_outcome_writes_files() {
        let registry = PatternRegistry::builtin().unwrap();
        let classifier = FilenameClassifier::new(&registry)
            .for_project(Project::Ipm)
            .unwrap();
        let manifest = format!(
            "{}  run/605590_IPM_BRF_PAW12345_ONTPromethION_report.html\n{}  run/unknown.bin\n",
            "0".repeat(32),
            "1".repeat(32)
        );
        let outcome = ManifestParser::new(&classifier)
            .parse_reader(Path::new("run.md5"), Cursor::new(manifest))
            .unwrap();

        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let manifest = exporter.export_outcome(&outcome, false).unwrap();

        assert_eq!(manifest.total_records, 1);
        assert_eq!(manifest.total_issues, 1);
        assert_eq!(manifest.files, vec![RECORDS_FILE, ISSUES_FILE]);

        let issues: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(ISSUES_FILE)).unwrap())
                .unwrap();
        assert_eq!(issues[0]["kind"], "unclassified");

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap())
                .unwrap();
        assert_eq!(written["total_issues"], 1);
        assert!(written.get("stats").is_none());
    }
}
