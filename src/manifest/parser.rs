// file: src/manifest/parser.rs
// description: streaming md5 manifest parser producing classified records and issues
// reference: line-at-a-time fold over a buffered reader

use crate::classifier::BasenameClassifier;
use crate::error::{IngestError, Result};
use crate::manifest::line::{ManifestLine, basename, parse_line};
use crate::models::{Classification, Issue, IssueKind, IssueSink, ManifestRecord};
use serde::Serialize;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    Record(ManifestRecord),
    Issue(Issue),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ManifestOutcome {
    pub manifest: PathBuf,
    pub records: Vec<ManifestRecord>,
    pub issues: Vec<Issue>,
}

impl ManifestOutcome {
    pub fn report_issues(&self, sink: &mut dyn IssueSink) {
        for issue in &self.issues {
            sink.report(issue);
        }
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

pub struct ManifestParser<'c> {
    classifier: &'c dyn BasenameClassifier,
}

impl<'c> ManifestParser<'c> {
    pub fn new(classifier: &'c dyn BasenameClassifier) -> Self {
        Self { classifier }
    }

    /// Only failure to open or read the file is an error; every per-line
    /// problem becomes an issue.
    pub fn parse(&self, manifest_path: &Path) -> Result<ManifestOutcome> {
        let file = File::open(manifest_path).map_err(|source| IngestError::FileOperation {
            path: manifest_path.to_path_buf(),
            source,
        })?;
        let outcome = self.parse_reader(manifest_path, BufReader::new(file))?;

        info!(
            "Parsed {}: {} records, {} issues",
            manifest_path.display(),
            outcome.records.len(),
            outcome.issues.len()
        );
        Ok(outcome)
    }

    pub fn parse_reader<R: BufRead>(&self, source: &Path, reader: R) -> Result<ManifestOutcome> {
        let mut outcome = ManifestOutcome {
            manifest: source.to_path_buf(),
            ..Default::default()
        };

        for entry in self.entries(source, reader) {
            match entry? {
                ManifestEntry::Record(record) => outcome.records.push(record),
                ManifestEntry::Issue(issue) => outcome.issues.push(issue),
            }
        }

        Ok(outcome)
    }

    /// Lazily yields records and issues in manifest order. Dropping the
    /// iterator releases the reader.
    pub fn entries<R: BufRead>(&self, source: &Path, reader: R) -> ManifestEntries<'c, R> {
        ManifestEntries {
            classifier: self.classifier,
            source: source.to_path_buf(),
            reader,
            buf: Vec::new(),
            line_no: 0,
            pending: VecDeque::new(),
            done: false,
        }
    }
}

pub struct ManifestEntries<'c, R> {
    classifier: &'c dyn BasenameClassifier,
    source: PathBuf,
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    pending: VecDeque<ManifestEntry>,
    done: bool,
}

impl<R: BufRead> Iterator for ManifestEntries<'_, R> {
    type Item = Result<ManifestEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.pending.pop_front() {
                return Some(Ok(entry));
            }
            if self.done {
                return None;
            }

            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    self.line_no += 1;
                    self.process_line();
                }
                Err(source) => {
                    self.done = true;
                    return Some(Err(IngestError::FileOperation {
                        path: self.source.clone(),
                        source,
                    }));
                }
            }
        }
    }
}

impl<R> ManifestEntries<'_, R> {
    fn process_line(&mut self) {
        let line_no = self.line_no;
        let Ok(text) = std::str::from_utf8(&self.buf) else {
            let issue = self.issue(IssueKind::Malformed, "line is not valid UTF-8");
            self.pending.push_back(ManifestEntry::Issue(issue));
            return;
        };

        let (md5, path) = match parse_line(text) {
            ManifestLine::Skip => return,
            ManifestLine::Malformed(reason) => {
                debug!("{}:{} malformed: {}", self.source.display(), line_no, reason);
                let issue = self.issue(IssueKind::Malformed, reason);
                self.pending.push_back(ManifestEntry::Issue(issue));
                return;
            }
            ManifestLine::Entry { md5, path } => (md5, path.to_string()),
        };

        let name = basename(&path).to_string();
        match self.classifier.classify_basename(&name) {
            Ok(Classification::Matched(artifact)) => {
                let note = self.classifier.review(&name, &artifact);
                self.pending.push_back(ManifestEntry::Record(ManifestRecord {
                    md5,
                    path,
                    basename: name.clone(),
                    line: line_no,
                    artifact,
                }));
                if let Some(note) = note {
                    let issue = self.issue(IssueKind::SchemaDrift, note).with_basename(&name);
                    self.pending.push_back(ManifestEntry::Issue(issue));
                }
            }
            Ok(Classification::Miss(miss)) => {
                debug!("{}:{} unclassified: {}", self.source.display(), line_no, name);
                let issue = self
                    .issue(
                        IssueKind::Unclassified,
                        format!("no {} pattern matches {}", miss.project, name),
                    )
                    .with_basename(&name);
                self.pending.push_back(ManifestEntry::Issue(issue));
            }
            Err(drift) => {
                let issue = self
                    .issue(IssueKind::SchemaDrift, drift.to_string())
                    .with_basename(&name);
                self.pending.push_back(ManifestEntry::Issue(issue));
            }
        }
    }

    fn issue(&self, kind: IssueKind, message: impl Into<String>) -> Issue {
        Issue::at_line(kind, self.source.clone(), self.line_no, message)
    }
}
