// file: src/scan/scanner.rs
// description: Directory walking that separates md5 manifests from deliverables
// reference: https://docs.rs/walkdir

use crate::config::ScanConfig;
use crate::error::{IngestError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub struct DeliverableScanner {
    config: ScanConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Relative to the scan root, always `/`-separated.
    pub relative_path: String,
    pub size: u64,
}

impl ScannedFile {
    pub fn file_name(&self) -> &str {
        crate::manifest::basename(&self.relative_path)
    }
}

/// A manifest-named entry the walk could not stat, e.g. a dangling symlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableEntry {
    pub path: PathBuf,
    pub relative_path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub manifests: Vec<ScannedFile>,
    pub deliverables: Vec<ScannedFile>,
    pub unreadable_manifests: Vec<UnreadableEntry>,
}

impl DeliverableScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn scan_directory(&self, root: &Path) -> Result<ScanResult> {
        info!("Scanning directory: {}", root.display());
        let mut result = ScanResult::default();

        for entry in WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(IngestError::FileOperation {
                        path: root.to_path_buf(),
                        source: e.into(),
                    });
                }
                Err(e) => {
                    self.record_walk_error(root, e, &mut result);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative_path = relative_to(root, path);

            if self.should_skip(&relative_path) {
                debug!("Skipping file: {}", relative_path);
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("Cannot read metadata for {}: {}", relative_path, e);
                    0
                }
            };
            let file = ScannedFile {
                path: path.to_path_buf(),
                relative_path,
                size,
            };

            if self.is_manifest(file.file_name()) {
                result.manifests.push(file);
            } else {
                result.deliverables.push(file);
            }
        }

        info!(
            "Found {} manifests and {} deliverables",
            result.manifests.len(),
            result.deliverables.len()
        );
        Ok(result)
    }

    // the walk continues past any entry it cannot read
    fn record_walk_error(&self, root: &Path, error: walkdir::Error, result: &mut ScanResult) {
        let Some(path) = error.path().map(Path::to_path_buf) else {
            warn!("Skipping unreadable entry under {}: {}", root.display(), error);
            return;
        };
        let relative_path = relative_to(root, &path);
        warn!("Skipping unreadable entry {}: {}", relative_path, error);

        if self.should_skip(&relative_path) {
            return;
        }
        if self.is_manifest(crate::manifest::basename(&relative_path)) {
            result.unreadable_manifests.push(UnreadableEntry {
                path,
                relative_path,
                error: error.to_string(),
            });
        }
    }

    fn should_skip(&self, relative_path: &str) -> bool {
        self.config
            .skip_patterns
            .iter()
            .any(|pattern| matches_pattern(pattern, relative_path))
    }

    fn is_manifest(&self, file_name: &str) -> bool {
        self.config
            .manifest_patterns
            .iter()
            .any(|pattern| matches_pattern(pattern, file_name))
    }
}

/// `/`-joined path of `path` below `root`.
fn relative_to(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `*suffix` matches by suffix, `dir/*` matches anything under a `dir`
/// component, anything else must equal a whole path component.
fn matches_pattern(pattern: &str, path: &str) -> bool {
    if let Some(dir) = pattern.strip_suffix("/*") {
        return path.split('/').rev().skip(1).any(|component| component == dir);
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return path.ends_with(suffix);
    }
    path.split('/').any(|component| component == pattern)
}
