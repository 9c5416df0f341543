// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for ingest runs
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub manifests_processed: usize,
    pub manifests_failed: usize,
    pub files_classified: usize,
    pub records_emitted: usize,
    pub issues_reported: usize,
    pub duration_secs: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.records_emitted as f64 / self.duration_secs as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.manifests_processed + self.manifests_failed;
        if total == 0 {
            return 0.0;
        }
        (self.manifests_processed as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    manifests_processed: Arc<AtomicUsize>,
    manifests_failed: Arc<AtomicUsize>,
    files_classified: Arc<AtomicUsize>,
    records_emitted: Arc<AtomicUsize>,
    issues_reported: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_items: usize) -> Self {
        Self::with_color(total_items, true)
    }

    pub fn with_color(total_items: usize, colored: bool) -> Self {
        Self::build(MultiProgress::new(), total_items, colored)
    }

    /// Tracks counts without drawing anything.
    pub fn hidden(total_items: usize) -> Self {
        Self::build(
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            total_items,
            false,
        )
    }

    fn build(multi_progress: MultiProgress, total_items: usize, colored: bool) -> Self {
        let main_bar = create_progress_bar(&multi_progress, total_items as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            manifests_processed: Arc::new(AtomicUsize::new(0)),
            manifests_failed: Arc::new(AtomicUsize::new(0)),
            files_classified: Arc::new(AtomicUsize::new(0)),
            records_emitted: Arc::new(AtomicUsize::new(0)),
            issues_reported: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_manifests_processed(&self, records: usize, issues: usize) {
        self.manifests_processed.fetch_add(1, Ordering::SeqCst);
        self.records_emitted.fetch_add(records, Ordering::SeqCst);
        self.issues_reported.fetch_add(issues, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_manifests_failed(&self) {
        self.manifests_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_files_classified(&self, issues: usize) {
        self.files_classified.fetch_add(1, Ordering::SeqCst);
        self.issues_reported.fetch_add(issues, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn set_message(&self, message: String) {
        self.main_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Ingest complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            manifests_processed: self.manifests_processed.load(Ordering::SeqCst),
            manifests_failed: self.manifests_failed.load(Ordering::SeqCst),
            files_classified: self.files_classified.load(Ordering::SeqCst),
            records_emitted: self.records_emitted.load(Ordering::SeqCst),
            issues_reported: self.issues_reported.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_detail_bar(&self) {
        let records = self.records_emitted.load(Ordering::SeqCst);
        let issues = self.issues_reported.load(Ordering::SeqCst);
        let failed = self.manifests_failed.load(Ordering::SeqCst);

        self.detail_bar.set_message(format!(
            "Records: {} | Issues: {} | Failed manifests: {}",
            records, issues, failed
        ));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stats_calculations() {
        let mut stats = PipelineStats::new();
        stats.manifests_processed = 9;
        stats.manifests_failed = 1;
        stats.records_emitted = 100;
        stats.duration_secs = 10;

        assert_eq!(stats.records_per_second(), 10.0);
        assert!((stats.success_rate() - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_pipeline_stats_zero_duration() {
        let stats = PipelineStats::new();
        assert_eq!(stats.records_per_second(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracker_counts() {
        let tracker = ProgressTracker::hidden(4);

        tracker.inc_manifests_processed(12, 2);
        tracker.inc_manifests_failed();
        tracker.inc_files_classified(1);
        tracker.inc_files_classified(0);

        let stats = tracker.get_stats();
        assert_eq!(stats.manifests_processed, 1);
        assert_eq!(stats.manifests_failed, 1);
        assert_eq!(stats.files_classified, 2);
        assert_eq!(stats.records_emitted, 12);
        assert_eq!(stats.issues_reported, 3);
    }
}
