// file: src/scan/mod.rs
// description: deliverable directory scanning module exports
// reference: internal module structure

pub mod scanner;

pub use scanner::{DeliverableScanner, ScanResult, ScannedFile, UnreadableEntry};
