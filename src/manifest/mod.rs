// file: src/manifest/mod.rs
// description: md5 manifest parsing module exports
// reference: internal module structure

pub mod line;
pub mod parser;

pub use line::{ManifestLine, basename, parse_line};
pub use parser::{ManifestEntries, ManifestEntry, ManifestOutcome, ManifestParser};
