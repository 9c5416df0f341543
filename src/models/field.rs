// file: src/models/field.rs
// description: semantic field types captured from deliverable filenames
// reference: facility naming conventions for sequencing deliverables

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

lazy_static! {
    // yyyymmdd_hhmm_position_flowcell_runhash, as written by MinKNOW
    static ref EXPERIMENT_RUN_NAME: Regex = Regex::new(
        r"^\d{8}_\d{4}_[0-9A-Z-]+_P[A-Z]{2}\d{5}_[0-9a-f]{8}$"
    ).expect("EXPERIMENT_RUN_NAME regex is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    LibraryId,
    FacilityId,
    FlowcellId,
    IndexSequence,
    LaneTag,
    ReadTag,
    RunNumber,
    RunSampleNum,
    ExperimentRunName,
    ArchiveType,
    Extension,
    /// Free token; only the positional legacy decoder uses it.
    Text,
}

/// A named field in a pattern's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldType,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldType) -> Self {
        Self { name, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facility {
    Agrf,
    Brf,
    Unsw,
}

impl Facility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facility::Agrf => "AGRF",
            Facility::Brf => "BRF",
            Facility::Unsw => "UNSW",
        }
    }

    /// Accepts the plain facility codes and the AGRF contract form
    /// (`AGRF12345`, `CAGRF12345`), which normalises to AGRF.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "AGRF" => return Some(Facility::Agrf),
            "BRF" => return Some(Facility::Brf),
            "UNSW" => return Some(Facility::Unsw),
            _ => {}
        }

        let contract = code.strip_prefix('C').unwrap_or(code);
        let digits = contract.strip_prefix("AGRF")?;
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Facility::Agrf)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadTag {
    R1,
    R2,
    I1,
    I2,
}

impl ReadTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadTag::R1 => "R1",
            ReadTag::R2 => "R2",
            ReadTag::I1 => "I1",
            ReadTag::I2 => "I2",
        }
    }
}

/// Typed capture in canonical form. Numeric fields drop the spelling of the
/// filename: `012345` becomes library `12345` and a bare sample number `12`
/// displays as `S12`. The original text stays in `ArtifactRecord::filename`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    LibraryId(u32),
    Facility(Facility),
    Flowcell(String),
    Index(String),
    Lane(u16),
    Read(ReadTag),
    RunNumber(u32),
    RunSampleNum(u32),
    ExperimentRunName(String),
    ArchiveType(String),
    Extension(String),
    Text(String),
}

impl FieldType {
    /// Convert a captured substring into a typed value.
    pub fn convert(self, raw: &str) -> Result<FieldValue, String> {
        match self {
            FieldType::LibraryId => {
                if (4..=6).contains(&raw.len()) && is_digits(raw) {
                    raw.parse()
                        .map(FieldValue::LibraryId)
                        .map_err(|e| e.to_string())
                } else {
                    Err("expected 4-6 decimal digits".to_string())
                }
            }
            FieldType::FacilityId => Facility::from_code(raw)
                .map(FieldValue::Facility)
                .ok_or_else(|| "unknown facility code".to_string()),
            FieldType::FlowcellId => {
                if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
                {
                    Ok(FieldValue::Flowcell(raw.to_string()))
                } else {
                    Err("expected an alphanumeric flowcell token".to_string())
                }
            }
            FieldType::IndexSequence => {
                let parts: Vec<&str> = raw.split('-').collect();
                let valid = parts.len() <= 2
                    && parts
                        .iter()
                        .all(|p| !p.is_empty() && p.bytes().all(|b| b"ACGT".contains(&b)));
                if valid {
                    Ok(FieldValue::Index(raw.to_string()))
                } else {
                    Err("expected A/C/G/T, optionally a hyphen-joined pair".to_string())
                }
            }
            FieldType::LaneTag => match raw.strip_prefix('L') {
                Some(digits) if digits.len() == 3 && is_digits(digits) => digits
                    .parse()
                    .map(FieldValue::Lane)
                    .map_err(|e| e.to_string()),
                _ => Err("expected L followed by three digits".to_string()),
            },
            FieldType::ReadTag => match raw {
                "R1" => Ok(FieldValue::Read(ReadTag::R1)),
                "R2" => Ok(FieldValue::Read(ReadTag::R2)),
                "I1" => Ok(FieldValue::Read(ReadTag::I1)),
                "I2" => Ok(FieldValue::Read(ReadTag::I2)),
                _ => Err("expected R1, R2, I1 or I2".to_string()),
            },
            FieldType::RunNumber => {
                if is_digits(raw) {
                    raw.parse()
                        .map(FieldValue::RunNumber)
                        .map_err(|e| e.to_string())
                } else {
                    Err("expected a run number".to_string())
                }
            }
            FieldType::RunSampleNum => {
                let digits = raw.strip_prefix('S').unwrap_or(raw);
                if is_digits(digits) {
                    digits
                        .parse()
                        .map(FieldValue::RunSampleNum)
                        .map_err(|e| e.to_string())
                } else {
                    Err("expected an S-prefixed sample number".to_string())
                }
            }
            FieldType::ExperimentRunName => {
                if EXPERIMENT_RUN_NAME.is_match(raw) {
                    Ok(FieldValue::ExperimentRunName(raw.to_string()))
                } else {
                    Err("expected yyyymmdd_hhmm_position_flowcell_hash".to_string())
                }
            }
            FieldType::ArchiveType => {
                if !raw.is_empty() && raw.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    Ok(FieldValue::ArchiveType(raw.to_string()))
                } else {
                    Err("expected an identifier".to_string())
                }
            }
            FieldType::Extension => non_empty(raw).map(FieldValue::Extension),
            FieldType::Text => non_empty(raw).map(FieldValue::Text),
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn non_empty(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        Err("expected a non-empty token".to_string())
    } else {
        Ok(raw.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::LibraryId(n) | FieldValue::RunNumber(n) => write!(f, "{}", n),
            FieldValue::Facility(facility) => f.write_str(facility.as_str()),
            FieldValue::Lane(n) => write!(f, "L{:03}", n),
            FieldValue::Read(read) => f.write_str(read.as_str()),
            FieldValue::RunSampleNum(n) => write!(f, "S{}", n),
            FieldValue::Flowcell(s)
            | FieldValue::Index(s)
            | FieldValue::ExperimentRunName(s)
            | FieldValue::ArchiveType(s)
            | FieldValue::Extension(s)
            | FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::LibraryId(n) | FieldValue::RunNumber(n) => serializer.serialize_u32(*n),
            other => serializer.collect_str(other),
        }
    }
}
