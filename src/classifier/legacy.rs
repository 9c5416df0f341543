// file: src/classifier/legacy.rs
// description: positional decoder for legacy BASE metagenomics filenames
// reference: eleven underscore-separated tokens, library ids namespaced on export

use crate::classifier::BasenameClassifier;
use crate::error::SchemaDrift;
use crate::models::{
    ArtifactClass, ArtifactRecord, Classification, FieldMap, FieldType, Miss, Project,
};
use serde::{Deserialize, Serialize};

/// Identifier namespace prepended to legacy library ids.
pub const BPA_ID_PREFIX: &str = "102.100.100.";

const PART_COUNT: usize = 11;
const INSERT_SIZE: usize = 3;
const FLOWCELL: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyOptions {
    /// Reproduce the historical decoder, which stored the insert size in the
    /// flowcell field. Disagreements are reported as schema drift.
    #[serde(default)]
    pub flowcell_from_insert_size: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBaseDecoder {
    options: LegacyOptions,
}

impl LegacyBaseDecoder {
    pub fn new(options: LegacyOptions) -> Self {
        Self { options }
    }

    pub fn decode(&self, basename: &str) -> Result<Classification, SchemaDrift> {
        let parts: Vec<&str> = basename.split('_').collect();
        if parts.len() != PART_COUNT || parts[4] != "BASE" {
            return Ok(Classification::Miss(Miss {
                project: Project::Base,
                filename: basename.to_string(),
            }));
        }

        let (run_id, extension) = match parts[10].split_once('.') {
            Some((run_id, extension)) => (run_id, Some(extension)),
            None => (parts[10], None),
        };

        let flowcell = if self.options.flowcell_from_insert_size {
            parts[INSERT_SIZE]
        } else {
            parts[FLOWCELL]
        };

        // validates the unique id before it is namespaced
        FieldType::LibraryId
            .convert(parts[0])
            .map_err(|reason| SchemaDrift::new(basename, "bpa_id", parts[0], reason))?;

        let mut fields = FieldMap::new();
        let mut put = |name: &str, kind: FieldType, raw: &str| -> Result<(), SchemaDrift> {
            let value = kind
                .convert(raw)
                .map_err(|reason| SchemaDrift::new(basename, name, raw, reason))?;
            fields.insert(name.to_string(), Some(value));
            Ok(())
        };

        put("bpa_id", FieldType::Text, &format!("{}{}", BPA_ID_PREFIX, parts[0]))?;
        put("extraction_id", FieldType::Text, parts[1])?;
        put("library", FieldType::Text, parts[2])?;
        put("insert_size", FieldType::Text, parts[INSERT_SIZE])?;
        put("facility", FieldType::FacilityId, parts[5])?;
        put("flowcell", FieldType::FlowcellId, flowcell)?;
        put("index", FieldType::IndexSequence, parts[7])?;
        put("lane", FieldType::LaneTag, parts[8])?;
        put("run", FieldType::ReadTag, parts[9])?;
        put("run_id", FieldType::Text, run_id)?;
        put("target", FieldType::Text, "metagenomics")?;

        if let Some(ext) = extension {
            put("extension", FieldType::Extension, ext)?;
        }
        fields.entry("extension".to_string()).or_insert(None);

        Ok(Classification::Matched(ArtifactRecord {
            project: Project::Base,
            artifact_class: ArtifactClass::Metagenomics,
            filename: basename.to_string(),
            fields,
            priority: 0,
        }))
    }
}

impl BasenameClassifier for LegacyBaseDecoder {
    fn project(&self) -> Project {
        Project::Base
    }

    fn classify_basename(&self, basename: &str) -> Result<Classification, SchemaDrift> {
        self.decode(basename)
    }

    fn review(&self, basename: &str, record: &ArtifactRecord) -> Option<String> {
        if !self.options.flowcell_from_insert_size {
            return None;
        }

        let parts: Vec<&str> = basename.split('_').collect();
        let token = parts.get(FLOWCELL)?;
        let stored = record.value("flowcell")?;

        (stored != *token).then(|| {
            format!(
                "flowcell taken from insert size ({}) disagrees with flowcell token ({})",
                stored, token
            )
        })
    }
}
