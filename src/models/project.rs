// file: src/models/project.rs
// description: project namespace tags and artifact class tags
// reference: internal data structures

use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace that owns an independent set of naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Project {
    Collaborations,
    Forest,
    Ipm,
    /// Legacy BASE metagenomics deliverables, decoded positionally.
    Base,
}

impl Project {
    pub const ALL: [Project; 4] = [
        Project::Collaborations,
        Project::Forest,
        Project::Ipm,
        Project::Base,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Project::Collaborations => "collaborations",
            Project::Forest => "forest",
            Project::Ipm => "ipm",
            Project::Base => "base",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Project {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Project::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| IngestError::UnknownProject(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactClass {
    MetagenomicsNovaseq,
    IlluminaShortread,
    OntPromethion,
    OntPromethionCommon,
    PacbioHifi,
    PacbioHifiMetadataSheet,
    PacbioHifiCommon,
    PacbioHifiRevio,
    PacbioHifiRevioPdf,
    PacbioHifiRevioMetadataSheet,
    MetadataSheet,
    Metagenomics,
}

impl ArtifactClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactClass::MetagenomicsNovaseq => "metagenomics_novaseq",
            ArtifactClass::IlluminaShortread => "illumina_shortread",
            ArtifactClass::OntPromethion => "ont_promethion",
            ArtifactClass::OntPromethionCommon => "ont_promethion_common",
            ArtifactClass::PacbioHifi => "pacbio_hifi",
            ArtifactClass::PacbioHifiMetadataSheet => "pacbio_hifi_metadata_sheet",
            ArtifactClass::PacbioHifiCommon => "pacbio_hifi_common",
            ArtifactClass::PacbioHifiRevio => "pacbio_hifi_revio",
            ArtifactClass::PacbioHifiRevioPdf => "pacbio_hifi_revio_pdf",
            ArtifactClass::PacbioHifiRevioMetadataSheet => "pacbio_hifi_revio_metadata_sheet",
            ArtifactClass::MetadataSheet => "metadata_sheet",
            ArtifactClass::Metagenomics => "metagenomics",
        }
    }
}

impl fmt::Display for ArtifactClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_parsing() {
        assert_eq!("forest".parse::<Project>().unwrap(), Project::Forest);
        assert_eq!(" IPM ".parse::<Project>().unwrap(), Project::Ipm);
        assert!(matches!(
            "marine".parse::<Project>(),
            Err(IngestError::UnknownProject(name)) if name == "marine"
        ));
    }

    #[test]
    fn test_artifact_class_serializes_as_tag() {
        let json = serde_json::to_string(&ArtifactClass::PacbioHifiRevioPdf).unwrap();
        assert_eq!(json, "\"pacbio_hifi_revio_pdf\"");
        assert_eq!(
            ArtifactClass::PacbioHifiRevioPdf.to_string(),
            "pacbio_hifi_revio_pdf"
        );
    }
}
