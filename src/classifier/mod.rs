// file: src/classifier/mod.rs
// description: classifier seam shared by registry-backed and positional decoders
// reference: internal module structure

pub mod filename;
pub mod legacy;

pub use filename::{FilenameClassifier, ProjectClassifier};
pub use legacy::{BPA_ID_PREFIX, LegacyBaseDecoder, LegacyOptions};

use crate::error::{Result, SchemaDrift};
use crate::models::{ArtifactRecord, Classification, Project};
use crate::registry::PatternRegistry;

/// Resolves a manifest basename for one project. Implementations are pure.
pub trait BasenameClassifier {
    fn project(&self) -> Project;

    fn classify_basename(
        &self,
        basename: &str,
    ) -> std::result::Result<Classification, SchemaDrift>;

    /// Note on a successful match that should still be reported as drift.
    fn review(&self, _basename: &str, _record: &ArtifactRecord) -> Option<String> {
        None
    }
}

/// Pick the classifier that handles `project`.
pub fn classifier_for<'r>(
    project: Project,
    registry: &'r PatternRegistry,
    legacy: LegacyOptions,
) -> Result<Box<dyn BasenameClassifier + Send + Sync + 'r>> {
    match project {
        Project::Base => Ok(Box::new(LegacyBaseDecoder::new(legacy))),
        _ => Ok(Box::new(
            FilenameClassifier::new(registry).for_project(project)?,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtifactClass;

    #[test]
    fn test_classifier_for_each_project() {
        let registry = PatternRegistry::builtin().unwrap();

        for project in Project::ALL {
            let classifier = classifier_for(project, &registry, LegacyOptions::default()).unwrap();
            assert_eq!(classifier.project(), project);
        }

        let base = classifier_for(Project::Base, &registry, LegacyOptions::default()).unwrap();
        let classification = base
            .classify_basename(
                "7910_1_PE_550bp_BASE_UNSW_H2TFJBCXX_GAATTCGT-TATAGCCT_L001_R1_001.fastq.gz",
            )
            .unwrap();
        assert_eq!(
            classification.artifact_class(),
            Some(ArtifactClass::Metagenomics)
        );
    }
}
