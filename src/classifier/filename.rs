// file: src/classifier/filename.rs
// description: resolves a basename to one artifact class under a project's patterns
// reference: first full match in priority order wins

use crate::classifier::BasenameClassifier;
use crate::error::{Result, SchemaDrift};
use crate::models::{ArtifactRecord, Classification, Miss, Project};
use crate::registry::{Pattern, PatternRegistry};

/// Registry-backed classifier for any registered project.
#[derive(Debug, Clone, Copy)]
pub struct FilenameClassifier<'r> {
    registry: &'r PatternRegistry,
}

impl<'r> FilenameClassifier<'r> {
    pub fn new(registry: &'r PatternRegistry) -> Self {
        Self { registry }
    }

    /// Fails with `UnknownProject` for unregistered projects and with
    /// `SchemaDrift` when a match cannot be typed. A miss is not an error.
    pub fn classify(&self, project: Project, basename: &str) -> Result<Classification> {
        Ok(self.for_project(project)?.classify(basename)?)
    }

    pub fn for_project(&self, project: Project) -> Result<ProjectClassifier<'r>> {
        let patterns = self.registry.patterns_for(project)?;
        Ok(ProjectClassifier { project, patterns })
    }
}

/// Classifier bound to one project's patterns.
#[derive(Debug, Clone, Copy)]
pub struct ProjectClassifier<'r> {
    project: Project,
    patterns: &'r [Pattern],
}

impl ProjectClassifier<'_> {
    pub fn classify(&self, basename: &str) -> std::result::Result<Classification, SchemaDrift> {
        for pattern in self.patterns {
            if let Some(fields) = pattern.extract(basename) {
                return Ok(Classification::Matched(ArtifactRecord {
                    project: self.project,
                    artifact_class: pattern.artifact_class(),
                    filename: basename.to_string(),
                    fields: fields?,
                    priority: pattern.priority(),
                }));
            }
        }

        Ok(Classification::Miss(Miss {
            project: self.project,
            filename: basename.to_string(),
        }))
    }
}

impl BasenameClassifier for ProjectClassifier<'_> {
    fn project(&self) -> Project {
        self.project
    }

    fn classify_basename(&self, basename: &str) -> std::result::Result<Classification, SchemaDrift> {
        self.classify(basename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use crate::models::{ArtifactClass, FieldSpec, FieldType};
    use crate::registry::PatternDef;
    use pretty_assertions::assert_eq;

    fn registry() -> PatternRegistry {
        PatternRegistry::builtin().unwrap()
    }

    fn matched(project: Project, basename: &str) -> ArtifactRecord {
        let registry = registry();
        let classifier = FilenameClassifier::new(&registry);
        match classifier.classify(project, basename).unwrap() {
            Classification::Matched(record) => record,
            Classification::Miss(miss) => panic!("expected a match for {}", miss.filename),
        }
    }

    #[test]
    fn test_collaborations_metagenomics_novaseq() {
        let record = matched(
            Project::Collaborations,
            "138515_AM_MGE_AGRF_22KM7FLT3_CACAGCGGTC-ATTCCTATTG_L007_R1.fastq.gz",
        );

        assert_eq!(record.artifact_class, ArtifactClass::MetagenomicsNovaseq);
        assert_eq!(record.value("library_id").as_deref(), Some("138515"));
        assert_eq!(record.value("vendor").as_deref(), Some("AGRF"));
        assert_eq!(record.value("flowcell_id").as_deref(), Some("22KM7FLT3"));
        assert_eq!(
            record.value("index").as_deref(),
            Some("CACAGCGGTC-ATTCCTATTG")
        );
        assert_eq!(record.value("lane").as_deref(), Some("L007"));
        assert_eq!(record.value("read").as_deref(), Some("R1"));
    }

    #[test]
    fn test_forest_revio_bam() {
        let record = matched(
            Project::Forest,
            "645250_FOR_BRF_m84118_250322_030318_s3.hifi_reads.bc2013.bam",
        );

        assert_eq!(record.artifact_class, ArtifactClass::PacbioHifiRevio);
        assert_eq!(record.value("library_id").as_deref(), Some("645250"));
        assert_eq!(record.value("facility").as_deref(), Some("BRF"));
        assert_eq!(
            record.value("flowcell_id").as_deref(),
            Some("m84118_250322_030318_s3")
        );
    }

    #[test]
    fn test_forest_revio_pdf_has_no_library() {
        let record = matched(Project::Forest, "FOR_BRF_m84118_250322_030318_s3.pdf");

        assert_eq!(record.artifact_class, ArtifactClass::PacbioHifiRevioPdf);
        assert_eq!(record.value("facility").as_deref(), Some("BRF"));
        assert_eq!(
            record.value("flowcell_id").as_deref(),
            Some("m84118_250322_030318_s3")
        );
        assert!(!record.fields.contains_key("library_id"));
    }

    #[test]
    fn test_ipm_illumina_shortread() {
        let record = matched(
            Project::Ipm,
            "605582_IPM_AGRF_22YMTVLT3_TCCGGACTAG-GACGAACAAT_L008_R1.fastq.gz",
        );

        assert_eq!(record.artifact_class, ArtifactClass::IlluminaShortread);
        assert_eq!(record.value("library_id").as_deref(), Some("605582"));
        assert_eq!(record.value("facility_id").as_deref(), Some("AGRF"));
        assert_eq!(record.value("flow_cell_id").as_deref(), Some("22YMTVLT3"));
        assert_eq!(
            record.value("index").as_deref(),
            Some("TCCGGACTAG-GACGAACAAT")
        );
        assert_eq!(record.value("lane").as_deref(), Some("L008"));
        assert_eq!(record.value("read").as_deref(), Some("R1"));
        assert!(record.is_absent("run_sample_num"));
    }

    #[test]
    fn test_pacbio_bam_variants_all_resolve() {
        let variants = [
            "_ccs_statistics.csv",
            "_final.consensusreadset.xml",
            ".ccs.bam",
            ".pdf",
            ".hifi_reads.default.bam",
            ".hifi_reads.bc1001.bam",
            ".hifi_reads.bam",
            ".subreads.bam",
        ];

        for variant in variants {
            let name = format!("350728_CANETOAD_AGRF_PacBio_m84118_250322_030318_s3{}", variant);
            let record = matched(Project::Collaborations, &name);
            assert_eq!(record.artifact_class, ArtifactClass::PacbioHifi, "{}", name);
            assert_eq!(
                record.value("flowcell_id").as_deref(),
                Some("m84118_250322_030318_s3")
            );
        }
    }

    #[test]
    fn test_specific_sheet_outranks_generic_sheet() {
        let name = "350728_CANETOAD_AGRF_PacBio_DA052894_metadata.xlsx";
        let registry = registry();
        let patterns = registry.patterns_for(Project::Collaborations).unwrap();

        let candidates: Vec<ArtifactClass> = patterns
            .iter()
            .filter(|p| p.extract(name).is_some())
            .map(|p| p.artifact_class())
            .collect();
        assert_eq!(
            candidates,
            vec![
                ArtifactClass::PacbioHifiMetadataSheet,
                ArtifactClass::MetadataSheet
            ]
        );

        let record = matched(Project::Collaborations, name);
        assert_eq!(record.artifact_class, ArtifactClass::PacbioHifiMetadataSheet);
        assert_eq!(record.value("library_id").as_deref(), Some("350728"));

        let generic = matched(Project::Collaborations, "CANETOAD_BRF_DA052894_metadata.xlsx");
        assert_eq!(generic.artifact_class, ArtifactClass::MetadataSheet);
    }

    #[test]
    fn test_ont_optional_groups_marked_absent() {
        let record = matched(
            Project::Collaborations,
            "350719_PAW00001_AM_UNSW_ONTPromethION_sequencing_summary.txt",
        );
        assert_eq!(record.artifact_class, ArtifactClass::OntPromethion);
        assert!(record.is_absent("run_number"));
        assert!(record.is_absent("experiment_run_name"));
        assert_eq!(
            record.value("archive_type").as_deref(),
            Some("sequencing_summary")
        );
        assert_eq!(record.value("extension").as_deref(), Some("txt"));

        let record = matched(
            Project::Collaborations,
            "350719_PAQ83721_AM_BRF_Run3_ONTPromethION_20231010_1455_1A_PAQ83721_1a2b3c4d_report.html",
        );
        assert_eq!(record.value("run_number").as_deref(), Some("3"));
        assert_eq!(
            record.value("experiment_run_name").as_deref(),
            Some("20231010_1455_1A_PAQ83721_1a2b3c4d")
        );
        assert_eq!(record.value("archive_type").as_deref(), Some("report"));
    }

    #[test]
    fn test_schema_keys_match_pattern_fields() {
        let registry = registry();
        let classifier = FilenameClassifier::new(&registry);

        for project in registry.projects().collect::<Vec<_>>() {
            for pattern in registry.patterns_for(project).unwrap() {
                for sample in pattern.samples() {
                    let classification = classifier.classify(project, sample).unwrap();
                    let record = classification.record().unwrap();
                    let mut expected: Vec<&str> =
                        pattern.fields().iter().map(|f| f.name).collect();
                    expected.sort_unstable();
                    let keys: Vec<&str> = record.fields.keys().map(String::as_str).collect();
                    assert_eq!(keys, expected, "{}", sample);
                }
            }
        }
    }

    #[test]
    fn test_misses_are_not_errors() {
        let registry = registry();
        let classifier = FilenameClassifier::new(&registry);

        for name in [
            "readme.txt",
            "notes.fastq.gz",
            "138515_AM_MGE_AGRF_22KM7FLT3_CACAGCGGTN-ATTCCTATTG_L007_R1.fastq.gz",
            "138515_AM_MGE_AGRF_22KM7FLT3_CACAGCGGTC_L007_R1.fastq.gz.md5",
            "x138515_AM_MGE_AGRF_22KM7FLT3_CACAGCGGTC_L007_R1.fastq.gz",
            "",
        ] {
            let classification = classifier.classify(Project::Collaborations, name).unwrap();
            assert_eq!(
                classification,
                Classification::Miss(Miss {
                    project: Project::Collaborations,
                    filename: name.to_string(),
                })
            );
        }
    }

    #[test]
    fn test_flowcell_alphabet_is_part_of_contract() {
        let registry = registry();
        let classifier = FilenameClassifier::new(&registry);

        // PAX is outside the PromethION alphabet
        let name = "350719_PAX12345_AM_AGRF_ONTPromethION_report.html";
        assert!(classifier.classify(Project::Collaborations, name).unwrap().is_miss());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let registry = registry();
        let classifier = FilenameClassifier::new(&registry);
        let name = "605590_IPM_BRF_PAW12345_ONTPromethION_fastq_pass.tar";

        let first = classifier.classify(Project::Ipm, name).unwrap();
        for _ in 0..10 {
            assert_eq!(classifier.classify(Project::Ipm, name).unwrap(), first);
        }
        assert_eq!(first.artifact_class(), Some(ArtifactClass::OntPromethion));
    }

    #[test]
    fn test_unknown_project_for_registry_classifier() {
        let registry = registry();
        let classifier = FilenameClassifier::new(&registry);
        assert!(matches!(
            classifier.classify(Project::Base, "anything"),
            Err(IngestError::UnknownProject(_))
        ));
    }

    #[test]
    fn test_capture_that_fails_typing_is_schema_drift() {
        // library_id captures up to 8 digits but the type allows 6
        static DEFS: &[PatternDef] = &[PatternDef {
            artifact_class: ArtifactClass::MetadataSheet,
            priority: 1,
            regex: r"(?P<library_id>\d{4,8})_metadata\.xlsx",
            fields: &[FieldSpec::new("library_id", FieldType::LibraryId)],
            samples: &[],
        }];
        let registry = PatternRegistry::from_tables(&[(Project::Forest, DEFS)]).unwrap();
        let classifier = FilenameClassifier::new(&registry);

        let err = classifier
            .for_project(Project::Forest)
            .unwrap()
            .classify("12345678_metadata.xlsx")
            .unwrap_err();
        assert_eq!(err.field, "library_id");
        assert_eq!(err.raw, "12345678");

        assert!(matches!(
            classifier.classify(Project::Forest, "12345678_metadata.xlsx"),
            Err(IngestError::SchemaDrift(_))
        ));
        assert!(
            classifier
                .classify(Project::Forest, "1234_metadata.xlsx")
                .unwrap()
                .record()
                .is_some()
        );
    }
}
