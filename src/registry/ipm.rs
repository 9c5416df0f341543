// file: src/registry/ipm.rs
// description: filename patterns for the IPM project (Illumina and ONT PromethION)
// reference: facility deliverable naming conventions

use super::PatternDef;
use crate::models::{ArtifactClass, FieldSpec, FieldType};

const FACILITY_ID: FieldSpec = FieldSpec::new("facility_id", FieldType::FacilityId);
const FLOWCELL_ID: FieldSpec = FieldSpec::new("flowcell_id", FieldType::FlowcellId);
const ARCHIVE_TYPE: FieldSpec = FieldSpec::new("archive_type", FieldType::ArchiveType);
const EXTENSION: FieldSpec = FieldSpec::new("extension", FieldType::Extension);

pub static PATTERNS: &[PatternDef] = &[
    PatternDef {
        artifact_class: ArtifactClass::IlluminaShortread,
        priority: 30,
        regex: r"
            (?P<library_id>\d{4,6})_
            IPM_
            (?P<facility_id>AGRF|UNSW|BRF)_
            (?P<flow_cell_id>[A-Z0-9]{9,10})_
            (?P<index>[ACGT]+(?:-[ACGT]+)?)_
            (?:(?P<run_sample_num>S\d+)_)?
            (?:(?P<lane>L\d{3})_)?
            (?P<read>[RI][12])
            (?:_001)?
            \.fastq\.gz
        ",
        fields: &[
            FieldSpec::new("library_id", FieldType::LibraryId),
            FACILITY_ID,
            FieldSpec::new("flow_cell_id", FieldType::FlowcellId),
            FieldSpec::new("index", FieldType::IndexSequence),
            FieldSpec::new("run_sample_num", FieldType::RunSampleNum),
            FieldSpec::new("lane", FieldType::LaneTag),
            FieldSpec::new("read", FieldType::ReadTag),
        ],
        samples: &[
            "605582_IPM_AGRF_22YMTVLT3_TCCGGACTAG-GACGAACAAT_L008_R1.fastq.gz",
            "605583_IPM_UNSW_HV2MKDSX3A_ACGTTGCA_S3_L001_R2_001.fastq.gz",
            "605584_IPM_BRF_22YMTVLT3_GATTACAG_I1.fastq.gz",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::OntPromethion,
        priority: 20,
        regex: r"
            (?P<library_id>\d{4,6})_
            IPM_
            (?P<facility_id>BRF)_
            (?P<flowcell_id>P[AB][ABCDEFGKMOQW]\d{5})_
            ONTPromethION_
            (?P<archive_type>\w+)
            \.(?P<extension>tar|html|txt|tsv)
        ",
        fields: &[
            FieldSpec::new("library_id", FieldType::LibraryId),
            FACILITY_ID,
            FLOWCELL_ID,
            ARCHIVE_TYPE,
            EXTENSION,
        ],
        samples: &[
            "605590_IPM_BRF_PAW12345_ONTPromethION_fastq_pass.tar",
            "605590_IPM_BRF_PBA00042_ONTPromethION_report.html",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::OntPromethionCommon,
        priority: 10,
        regex: r"
            IPM_
            (?P<facility_id>AGRF|BRF|UNSW)_
            (?P<flowcell_id>P[AB][ABCDEFGKMOQW]\d{5})_
            ONTPromethION_
            (?P<archive_type>\w+)
            \.(?P<extension>html|tsv|txt|tar)
        ",
        fields: &[FACILITY_ID, FLOWCELL_ID, ARCHIVE_TYPE, EXTENSION],
        samples: &[
            "IPM_BRF_PAW12345_ONTPromethION_sequencing_summary.txt",
            "IPM_AGRF_PBA00042_ONTPromethION_barcode_alignment.tsv",
        ],
    },
];
