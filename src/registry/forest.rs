// file: src/registry/forest.rs
// description: filename patterns for the forest project (PacBio Revio and Illumina)
// reference: facility deliverable naming conventions

use super::PatternDef;
use crate::models::{ArtifactClass, FieldSpec, FieldType};

const LIBRARY_ID: FieldSpec = FieldSpec::new("library_id", FieldType::LibraryId);
const FACILITY: FieldSpec = FieldSpec::new("facility", FieldType::FacilityId);
const FLOWCELL_ID: FieldSpec = FieldSpec::new("flowcell_id", FieldType::FlowcellId);

pub static PATTERNS: &[PatternDef] = &[
    PatternDef {
        artifact_class: ArtifactClass::PacbioHifiRevio,
        priority: 40,
        regex: r"
            (?P<library_id>\d{4,6})_
            FOR_
            (?P<facility>AGRF|BRF)_
            (?:PacBio_)?
            (?P<flowcell_id>m\d{5}_\d{6}_\d{6}_s\d)
            \.hifi_reads
            (?:\.default|\.bc\d{4})?
            \.bam
        ",
        fields: &[LIBRARY_ID, FACILITY, FLOWCELL_ID],
        samples: &[
            "645250_FOR_BRF_m84118_250322_030318_s3.hifi_reads.bc2013.bam",
            "645250_FOR_AGRF_PacBio_m84118_250322_030318_s3.hifi_reads.default.bam",
            "645250_FOR_BRF_m84118_250322_030318_s3.hifi_reads.bam",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::PacbioHifiRevioPdf,
        priority: 30,
        regex: r"
            FOR_
            (?P<facility>AGRF|BRF)_
            (?:PacBio_)?
            (?P<flowcell_id>m\d{5}_\d{6}_\d{6}_s\d)
            \.pdf
        ",
        fields: &[FACILITY, FLOWCELL_ID],
        samples: &[
            "FOR_BRF_m84118_250322_030318_s3.pdf",
            "FOR_AGRF_PacBio_m84118_250322_030318_s3.pdf",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::PacbioHifiRevioMetadataSheet,
        priority: 20,
        regex: r"
            FOR_
            (?P<facility>AGRF|BRF)
            _?
            (?P<flowcell_id>m\d{5}_\d{6}_\d{6}_s\d)
            [_.]metadata\.xlsx
        ",
        fields: &[FACILITY, FLOWCELL_ID],
        samples: &[
            "FOR_BRF_m84118_250322_030318_s3_metadata.xlsx",
            "FOR_AGRFm84118_250322_030318_s3.metadata.xlsx",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::IlluminaShortread,
        priority: 10,
        regex: r"
            (?P<library_id>\d{4,6})_
            (?:FOR_(?P<facility>BRF|UNSW|AGRF)_)?
            (?P<flowcell_id>[A-Z0-9]{5,10})_
            (?P<index>[ACGT]{8,12}(?:-[ACGT]{8,12})?)_
            (?:(?P<run_sample_num>S?\d+)_)?
            (?:(?P<lane>L\d{3})_)?
            (?P<read>[RI][12])
            (?:_001)?
            (?:\.fastq)?
            \.gz
        ",
        fields: &[
            LIBRARY_ID,
            FACILITY,
            FLOWCELL_ID,
            FieldSpec::new("index", FieldType::IndexSequence),
            FieldSpec::new("run_sample_num", FieldType::RunSampleNum),
            FieldSpec::new("lane", FieldType::LaneTag),
            FieldSpec::new("read", FieldType::ReadTag),
        ],
        samples: &[
            "350749_FOR_BRF_HLGJ7DRX5_ATCACGTTAG-GTCATCCAGT_S12_L001_R1_001.fastq.gz",
            "350749_22W3KJLT3_CGCTCATT-AGGCTATA_L002_R2.fastq.gz",
            "350750_FOR_UNSW_HLGJ7_CGCTCATT_I1.gz",
        ],
    },
];
