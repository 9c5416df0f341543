// file: src/registry/collaborations.rs
// description: filename patterns for the collaborations project (metagenomics, ONT, cane toad PacBio)
// reference: facility deliverable naming conventions

use super::PatternDef;
use crate::models::{ArtifactClass, FieldSpec, FieldType};

const LIBRARY_ID: FieldSpec = FieldSpec::new("library_id", FieldType::LibraryId);
const FACILITY: FieldSpec = FieldSpec::new("facility", FieldType::FacilityId);
const FLOWCELL_ID: FieldSpec = FieldSpec::new("flowcell_id", FieldType::FlowcellId);
const RUN_NUMBER: FieldSpec = FieldSpec::new("run_number", FieldType::RunNumber);
const ARCHIVE_TYPE: FieldSpec = FieldSpec::new("archive_type", FieldType::ArchiveType);
const EXTENSION: FieldSpec = FieldSpec::new("extension", FieldType::Extension);

pub static PATTERNS: &[PatternDef] = &[
    PatternDef {
        artifact_class: ArtifactClass::PacbioHifiMetadataSheet,
        priority: 70,
        regex: r"
            (?P<library_id>\d{4,6})_
            CANETOAD_
            (?P<facility>AGRF|C?AGRF\d+|BRF)_
            (?:PacBio_)?
            (?P<flowcell_id>[A-Za-z0-9]{8})
            [._]metadata\.xlsx
        ",
        fields: &[LIBRARY_ID, FACILITY, FLOWCELL_ID],
        samples: &[
            "350728_CANETOAD_AGRF_PacBio_DA052894_metadata.xlsx",
            "350728_CANETOAD_CAGRF20114_DA052894.metadata.xlsx",
            "350731_CANETOAD_BRF_DA052895_metadata.xlsx",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::PacbioHifi,
        priority: 60,
        regex: r"
            (?P<library_id>\d{4,6})_
            CANETOAD_
            (?P<facility>AGRF|BRF)_
            (?:PacBio_)?
            (?P<flowcell_id>m\d{5}_\d{6}_\d{6}_s\d)   # 23 characters
            (?:
                _ccs_statistics\.csv
              | _final\.consensusreadset\.xml
              | \.ccs\.bam
              | \.pdf
              | \.hifi_reads\.default\.bam
              | \.hifi_reads\.bc\d{4}\.bam
              | \.hifi_reads\.bam
              | \.subreads\.bam
            )
        ",
        fields: &[LIBRARY_ID, FACILITY, FLOWCELL_ID],
        samples: &[
            "350728_CANETOAD_AGRF_m84118_250322_030318_s3_ccs_statistics.csv",
            "350728_CANETOAD_AGRF_m84118_250322_030318_s3_final.consensusreadset.xml",
            "350728_CANETOAD_AGRF_PacBio_m84118_250322_030318_s3.ccs.bam",
            "350728_CANETOAD_BRF_m84118_250322_030318_s3.pdf",
            "350728_CANETOAD_BRF_m84118_250322_030318_s3.hifi_reads.default.bam",
            "350728_CANETOAD_BRF_m84118_250322_030318_s3.hifi_reads.bc2013.bam",
            "350728_CANETOAD_BRF_m84118_250322_030318_s3.hifi_reads.bam",
            "350728_CANETOAD_AGRF_m84118_250322_030318_s3.subreads.bam",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::PacbioHifiCommon,
        priority: 50,
        regex: r"
            CANETOAD_
            (?P<facility>AGRF|BRF)_
            (?:PacBio_)?
            (?P<flowcell_id>m\d{5}_\d{6}_\d{6}_s\d)
            (?:
                _ccs_statistics\.csv
              | _final\.consensusreadset\.xml
              | \.pdf
            )
        ",
        fields: &[FACILITY, FLOWCELL_ID],
        samples: &[
            "CANETOAD_AGRF_m84118_250322_030318_s3.pdf",
            "CANETOAD_BRF_PacBio_m84118_250322_030318_s3_ccs_statistics.csv",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::OntPromethion,
        priority: 40,
        regex: r"
            (?P<library_id>\d{4,6})_
            (?P<flowcell_id>PA[DEFGKMOQW]\d{5})_
            AM_
            (?P<facility>AGRF|BRF|UNSW)_
            (?:Run(?P<run_number>\d+)_)?
            ONTPromethION_
            (?:(?P<experiment_run_name>\d{8}_\d{4}_[0-9A-Z-]+_P[A-Z]{2}\d{5}_[0-9a-f]{8})_)?
            (?P<archive_type>\w+)
            \.(?P<extension>tar|fastq\.gz|blow5|html|txt|csv|tsv|json|md)
        ",
        fields: &[
            LIBRARY_ID,
            FLOWCELL_ID,
            FACILITY,
            RUN_NUMBER,
            FieldSpec::new("experiment_run_name", FieldType::ExperimentRunName),
            ARCHIVE_TYPE,
            EXTENSION,
        ],
        samples: &[
            "350719_PAK12345_AM_AGRF_Run2_ONTPromethION_fastq_pass.tar",
            "350719_PAQ83721_AM_BRF_ONTPromethION_20231010_1455_1A_PAQ83721_1a2b3c4d_report.html",
            "350719_PAW00001_AM_UNSW_ONTPromethION_sequencing_summary.txt",
            "350719_PAW00001_AM_UNSW_ONTPromethION_reads.fastq.gz",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::OntPromethionCommon,
        priority: 30,
        regex: r"
            (?P<flowcell_id>PA[DEFGKMOQW]\d{5})_
            AM_
            (?P<facility>AGRF|BRF|UNSW)_
            (?:Run(?P<run_number>\d+)_)?
            ONTPromethION_
            (?P<archive_type>\w+)
            \.(?P<extension>html|tsv|txt|tar|csv|json|md)
        ",
        fields: &[FLOWCELL_ID, FACILITY, RUN_NUMBER, ARCHIVE_TYPE, EXTENSION],
        samples: &[
            "PAK12345_AM_AGRF_ONTPromethION_report.html",
            "PAG54321_AM_BRF_Run1_ONTPromethION_barcode_alignment.tsv",
        ],
    },
    PatternDef {
        artifact_class: ArtifactClass::MetagenomicsNovaseq,
        priority: 20,
        regex: r"
            (?P<library_id>\d{4,6})_
            AM_MGE_
            (?P<vendor>AGRF|UNSW)_
            (?P<flowcell_id>[A-Z0-9]{9})_
            (?P<index>[ACGT]+(?:-[ACGT]+)?)_
            (?P<lane>L\d{3})_
            (?P<read>[RI][12])
            \.fastq\.gz
        ",
        fields: &[
            LIBRARY_ID,
            FieldSpec::new("vendor", FieldType::FacilityId),
            FLOWCELL_ID,
            FieldSpec::new("index", FieldType::IndexSequence),
            FieldSpec::new("lane", FieldType::LaneTag),
            FieldSpec::new("read", FieldType::ReadTag),
        ],
        samples: &[
            "138515_AM_MGE_AGRF_22KM7FLT3_CACAGCGGTC-ATTCCTATTG_L007_R1.fastq.gz",
            "138516_AM_MGE_UNSW_HCLMYDSX3_ACGTACGT_L001_I2.fastq.gz",
        ],
    },
    // Generic facility sheet. Library-prefixed PacBio sheets also match this,
    // so it must stay below pacbio_hifi_metadata_sheet.
    PatternDef {
        artifact_class: ArtifactClass::MetadataSheet,
        priority: 10,
        regex: r"
            (?:\w+_)?
            (?P<facility>AGRF|BRF|UNSW)_
            (?:PacBio_)?
            (?P<flowcell_id>[A-Za-z0-9]{8,10})
            [._]metadata\.xlsx
        ",
        fields: &[FACILITY, FLOWCELL_ID],
        samples: &[
            "CANETOAD_BRF_DA052894_metadata.xlsx",
            "AM_UNSW_HFV2KDRX3.metadata.xlsx",
            "AGRF_22KM7FLT3_metadata.xlsx",
        ],
    },
];
