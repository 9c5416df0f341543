// file: src/registry/mod.rs
// description: per-project catalog of compiled filename patterns with startup self-check
// reference: https://docs.rs/regex

pub mod collaborations;
pub mod forest;
pub mod ipm;

use crate::error::{IngestError, Result, SchemaDrift};
use crate::models::{ArtifactClass, FieldMap, FieldSpec, Project};
use regex::{Captures, Regex};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Declarative pattern as authored in a project table.
///
/// `regex` is written in verbose mode and is matched against the whole
/// basename; the registry adds the anchors. `samples` are basenames that must
/// resolve to this pattern's class once priorities are applied.
#[derive(Debug, Clone, Copy)]
pub struct PatternDef {
    pub artifact_class: ArtifactClass,
    pub priority: u16,
    pub regex: &'static str,
    pub fields: &'static [FieldSpec],
    pub samples: &'static [&'static str],
}

/// Project tables compiled into the builtin registry.
pub fn builtin_tables() -> Vec<(Project, &'static [PatternDef])> {
    vec![
        (Project::Collaborations, collaborations::PATTERNS),
        (Project::Forest, forest::PATTERNS),
        (Project::Ipm, ipm::PATTERNS),
    ]
}

#[derive(Debug, Clone)]
pub struct Pattern {
    project: Project,
    artifact_class: ArtifactClass,
    priority: u16,
    regex: Regex,
    fields: &'static [FieldSpec],
    samples: &'static [&'static str],
}

impl Pattern {
    pub fn compile(project: Project, def: &PatternDef) -> Result<Self> {
        let source = format!("^(?x:{}\n)$", def.regex);
        let regex = Regex::new(&source).map_err(|e| {
            IngestError::Registry(format!(
                "{}/{}: invalid regex: {}",
                project, def.artifact_class, e
            ))
        })?;

        let pattern = Self {
            project,
            artifact_class: def.artifact_class,
            priority: def.priority,
            regex,
            fields: def.fields,
            samples: def.samples,
        };
        pattern.check_schema()?;
        Ok(pattern)
    }

    pub fn project(&self) -> Project {
        self.project
    }

    pub fn artifact_class(&self) -> ArtifactClass {
        self.artifact_class
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn samples(&self) -> &'static [&'static str] {
        self.samples
    }

    /// Full-match `basename` and type every schema field.
    ///
    /// `None` is a miss. `Some(Err(_))` means the regex accepted text the
    /// schema rejects.
    pub fn extract(&self, basename: &str) -> Option<std::result::Result<FieldMap, SchemaDrift>> {
        let captures = self.regex.captures(basename)?;
        Some(self.typed_fields(basename, &captures))
    }

    fn typed_fields(
        &self,
        basename: &str,
        captures: &Captures<'_>,
    ) -> std::result::Result<FieldMap, SchemaDrift> {
        let mut fields = FieldMap::new();

        for spec in self.fields {
            let value = match captures.name(spec.name) {
                Some(m) => Some(
                    spec.kind
                        .convert(m.as_str())
                        .map_err(|reason| SchemaDrift::new(basename, spec.name, m.as_str(), reason))?,
                ),
                None => None,
            };
            fields.insert(spec.name.to_string(), value);
        }

        Ok(fields)
    }

    // capture groups and declared fields must name the same set
    fn check_schema(&self) -> Result<()> {
        let captured: HashSet<&str> = self.regex.capture_names().flatten().collect();
        let mut declared = HashSet::new();

        for spec in self.fields {
            if !declared.insert(spec.name) {
                return Err(self.registry_error(format!("field `{}` declared twice", spec.name)));
            }
            if !captured.contains(spec.name) {
                return Err(self.registry_error(format!(
                    "field `{}` has no capture group",
                    spec.name
                )));
            }
        }

        if let Some(extra) = captured.iter().find(|name| !declared.contains(*name)) {
            return Err(self.registry_error(format!("capture `{}` is not in the schema", extra)));
        }

        Ok(())
    }

    fn registry_error(&self, message: String) -> IngestError {
        IngestError::Registry(format!(
            "{}/{}: {}",
            self.project, self.artifact_class, message
        ))
    }
}

/// Immutable after construction; share it by reference.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    projects: BTreeMap<Project, Vec<Pattern>>,
}

impl PatternRegistry {
    /// Compile the builtin project tables and run the self-check.
    pub fn builtin() -> Result<Self> {
        Self::from_tables(&builtin_tables())
    }

    pub fn from_tables(tables: &[(Project, &'static [PatternDef])]) -> Result<Self> {
        let mut projects = BTreeMap::new();

        for (project, defs) in tables {
            if projects.contains_key(project) {
                return Err(IngestError::Registry(format!(
                    "project {} registered twice",
                    project
                )));
            }

            let mut patterns = defs
                .iter()
                .map(|def| Pattern::compile(*project, def))
                .collect::<Result<Vec<_>>>()?;
            patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
            projects.insert(*project, patterns);
        }

        let registry = Self { projects };
        registry.self_check()?;
        Ok(registry)
    }

    /// Patterns for `project`, highest priority first.
    pub fn patterns_for(&self, project: Project) -> Result<&[Pattern]> {
        self.projects
            .get(&project)
            .map(Vec::as_slice)
            .ok_or_else(|| IngestError::UnknownProject(project.to_string()))
    }

    pub fn projects(&self) -> impl Iterator<Item = Project> + '_ {
        self.projects.keys().copied()
    }

    pub fn self_check(&self) -> Result<()> {
        for (project, patterns) in &self.projects {
            let mut classes = HashSet::new();
            let mut priorities = HashSet::new();

            for pattern in patterns {
                if !classes.insert(pattern.artifact_class) {
                    return Err(pattern.registry_error("artifact class registered twice".into()));
                }
                if !priorities.insert(pattern.priority) {
                    return Err(pattern.registry_error(format!(
                        "priority {} is not unique",
                        pattern.priority
                    )));
                }
            }

            for pattern in patterns {
                for sample in pattern.samples {
                    check_sample(patterns, pattern, sample)?;
                }
            }

            debug!("Registry check passed for {} ({} patterns)", project, patterns.len());
        }

        Ok(())
    }
}

fn check_sample(patterns: &[Pattern], owner: &Pattern, sample: &str) -> Result<()> {
    let winner = patterns.iter().find_map(|p| p.extract(sample).map(|r| (p, r)));

    match winner {
        Some((pattern, Ok(_))) if pattern.artifact_class == owner.artifact_class => Ok(()),
        Some((pattern, Ok(_))) => Err(owner.registry_error(format!(
            "sample {} resolves to {}",
            sample, pattern.artifact_class
        ))),
        Some((_, Err(drift))) => Err(owner.registry_error(drift.to_string())),
        None => Err(owner.registry_error(format!("sample {} does not match", sample))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldType;

    const LIB: &[FieldSpec] = &[FieldSpec::new("library_id", FieldType::LibraryId)];

    #[test]
    fn test_builtin_registry_passes_self_check() {
        let registry = PatternRegistry::builtin().unwrap();
        let projects: Vec<Project> = registry.projects().collect();
        assert_eq!(
            projects,
            vec![Project::Collaborations, Project::Forest, Project::Ipm]
        );
    }

    #[test]
    fn test_patterns_ordered_by_priority() {
        let registry = PatternRegistry::builtin().unwrap();
        for project in registry.projects().collect::<Vec<_>>() {
            let patterns = registry.patterns_for(project).unwrap();
            assert!(
                patterns
                    .windows(2)
                    .all(|pair| pair[0].priority() > pair[1].priority())
            );
            assert!(patterns.iter().all(|p| p.project() == project));
        }
    }

    #[test]
    fn test_unknown_project() {
        let registry = PatternRegistry::builtin().unwrap();
        assert!(matches!(
            registry.patterns_for(Project::Base),
            Err(IngestError::UnknownProject(name)) if name == "base"
        ));
    }

    #[test]
    fn test_schema_must_cover_captures() {
        static DEFS: &[PatternDef] = &[PatternDef {
            artifact_class: ArtifactClass::MetadataSheet,
            priority: 1,
            regex: r"(?P<library_id>\d{4})_(?P<lane>L\d{3})\.txt",
            fields: LIB,
            samples: &[],
        }];
        let err = PatternRegistry::from_tables(&[(Project::Forest, DEFS)]).unwrap_err();
        assert!(err.to_string().contains("capture `lane` is not in the schema"));
    }

    #[test]
    fn test_captures_must_cover_schema() {
        static DEFS: &[PatternDef] = &[PatternDef {
            artifact_class: ArtifactClass::MetadataSheet,
            priority: 1,
            regex: r"\d{4}\.txt",
            fields: LIB,
            samples: &[],
        }];
        let err = PatternRegistry::from_tables(&[(Project::Forest, DEFS)]).unwrap_err();
        assert!(err.to_string().contains("has no capture group"));
    }

    #[test]
    fn test_duplicate_priority_rejected() {
        static DEFS: &[PatternDef] = &[
            PatternDef {
                artifact_class: ArtifactClass::MetadataSheet,
                priority: 5,
                regex: r"(?P<library_id>\d{4})\.txt",
                fields: LIB,
                samples: &[],
            },
            PatternDef {
                artifact_class: ArtifactClass::PacbioHifiRevioPdf,
                priority: 5,
                regex: r"(?P<library_id>\d{4})\.pdf",
                fields: LIB,
                samples: &[],
            },
        ];
        let err = PatternRegistry::from_tables(&[(Project::Forest, DEFS)]).unwrap_err();
        assert!(matches!(err, IngestError::Registry(_)));
        assert!(err.to_string().contains("priority 5 is not unique"));
    }

    #[test]
    fn test_duplicate_class_rejected() {
        static DEFS: &[PatternDef] = &[
            PatternDef {
                artifact_class: ArtifactClass::MetadataSheet,
                priority: 2,
                regex: r"(?P<library_id>\d{4})\.txt",
                fields: LIB,
                samples: &[],
            },
            PatternDef {
                artifact_class: ArtifactClass::MetadataSheet,
                priority: 1,
                regex: r"(?P<library_id>\d{4})\.csv",
                fields: LIB,
                samples: &[],
            },
        ];
        let err = PatternRegistry::from_tables(&[(Project::Forest, DEFS)]).unwrap_err();
        assert!(err.to_string().contains("registered twice"));
    }

    #[test]
    fn test_priority_inversion_caught_by_samples() {
        // the generic pattern outranks the specific one, so the sample is stolen
        static DEFS: &[PatternDef] = &[
            PatternDef {
                artifact_class: ArtifactClass::MetadataSheet,
                priority: 2,
                regex: r"\w+_metadata\.xlsx",
                fields: &[],
                samples: &[],
            },
            PatternDef {
                artifact_class: ArtifactClass::PacbioHifiMetadataSheet,
                priority: 1,
                regex: r"(?P<library_id>\d{4,6})_metadata\.xlsx",
                fields: LIB,
                samples: &["350728_metadata.xlsx"],
            },
        ];
        let err = PatternRegistry::from_tables(&[(Project::Collaborations, DEFS)]).unwrap_err();
        assert!(err.to_string().contains("resolves to metadata_sheet"));
    }

    #[test]
    fn test_invalid_regex_is_registry_error() {
        static DEFS: &[PatternDef] = &[PatternDef {
            artifact_class: ArtifactClass::MetadataSheet,
            priority: 1,
            regex: r"(?P<library_id>\d{4}",
            fields: LIB,
            samples: &[],
        }];
        let err = PatternRegistry::from_tables(&[(Project::Ipm, DEFS)]).unwrap_err();
        assert!(err.to_string().contains("invalid regex"));
    }

    #[test]
    fn test_match_is_anchored_at_both_ends() {
        let def = PatternDef {
            artifact_class: ArtifactClass::MetadataSheet,
            priority: 1,
            regex: r"(?P<library_id>\d{4})\.txt",
            fields: LIB,
            samples: &[],
        };
        let pattern = Pattern::compile(Project::Ipm, &def).unwrap();
        assert!(pattern.extract("1234.txt").is_some());
        assert!(pattern.extract("x1234.txt").is_none());
        assert!(pattern.extract("1234.txt.bak").is_none());
    }
}
