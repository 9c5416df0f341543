// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, bail};
use bpa_ingest::models::{Project, TracingSink};
use bpa_ingest::utils::logging::{
    format_error, format_info, format_issue_count, format_step, format_success,
};
use bpa_ingest::{
    IngestConfig, IngestRun, JsonExporter, ManifestParser, PatternRegistry, Validator,
    classifier_for,
};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "bpa-ingest")]
#[command(version)]
#[command(about = "Classify sequencing deliverables and parse md5 manifests", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every pattern table and run the sample self-check
    Check,

    /// Classify basenames and print one json line per name
    Classify {
        #[arg(short, long, env = "BPA_INGEST_PROJECT")]
        project: Project,

        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Parse one md5 manifest
    Manifest {
        #[arg(short, long, env = "BPA_INGEST_PROJECT")]
        project: Project,

        file: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scan a delivery directory, parsing manifests and classifying files
    Scan {
        #[arg(short, long, env = "BPA_INGEST_PROJECT")]
        project: Project,

        dir: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    bpa_ingest::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        IngestConfig::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        IngestConfig::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            IngestConfig::default_config()
        })
    };

    let registry = PatternRegistry::builtin().context("Pattern registry failed its self-check")?;

    match cli.command {
        Commands::Check => cmd_check(&registry),
        Commands::Classify { project, names } => cmd_classify(&config, &registry, project, &names),
        Commands::Manifest {
            project,
            file,
            output,
        } => cmd_manifest(&config, &registry, project, &file, output.as_deref()),
        Commands::Scan {
            project,
            dir,
            output,
        } => cmd_scan(&config, &registry, project, &dir, output.as_deref(), cli.color),
    }
}

fn cmd_check(registry: &PatternRegistry) -> Result<()> {
    registry.self_check()?;

    for project in registry.projects() {
        let patterns = registry.patterns_for(project)?;
        let samples: usize = patterns.iter().map(|p| p.samples().len()).sum();
        println!(
            "{}",
            format_success(&format!(
                "{}: {} patterns, {} samples",
                project,
                patterns.len(),
                samples
            ))
        );
    }
    println!(
        "{}",
        format_info("base: positional decoder, no pattern table")
    );

    Ok(())
}

fn cmd_classify(
    config: &IngestConfig,
    registry: &PatternRegistry,
    project: Project,
    names: &[String],
) -> Result<()> {
    let classifier = classifier_for(project, registry, config.legacy)?;

    let mut misses = 0;
    for name in names {
        match classifier.classify_basename(name) {
            Ok(classification) => {
                if classification.is_miss() {
                    misses += 1;
                }
                if let Some(record) = classification.record()
                    && let Some(note) = classifier.review(name, record)
                {
                    warn!("{}: {}", name, note);
                }
                println!("{}", serde_json::to_string(&classification)?);
            }
            Err(drift) => bail!("{}", drift),
        }
    }

    if misses > 0 {
        warn!("{} of {} names did not match a {} pattern", misses, names.len(), project);
    }
    Ok(())
}

fn cmd_manifest(
    config: &IngestConfig,
    registry: &PatternRegistry,
    project: Project,
    file: &Path,
    output: Option<&Path>,
) -> Result<()> {
    Validator::validate_file_path(file)?;
    let classifier = classifier_for(project, registry, config.legacy)?;

    let outcome = ManifestParser::new(&*classifier)
        .parse(file)
        .with_context(|| format!("Failed to parse manifest {}", file.display()))?;
    outcome.report_issues(&mut TracingSink);

    println!(
        "{} {} records, {}",
        format_step(1, 1, &file.display().to_string()),
        outcome.records.len(),
        format_issue_count(outcome.issues.len())
    );

    let dir = output.unwrap_or(config.output.directory.as_path());
    let exported = JsonExporter::new(dir)?.export_outcome(&outcome, config.output.pretty)?;
    println!(
        "{}",
        format_success(&format!("Exported {} to {}", exported.files.join(", "), dir.display()))
    );
    Ok(())
}

fn cmd_scan(
    config: &IngestConfig,
    registry: &PatternRegistry,
    project: Project,
    dir: &Path,
    output: Option<&Path>,
    color: bool,
) -> Result<()> {
    let start_time = Instant::now();
    let classifier = classifier_for(project, registry, config.legacy)?;

    let report = IngestRun::new(&*classifier, config.scan.clone())
        .with_progress(color)
        .run(dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    report.report_issues(&mut TracingSink);

    let out_dir = output.unwrap_or(config.output.directory.as_path());
    let exported = JsonExporter::new(out_dir)?.export_report(&report, config.output.pretty)?;

    println!("\n{}", "=".repeat(60));
    println!("{}", format_step(1, 3, &format!("Manifests parsed: {}", report.stats.manifests_processed)));
    println!("{}", format_step(2, 3, &format!("Records emitted: {}", report.stats.records_emitted)));
    println!("{}", format_step(3, 3, &format!("Files classified: {}", report.stats.files_classified)));
    println!("Manifest success rate: {:.1}%", report.stats.success_rate());
    println!("Issues: {}", format_issue_count(exported.total_issues));
    println!("Elapsed: {:.2}s", start_time.elapsed().as_secs_f64());
    println!("{}", "=".repeat(60));
    println!(
        "{}",
        format_success(&format!("Exported to {}", out_dir.display()))
    );

    for failed in &report.failed_manifests {
        eprintln!(
            "{}",
            format_error(&format!("{}: {}", failed.path.display(), failed.error))
        );
    }
    if !report.failed_manifests.is_empty() {
        bail!(
            "{} manifest(s) could not be read",
            report.failed_manifests.len()
        );
    }
    Ok(())
}
