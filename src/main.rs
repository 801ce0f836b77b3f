// Zengin Validator - CLI
// Reads each file fully, validates it, renders the report as text, JSON or CSV
//
// Exit codes: 0 all files valid, 1 some file invalid, 2 operational failure

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info, warn};
use zengin_validator::{AppConfig, ValidationEngine, ValidationReport};

#[derive(Debug, Parser)]
#[command(
    name = "zengin-validator",
    version,
    about = "Validate Zengin bank-transfer batch files"
)]
struct Args {
    /// Files to validate
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON document per file
    Json,
    /// One CSV row per diagnostic
    Csv,
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zengin_validator={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

/// Returns whether every file was valid
///
/// Files that cannot be read do not stop the others: every readable file is
/// still reported, then the run fails as an operational error.
fn run(args: &Args) -> Result<bool> {
    let config = AppConfig::load(args.config.as_deref())?;
    debug!("Configuration: {:?}", config);

    let engine = ValidationEngine::with_config(config.validator.clone());
    let (results, failures) = validate_files(&engine, &args.files, config.max_input_bytes);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => write_text(&mut out, &results)?,
        OutputFormat::Json => write_json(&mut out, &results)?,
        OutputFormat::Csv => write_csv(&mut out, &results)?,
    }
    out.flush()?;

    if !failures.is_empty() {
        for (file, e) in &failures {
            eprintln!("Error: {}: {:#}", file, e);
        }
        bail!(
            "{} of {} files could not be validated",
            failures.len(),
            args.files.len()
        );
    }

    Ok(results.iter().all(|(_, report)| report.valid))
}

type FileFailure = (String, anyhow::Error);

/// Validate each file in order, keeping read failures apart from reports
fn validate_files(
    engine: &ValidationEngine,
    paths: &[PathBuf],
    max_bytes: usize,
) -> (Vec<(String, ValidationReport)>, Vec<FileFailure>) {
    let mut results = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();

    for path in paths {
        let file = path.display().to_string();
        let content = match read_input(path, max_bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!("{}: skipped: {:#}", file, e);
                failures.push((file, e));
                continue;
            }
        };

        let report = engine.validate(&content);
        if report.valid {
            info!("{}: valid", file);
        } else {
            warn!("{}: {} errors", file, report.error_count());
        }

        results.push((file, report));
    }

    (results, failures)
}

/// Read a whole file, refusing oversized or non-UTF-8 input
fn read_input(path: &Path, max_bytes: usize) -> Result<String> {
    let size = fs::metadata(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?
        .len();

    if size > max_bytes as u64 {
        bail!(
            "{} is {} bytes, larger than the {} byte limit",
            path.display(),
            size,
            max_bytes
        );
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8 text", path.display()))
}

// ============================================================================
// RENDERERS
// ============================================================================

fn write_text(out: &mut impl Write, results: &[(String, ValidationReport)]) -> Result<()> {
    for (file, report) in results {
        writeln!(out, "{}: {}", file, if report.valid { "OK" } else { "FAILED" })?;
        for diag in &report.diagnostics {
            writeln!(out, "  {}", diag)?;
        }
        writeln!(out, "  {}", report.summary())?;
    }
    Ok(())
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a str,
    report: &'a ValidationReport,
}

fn write_json(out: &mut impl Write, results: &[(String, ValidationReport)]) -> Result<()> {
    for (file, report) in results {
        serde_json::to_writer_pretty(&mut *out, &FileReport { file, report })?;
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct DiagnosticRow<'a> {
    file: &'a str,
    kind: &'a str,
    line: usize,
    field: Option<&'a str>,
    message: &'a str,
    severity: &'a str,
}

fn write_csv(out: &mut impl Write, results: &[(String, ValidationReport)]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    writer.write_record(["file", "kind", "line", "field", "message", "severity"])?;
    for (file, report) in results {
        for diag in &report.diagnostics {
            writer.serialize(DiagnosticRow {
                file,
                kind: diag.kind.as_str(),
                line: diag.line,
                field: diag.field.as_deref(),
                message: &diag.message,
                severity: diag.severity.as_str(),
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
