// Onboarding document validation from the command line

use clap::{Parser, Subcommand};
use docvalidator::{
    history::ValidationHistory,
    models::{DocumentSubmission, FileDescriptor, FormData, StageStatus, ValidationReport},
    utils::DocumentError,
    DocumentValidator, ValidatorConfig,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docvalidator", about = "Validate onboarding documents", version)]
struct Cli {
    /// JSON config file overriding the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON object of form field values to cross-check against
    #[arg(long, global = true)]
    form: Option<PathBuf>,

    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a single document
    Validate {
        #[arg(long)]
        name: String,
        /// MIME type, e.g. application/pdf
        #[arg(long)]
        mime: String,
        /// Size in bytes
        #[arg(long)]
        size: u64,
        #[arg(long)]
        document_type: String,
    },
    /// Validate every document listed in a JSON manifest
    Batch {
        #[arg(long)]
        manifest: PathBuf,
    },
}

fn print_detailed_report(report: &ValidationReport) {
    println!("\n===============================================");
    println!("      DOCUMENT VALIDATION DETAILED REPORT");
    println!("===============================================\n");

    println!("DOCUMENT INFORMATION:");
    println!("  Document ID: {}", report.document_id);
    println!("  Document Type: {}", report.document_type);
    println!("  File Name: {}", report.document_name);
    println!("  Uploaded At: {}", report.uploaded_at.to_rfc3339());
    println!("  Processing Time: {} ms", report.processing_time);

    if !report.extracted_data.is_empty() {
        println!("\nEXTRACTED DATA:");
        for (field, value) in &report.extracted_data {
            println!("  {}: {}", field, value);
        }
    }

    if let Some(checks) = &report.checks {
        println!("\nVALIDATION STEPS:");
        for (index, (stage, result)) in checks.iter().enumerate() {
            let label = match result.status {
                StageStatus::Pass => "PASSED",
                StageStatus::Warning => "WARNING",
                StageStatus::Fail => "FAILED",
                StageStatus::Pending => "SKIPPED",
            };
            println!(
                "  {}. {}: {} ({}%) - {}",
                index + 1,
                stage,
                label,
                result.confidence,
                result.message
            );
        }
    }

    if !report.field_comparisons.is_empty() {
        println!("\nFIELD COMPARISONS:");
        for comparison in &report.field_comparisons {
            println!(
                "  - {}: form '{}' vs document '{}' -> {}",
                comparison.field_name,
                comparison.form_value,
                comparison.document_value,
                if comparison.matched { "MATCH" } else { "MISMATCH" }
            );
        }
    }

    if !report.issues.is_empty() {
        println!("\nISSUES FOUND:");
        for issue in &report.issues {
            println!(
                "  - [{:?}/{:?}] {}",
                issue.severity, issue.category, issue.message
            );
            if let Some(suggestion) = &issue.suggestion {
                println!("      suggestion: {}", suggestion);
            }
        }
    }

    if !report.recommendations.is_empty() {
        println!("\nRECOMMENDATIONS:");
        for recommendation in &report.recommendations {
            println!("  - {}", recommendation);
        }
    }

    if report.has_errors() {
        println!("\nThis document must be corrected and uploaded again.");
    } else if report.has_warnings() {
        println!("\nThis document needs manual review.");
    }

    println!(
        "\nDocument validation result: {} ({}% confidence)",
        report.status, report.overall_confidence
    );
}

fn load_form(path: Option<&Path>) -> Result<FormData, DocumentError> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        }
        None => Ok(FormData::new()),
    }
}

fn load_manifest(path: &Path) -> Result<Vec<DocumentSubmission>, DocumentError> {
    let contents = std::fs::read_to_string(path)?;
    let submissions: Vec<DocumentSubmission> = serde_json::from_str(&contents)?;
    if submissions.is_empty() {
        return Err(DocumentError::MalformedInput(format!(
            "manifest {} lists no documents",
            path.display()
        )));
    }
    Ok(submissions)
}

fn emit(report: &ValidationReport, json: bool) -> Result<(), DocumentError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_detailed_report(report);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), DocumentError> {
    let config = match &cli.config {
        Some(path) => ValidatorConfig::from_file(path)?,
        None => ValidatorConfig::default(),
    };
    let form_data = load_form(cli.form.as_deref())?;
    let validator = DocumentValidator::new(config);
    log::debug!("using config {:?}", validator.config());
    let mut history = ValidationHistory::new();

    match cli.command {
        Command::Validate {
            name,
            mime,
            size,
            document_type,
        } => {
            let file = FileDescriptor::new(name, mime, size);
            let report = validator.validate(&file, &document_type, &form_data).await;
            emit(&report, cli.json)?;
            history.record(report);
        }
        Command::Batch { manifest } => {
            let submissions = load_manifest(&manifest)?;
            for report in validator.validate_batch(&submissions, &form_data).await {
                emit(&report, cli.json)?;
                history.record(report);
            }

            let summary = history.summary();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("\nBATCH SUMMARY:");
                println!("  Documents: {}", summary.total);
                println!(
                    "  Valid: {}  Warning: {}  Invalid: {}  Error: {}",
                    summary.valid, summary.warning, summary.invalid, summary.error
                );
                println!("  Average confidence: {}%", summary.average_confidence);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error validating documents: {}", err);
        std::process::exit(1);
    }
}
