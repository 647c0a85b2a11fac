//! MRI Report Core - command-line front end
//!
//! Turns classifier output into PDF reports:
//! - Basic text report from a classification result
//! - Detailed report with an embedded visualization snapshot
//! - Tier lookup, input schema and effective configuration

use clap::{ArgGroup, Args, Parser, Subcommand};
use mr_common::{classification_schema, ClassificationResult, ConfidenceTier, OutputFormat, SCHEMA_VERSION};
use mr_core::config::{load_config, ConfigOptions, ResolvedConfig};
use mr_core::exit_codes::ExitCode;
use mr_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use mr_report::{
    ChartRegion, ExportedReport, FileRegion, ReportGenerator, ReportVariant, SnapshotSource,
};
use std::path::PathBuf;
use tracing::{debug, error};

/// MRI Report Core - clinical PDF reports from classification results
#[derive(Parser)]
#[command(name = "mr-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Report configuration file (TOML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory reports are written to
    #[arg(long, global = true, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PDF report
    Report(ReportArgs),
    /// Print the confidence tier for a value
    Tier(TierArgs),
    /// Print the JSON schema of the classification input
    Schema,
    /// Inspect configuration
    Config(ConfigArgs),
    /// Print version information
    Version,
}

#[derive(Args)]
struct ReportArgs {
    #[command(subcommand)]
    variant: ReportCommand,
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Text-only report
    Basic(ResultArgs),
    /// Report with an embedded visualization snapshot
    Detailed(DetailedArgs),
}

/// Classification result, from a file or inline
#[derive(Args, Debug)]
struct ResultArgs {
    /// Classifier output JSON ({"class": ..., "confidence": ...})
    #[arg(long, conflicts_with_all = ["label", "confidence"])]
    result: Option<PathBuf>,

    /// Diagnostic label
    #[arg(long, requires = "confidence")]
    label: Option<String>,

    /// Confidence percentage
    #[arg(long, requires = "label", allow_negative_numbers = true)]
    confidence: Option<f64>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("region").required(true).args(["snapshot", "render_chart"])))]
struct DetailedArgs {
    #[command(flatten)]
    result: ResultArgs,

    /// Rendered visualization (PNG or JPEG)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Render the built-in confidence chart
    #[arg(long)]
    render_chart: bool,
}

#[derive(Args)]
struct TierArgs {
    /// Confidence percentage
    #[arg(allow_negative_numbers = true)]
    confidence: f64,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_level = LogLevel::from_verbosity(cli.global.quiet, cli.global.verbose);
    let log_format = LogFormat::for_payload(cli.global.format);
    init_logging(&LogConfig::from_env(log_level, log_format));

    let exit_code = match cli.command {
        Commands::Report(args) => run_report(&cli.global, &args),
        Commands::Tier(args) => run_tier(&cli.global, &args),
        Commands::Schema => run_schema(&cli.global),
        Commands::Config(args) => run_config(&cli.global, &args),
        Commands::Version => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_report(global: &GlobalOpts, args: &ReportArgs) -> ExitCode {
    let command = match &args.variant {
        ReportCommand::Basic(_) => "report basic",
        ReportCommand::Detailed(_) => "report detailed",
    };

    let resolved = match resolve_config(global) {
        Ok(resolved) => resolved,
        Err((code, message)) => return output_error(global, command, code, "config", &message),
    };
    let generator = ReportGenerator::new(resolved.config);

    let result_args = match &args.variant {
        ReportCommand::Basic(r) => r,
        ReportCommand::Detailed(d) => &d.result,
    };
    let result = match read_result(result_args) {
        Ok(result) => result,
        Err((code, message)) => return output_error(global, command, code, "input", &message),
    };

    let exported = match &args.variant {
        ReportCommand::Basic(_) => generator.export_basic_report(result.as_ref()),
        ReportCommand::Detailed(detailed) => {
            let region: Option<Box<dyn SnapshotSource>> = match (&detailed.snapshot, &result) {
                (Some(path), _) => Some(Box::new(FileRegion::new(path)) as Box<dyn SnapshotSource>),
                (None, Some(r)) if detailed.render_chart => {
                    let scale = generator.config().snapshot.chart_scale;
                    Some(Box::new(ChartRegion::new(r.clone(), scale)) as Box<dyn SnapshotSource>)
                }
                _ => None,
            };
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    return output_error(
                        global,
                        command,
                        ExitCode::InternalError,
                        "internal",
                        &format!("failed to start runtime: {}", e),
                    )
                }
            };
            runtime.block_on(generator.export_detailed_report(result.as_ref(), region.as_deref()))
        }
    };

    let exported = match exported {
        Ok(exported) => exported,
        Err(e) => {
            error!(error = %e, "Report generation failed");
            return output_error(global, command, ExitCode::from(&e), e.category(), &e.to_string());
        }
    };

    let path = match exported.write_to_dir(&global.output_dir) {
        Ok(path) => path,
        Err(e) => {
            return output_error(global, command, ExitCode::from(&e), e.category(), &e.to_string())
        }
    };

    let Some(result) = result else {
        return output_error(
            global,
            command,
            ExitCode::InternalError,
            "internal",
            "report exported without a classification result",
        );
    };
    output_report(global, command, &exported, &path, &result);
    ExitCode::Clean
}

fn run_tier(global: &GlobalOpts, args: &TierArgs) -> ExitCode {
    let tier = ConfidenceTier::from_confidence(args.confidence);
    match global.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "confidence": args.confidence,
                "tier": tier,
                "label": tier.label(),
                "color": tier.hex_color(),
            });
            print_json(&output);
        }
        OutputFormat::Summary => println!("{}: {}", args.confidence, tier.label()),
        OutputFormat::Md => {
            println!("| Confidence | Tier | Colour |");
            println!("|---|---|---|");
            println!("| {}% | {} | `{}` |", args.confidence, tier.label(), tier.hex_color());
        }
    }
    ExitCode::Clean
}

fn run_schema(global: &GlobalOpts) -> ExitCode {
    let schema = classification_schema();
    match global.format {
        OutputFormat::Summary => println!("ClassificationResult schema (version {})", SCHEMA_VERSION),
        _ => print_json(&schema),
    }
    ExitCode::Clean
}

fn run_config(global: &GlobalOpts, args: &ConfigArgs) -> ExitCode {
    match args.action {
        ConfigCommand::Show => {
            let resolved = match resolve_config(global) {
                Ok(resolved) => resolved,
                Err((code, message)) => {
                    return output_error(global, "config show", code, "config", &message)
                }
            };
            match global.format {
                OutputFormat::Summary => match resolved.source.path() {
                    Some(path) => println!("config: {}", path.display()),
                    None => println!("config: built-in defaults"),
                },
                _ => {
                    let output = serde_json::json!({
                        "schema_version": SCHEMA_VERSION,
                        "source": resolved.source,
                        "config": resolved.config,
                    });
                    print_json(&output);
                }
            }
            ExitCode::Clean
        }
    }
}

fn print_version(global: &GlobalOpts) {
    match global.format {
        OutputFormat::Json => {
            let version_info = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "mr_core_version": env!("CARGO_PKG_VERSION"),
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            });
            print_json(&version_info);
        }
        _ => {
            println!("mr-core {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn resolve_config(global: &GlobalOpts) -> Result<ResolvedConfig, (ExitCode, String)> {
    let options = ConfigOptions {
        config_path: global.config.clone(),
    };
    load_config(&options).map_err(|e| (ExitCode::from(&e), e.to_string()))
}

/// Read the result from `--result` or `--label/--confidence`. `None` if neither.
fn read_result(args: &ResultArgs) -> Result<Option<ClassificationResult>, (ExitCode, String)> {
    if let Some(path) = &args.result {
        let content = std::fs::read_to_string(path).map_err(|e| {
            (
                ExitCode::IoError,
                format!("cannot read {}: {}", path.display(), e),
            )
        })?;
        let result = ClassificationResult::from_json(&content).map_err(|e| {
            (
                ExitCode::ArgsError,
                format!("invalid result in {}: {}", path.display(), e),
            )
        })?;
        debug!(path = %path.display(), label = %result.label, "Loaded classification result");
        return Ok(Some(result));
    }
    match (&args.label, args.confidence) {
        (Some(label), Some(confidence)) => Ok(Some(ClassificationResult::new(label.clone(), confidence))),
        _ => Ok(None),
    }
}

fn output_report(
    global: &GlobalOpts,
    command: &str,
    exported: &ExportedReport,
    path: &std::path::Path,
    result: &ClassificationResult,
) {
    let run_id = generate_run_id();
    match global.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "command": command,
                "status": "ok",
                "report": {
                    "file_name": exported.file_name,
                    "path": path.display().to_string(),
                    "variant": exported.variant,
                    "pages": exported.pages,
                    "bytes": exported.byte_len,
                },
                "result": {
                    "class": result.label,
                    "confidence": result.confidence,
                    "tier": result.tier(),
                    "severity": result.severity().to_string(),
                },
            });
            print_json(&output);
        }
        OutputFormat::Summary => {
            println!(
                "[{}] {}: wrote {} ({} pages, {} bytes)",
                run_id,
                command,
                path.display(),
                exported.pages,
                exported.byte_len
            );
        }
        OutputFormat::Md => {
            let title = match exported.variant {
                ReportVariant::Basic => "Basic report",
                ReportVariant::Detailed => "Detailed report",
            };
            println!("## {}", title);
            println!();
            println!("| Field | Value |");
            println!("|---|---|");
            println!("| File | `{}` |", path.display());
            println!("| Pages | {} |", exported.pages);
            println!("| Classification | {} |", result.label);
            println!("| Confidence | {} ({}) |", result.confidence_display(), result.tier().label());
        }
    }
}

fn output_error(
    global: &GlobalOpts,
    command: &str,
    code: ExitCode,
    category: &str,
    message: &str,
) -> ExitCode {
    match global.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "command": command,
                "status": "error",
                "error": {
                    "code": code.code_name(),
                    "exit_code": code.as_i32(),
                    "category": category,
                    "message": message,
                },
            });
            print_json(&output);
        }
        _ => eprintln!("mr-core {}: {} [{}]", command, message, code),
    }
    code
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("failed to serialize output: {}", e),
    }
}
