//! Greatify - printable HTML reports from a library snapshot
//!
//! The main entry point for the `greatify` binary, handling:
//! - Report generation from a JSON library snapshot
//! - Configuration validation
//! - JSON Schema output for the input formats

use clap::{Args, Parser, Subcommand, ValueEnum};
use gr_common::{ItemId, SnapshotStore, SNAPSHOT_SCHEMA_VERSION};
use gr_config::{load_config, LoadedConfig, CONFIG_SCHEMA_VERSION};
use gr_core::display::{DataUrlSink, FileSink, ReportSink, StdoutSink};
use gr_core::exit_codes::ExitCode;
use gr_core::logging::{event_names, generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use gr_core::schema::{available_schemas, format_schema, generate_all_schemas, generate_schema, SchemaFormat};
use gr_report::ReportGenerator;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, info_span, Instrument};

/// Greatify - printable HTML reports for a selection of library items
#[derive(Parser)]
#[command(name = "greatify")]
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
    /// Report configuration file (JSON or TOML)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Output format for command results (not the report itself)
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a report for items in a library snapshot
    Report(ReportArgs),

    /// Validate configuration (and optionally a snapshot)
    Check(CheckArgs),

    /// Print JSON Schemas of the snapshot and configuration formats
    Schema(SchemaArgs),

    /// Print version information
    Version,
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct ReportArgs {
    /// Library snapshot file (JSON)
    #[arg(long, short = 'l')]
    library: PathBuf,

    /// Item IDs to report on, in order
    #[arg(value_name = "ID", conflicts_with = "all")]
    ids: Vec<u64>,

    /// Report on every item in the snapshot
    #[arg(long)]
    all: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Emit a data:text/html URL instead of raw HTML
    #[arg(long)]
    data_url: bool,

    /// Override the configured document title
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Also validate this library snapshot
    #[arg(long, short = 'l')]
    library: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type name to print
    name: Option<String>,

    /// List available types
    #[arg(long, conflicts_with_all = ["name", "all"])]
    list: bool,

    /// Print every schema keyed by type name
    #[arg(long, conflicts_with = "name")]
    all: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = Cli::parse();

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let exit_code = match &cli.command {
        Commands::Report(args) => run_report(&cli.global, args),
        Commands::Check(args) => run_check(&cli.global, args),
        Commands::Schema(args) => run_schema(args),
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

fn fail(code: ExitCode, message: impl std::fmt::Display) -> ExitCode {
    error!(exit_code = %code, "{}", message);
    eprintln!("greatify: error: {}", message);
    code
}

fn load_report_config(global: &GlobalOpts) -> Result<LoadedConfig, ExitCode> {
    load_config(global.config.as_deref()).map_err(|e| {
        error!(event = event_names::CONFIG_ERROR, error = %e, "Configuration rejected");
        fail(ExitCode::from(&e), e)
    })
}

fn open_library(path: &Path) -> Result<SnapshotStore, ExitCode> {
    match SnapshotStore::open(path) {
        Ok(store) => {
            info!(
                event = event_names::SNAPSHOT_LOADED,
                path = %path.display(),
                items = store.len(),
                "Library snapshot loaded"
            );
            Ok(store)
        }
        Err(e) => {
            error!(event = event_names::SNAPSHOT_ERROR, path = %path.display(), error = %e, "Snapshot rejected");
            Err(fail(
                ExitCode::from(&e),
                format!("{}: {}", path.display(), e),
            ))
        }
    }
}

fn run_report(global: &GlobalOpts, args: &ReportArgs) -> ExitCode {
    if !args.all && args.ids.is_empty() {
        return fail(ExitCode::ArgsError, "no items selected (pass item IDs or --all)");
    }

    let loaded = match load_report_config(global) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let store = match open_library(&args.library) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let mut config = loaded.config;
    if let Some(title) = &args.title {
        config.title = title.clone();
    }

    // --all hands every item over; the pipeline drops the children itself.
    let selection: Vec<ItemId> = if args.all {
        store.ids()
    } else {
        args.ids.iter().copied().map(ItemId).collect()
    };

    let run_id = generate_run_id();
    let span = info_span!("report", run_id = %run_id, config_source = %loaded.source);
    let generator = ReportGenerator::new(config);

    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(e) => return fail(ExitCode::InternalError, format!("failed to start runtime: {}", e)),
    };
    let html = match runtime.block_on(generator.build_report(&store, &selection).instrument(span)) {
        Ok(html) => html,
        Err(e) => return fail(ExitCode::from(&e), e),
    };

    let mut sink: Box<dyn ReportSink> = match (&args.output, args.data_url) {
        (Some(path), false) => Box::new(FileSink::new(path)),
        (Some(path), true) => Box::new(DataUrlSink::new(FileSink::new(path))),
        (None, false) => Box::new(StdoutSink::new()),
        (None, true) => Box::new(DataUrlSink::new(StdoutSink::new())),
    };
    match sink.display(&html) {
        Ok(()) => {
            info!(run_id = %run_id, sink = sink.name(), bytes = html.len(), "Report delivered");
            ExitCode::Clean
        }
        Err(e) => fail(ExitCode::IoError, e),
    }
}

fn run_check(global: &GlobalOpts, args: &CheckArgs) -> ExitCode {
    let mut results: Vec<serde_json::Value> = Vec::new();
    let mut exit = ExitCode::Clean;

    match load_config(global.config.as_deref()) {
        Ok(loaded) => results.push(serde_json::json!({
            "check": "config",
            "status": "ok",
            "source": loaded.source.to_string(),
            "path": loaded.path.as_ref().map(|p| p.display().to_string()),
            "schema_version": loaded.config.schema_version,
        })),
        Err(e) => {
            exit = ExitCode::from(&e);
            results.push(serde_json::json!({
                "check": "config",
                "status": "error",
                "error": e.to_string(),
            }));
        }
    }

    if let Some(path) = &args.library {
        match SnapshotStore::open(path) {
            Ok(store) => results.push(serde_json::json!({
                "check": "library",
                "status": "ok",
                "path": path.display().to_string(),
                "items": store.len(),
                "top_level_items": store.top_level_ids().len(),
            })),
            Err(e) => {
                if exit == ExitCode::Clean {
                    exit = ExitCode::from(&e);
                }
                results.push(serde_json::json!({
                    "check": "library",
                    "status": "error",
                    "path": path.display().to_string(),
                    "error": e.to_string(),
                }));
            }
        }
    }

    let all_ok = exit == ExitCode::Clean;
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": if all_ok { "ok" } else { "error" },
                "exit_code": exit.code_name(),
                "checks": results,
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => println!("{}", text),
                Err(e) => return fail(ExitCode::InternalError, e),
            }
        }
        OutputFormat::Human => {
            for result in &results {
                let check = result.get("check").and_then(|v| v.as_str()).unwrap_or("?");
                let status = result.get("status").and_then(|v| v.as_str()).unwrap_or("?");
                let symbol = if status == "ok" { "✓" } else { "✗" };
                println!("{} {}: {}", symbol, check, status);
                if let Some(source) = result.get("source").and_then(|v| v.as_str()) {
                    println!("  source: {}", source);
                }
                if let Some(error) = result.get("error").and_then(|v| v.as_str()) {
                    println!("  Error: {}", error);
                }
            }
        }
    }

    exit
}

fn run_schema(args: &SchemaArgs) -> ExitCode {
    let format = if args.compact {
        SchemaFormat::JsonCompact
    } else {
        SchemaFormat::Json
    };

    if args.list {
        for (name, desc) in available_schemas() {
            println!("{:<20} {}", name, desc);
        }
        return ExitCode::Clean;
    }

    let rendered = if args.all {
        format_schema(&generate_all_schemas(), format)
    } else {
        let Some(name) = &args.name else {
            return fail(ExitCode::ArgsError, "pass a type name, --list or --all");
        };
        match generate_schema(name) {
            Some(schema) => format_schema(&schema, format),
            None => {
                return fail(
                    ExitCode::ArgsError,
                    format!("unknown schema type '{}' (see --list)", name),
                )
            }
        }
    };

    match rendered {
        Ok(text) => {
            println!("{}", text);
            ExitCode::Clean
        }
        Err(e) => fail(ExitCode::InternalError, e),
    }
}

#[derive(Serialize)]
struct VersionInfo {
    version: &'static str,
    rust_version: &'static str,
    snapshot_schema_version: &'static str,
    config_schema_version: &'static str,
}

fn print_version(global: &GlobalOpts) {
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        rust_version: env!("CARGO_PKG_RUST_VERSION"),
        snapshot_schema_version: SNAPSHOT_SCHEMA_VERSION,
        config_schema_version: CONFIG_SCHEMA_VERSION,
    };

    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&info) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("greatify: error: {}", e),
        },
        OutputFormat::Human => {
            println!("greatify {}", info.version);
            println!("snapshot schema: {}", info.snapshot_schema_version);
            println!("config schema: {}", info.config_schema_version);
        }
    }
}
