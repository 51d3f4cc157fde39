//! Model Quality Core - binary classifier evaluation
//!
//! The main entry point for mq-core, handling:
//! - Evaluating prediction files into classification reports
//! - Rendering SVG/HTML artifacts and terminal plots
//! - Ranking reports from several candidate models
//! - Writing, inspecting and verifying report bundles

use clap::{Args, Parser, Subcommand};
use mq_bundle::{BundleManifest, BundleReader, BundleWriter, BUNDLE_EXTENSION};
use mq_common::{
    ClassNames, ClassificationReport, Error, OutputFormat, ReportId, StructuredError,
    SCHEMA_VERSION,
};
use mq_core::ascii::{ascii_pr, ascii_roc};
use mq_core::compare::{evaluate_batch, rank, render_ranking, Candidate, RankMetric};
use mq_core::config::{load_config, load_config_file, ConfigOptions, ResolvedConfig};
use mq_core::exit_codes::ExitCode;
use mq_core::input::{load_predictions, CsvColumns, InputFormat};
use mq_core::log_event;
use mq_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogContext, LogFormat, LogLevel, Stage,
};
use mq_core::monitor::MonitorReport;
use mq_core::schema::{
    available_schemas, format_schema, generate_all_schemas, generate_schema, SchemaFormat,
};
use mq_core::text::{render_markdown, render_text};
use mq_core::{EvaluateOptions, Evaluator};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Model Quality Core - evaluate binary classifiers from their predictions
#[derive(Parser)]
#[command(name = "mq-core")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Config file (TOML)
    #[arg(long, global = true, env = "MQ_CONFIG")]
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

    /// Log line format on stderr
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a prediction file and print the classification report
    Evaluate(EvaluateArgs),

    /// Render SVG panels and the HTML page for a saved report
    Render(RenderArgs),

    /// Rank several reports (or prediction files) by one metric
    Compare(CompareArgs),

    /// Inspect or verify report bundles
    Bundle(BundleArgs),

    /// Print JSON schemas for report and config types
    Schema(SchemaArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Prediction file (JSON document or CSV with a header row)
    #[arg(short, long)]
    input: PathBuf,

    /// Prediction file format
    #[arg(long, value_enum, default_value = "auto")]
    input_format: InputFormat,

    /// CSV column holding ground-truth labels
    #[arg(long, default_value = "y_true")]
    true_col: String,

    /// CSV column holding positive-class scores
    #[arg(long, default_value = "y_score")]
    score_col: String,

    /// CSV column holding predicted labels (optional)
    #[arg(long)]
    pred_col: Option<String>,

    /// Fixed decision threshold in [0, 1]; omit to search the F1-maximizing one
    #[arg(long)]
    threshold: Option<f64>,

    /// Class display names as NEGATIVE,POSITIVE
    #[arg(long, value_parser = parse_class_names)]
    class_names: Option<ClassNames>,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Write SVG panels and report.html into this directory
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Write a .mqb bundle to this path
    #[arg(long)]
    bundle: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Report JSON file or .mqb bundle
    #[arg(short, long)]
    report: PathBuf,

    /// Output directory for the SVG panels and report.html
    #[arg(short, long)]
    out_dir: PathBuf,

    /// Skip the HTML page
    #[arg(long)]
    no_html: bool,

    /// Also print ROC and PR curves as terminal plots
    #[arg(long)]
    ascii: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Report JSON files or .mqb bundles
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Ranking metric
    #[arg(long, value_enum, default_value = "f1")]
    metric: RankMetric,

    /// Treat inputs as prediction files and evaluate them first
    #[arg(long)]
    predictions: bool,

    /// Concurrent evaluations with --predictions (0 = one per CPU)
    #[arg(long, default_value = "0")]
    jobs: usize,

    /// Fixed decision threshold for --predictions
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Args, Debug)]
struct BundleArgs {
    #[command(subcommand)]
    command: BundleCommands,
}

#[derive(Subcommand, Debug)]
enum BundleCommands {
    /// Show a bundle's manifest
    Inspect {
        /// Bundle path
        path: PathBuf,
    },
    /// Check every file in a bundle against its manifest checksum
    Verify {
        /// Bundle path
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type name (see --list)
    name: Option<String>,

    /// List available schema types
    #[arg(long)]
    list: bool,

    /// Print every schema keyed by type name
    #[arg(long, conflicts_with = "name")]
    all: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Validate a config file (defaults to the resolved one)
    Validate {
        /// Config file to validate
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version arrive here too, printed to stdout.
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let level = LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet);
    init_logging(&LogConfig::from_env(level, cli.global.log_format));

    let ctx = LogContext::new(generate_run_id());
    log_event!(
        ctx,
        DEBUG,
        event_names::RUN_STARTED,
        Stage::Init,
        "mq-core started",
        output_format = tracing::field::display(cli.global.format)
    );

    let exit_code = match cli.command {
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            println!();
            ExitCode::ArgsError
        }
        Some(Commands::Evaluate(args)) => run_evaluate(&cli.global, &args, &ctx),
        Some(Commands::Render(args)) => run_render(&cli.global, &args, &ctx),
        Some(Commands::Compare(args)) => run_compare(&cli.global, &args, &ctx),
        Some(Commands::Bundle(args)) => run_bundle(&cli.global, &args, &ctx),
        Some(Commands::Schema(args)) => run_schema(&cli.global, &args),
        Some(Commands::Config(args)) => run_config(&cli.global, &args),
        Some(Commands::Version) => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    log_event!(
        ctx,
        DEBUG,
        event_names::RUN_FINISHED,
        Stage::Init,
        "mq-core finished",
        exit_code = exit_code.as_i32()
    );
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_class_names(s: &str) -> Result<ClassNames, String> {
    let names: ClassNames = s.parse()?;
    if names.negative() == names.positive() {
        return Err(format!("class names must differ, got '{}' twice", names.negative()));
    }
    Ok(names)
}

fn resolve_config(global: &GlobalOpts) -> Result<ResolvedConfig, Error> {
    let options = ConfigOptions {
        config_path: global.config.clone(),
    };
    Ok(load_config(&options)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load a saved report from a JSON file or a `.mqb` bundle.
fn load_report(path: &Path) -> Result<ClassificationReport, Error> {
    let is_bundle = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(BUNDLE_EXTENSION));
    if is_bundle {
        let mut reader = BundleReader::open(path)?;
        return Ok(reader.read_report()?);
    }
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Report an error on stderr in the requested format and map it to an exit code.
fn output_error(global: &GlobalOpts, ctx: Option<&LogContext>, error: &Error) -> ExitCode {
    let exit_code = ExitCode::from(error);
    if let Some(ctx) = ctx {
        log_event!(
            ctx,
            DEBUG,
            event_names::INTERNAL_ERROR,
            Stage::Init,
            "command failed",
            code = error.code(),
            exit_code = exit_code.as_i32()
        );
    }

    let structured = StructuredError::from(error);
    match global.format {
        OutputFormat::Json | OutputFormat::Monitor => {
            eprintln!("{}", structured.to_json_pretty());
        }
        OutputFormat::Exitcode => {}
        OutputFormat::Md | OutputFormat::Summary => {
            eprintln!("{}", structured.to_human(error.headline()));
        }
    }
    exit_code
}

fn finish(global: &GlobalOpts, ctx: Option<&LogContext>, result: Result<ExitCode, Error>) -> ExitCode {
    result.unwrap_or_else(|e| output_error(global, ctx, &e))
}

// ============================================================================
// evaluate
// ============================================================================

fn run_evaluate(global: &GlobalOpts, args: &EvaluateArgs, ctx: &LogContext) -> ExitCode {
    finish(global, Some(ctx), evaluate_command(global, args, ctx))
}

fn evaluate_command(
    global: &GlobalOpts,
    args: &EvaluateArgs,
    ctx: &LogContext,
) -> Result<ExitCode, Error> {
    let resolved = resolve_config(global)?;

    let columns = CsvColumns {
        y_true: args.true_col.clone(),
        y_score: args.score_col.clone(),
        y_pred: args.pred_col.clone(),
    };
    log_event!(
        ctx,
        DEBUG,
        event_names::LOAD_STARTED,
        Stage::Load,
        "loading predictions",
        path = tracing::field::display(args.input.display())
    );
    let set = load_predictions(&args.input, args.input_format, &columns)?;
    log_event!(
        ctx,
        INFO,
        event_names::LOAD_FINISHED,
        Stage::Load,
        "predictions loaded",
        samples = set.y_true.len() as u64
    );

    let mut options = EvaluateOptions::default()
        .with_class_names(
            args.class_names
                .clone()
                .unwrap_or_else(|| resolved.config.report.class_names.clone()),
        )
        .with_title(
            args.title
                .clone()
                .unwrap_or_else(|| resolved.config.report.title.clone()),
        );
    options.decision_threshold = args.threshold;

    let report = Evaluator::new(options).evaluate(&set.as_record())?;
    let report_id = ReportId::new();
    let ctx = ctx.clone().with_report_id(report_id.to_string());
    log_event!(
        ctx,
        INFO,
        event_names::EVALUATE_FINISHED,
        Stage::Evaluate,
        "report ready",
        label_source = tracing::field::display(report.label_source),
        decision_threshold = report.decision_threshold,
        f1 = report.metrics.f1
    );
    if let Some(reason) = report.degenerate {
        log_event!(
            ctx,
            WARN,
            event_names::EVALUATE_DEGENERATE,
            Stage::Evaluate,
            "ground truth holds a single class; AUCs are undefined",
            reason = tracing::field::display(reason)
        );
    }

    if let Some(dir) = &args.out_dir {
        let written = write_artifacts(&report, &resolved, dir, resolved.config.bundle.include_html)?;
        log_event!(
            ctx,
            INFO,
            event_names::RENDER_WROTE,
            Stage::Render,
            "artifacts written",
            dir = tracing::field::display(dir.display()),
            files = written.len() as u64
        );
    }

    if let Some(path) = &args.bundle {
        let manifest = write_bundle(path, &report, &report_id, &resolved)?;
        log_event!(
            ctx,
            INFO,
            event_names::BUNDLE_WRITTEN,
            Stage::Bundle,
            "bundle written",
            path = tracing::field::display(path.display()),
            files = manifest.file_count() as u64,
            bytes = manifest.total_bytes()
        );
    }

    match global.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Md => print!("{}", render_markdown(&report)),
        OutputFormat::Summary => println!("[{}] {}", report_id, report.summary_line()),
        OutputFormat::Monitor => println!("{}", MonitorReport::from_report(&report).to_json_pretty()?),
        OutputFormat::Exitcode => {}
    }

    Ok(if report.is_degenerate() {
        ExitCode::Degenerate
    } else {
        ExitCode::Clean
    })
}

#[cfg(feature = "report")]
fn render_artifacts(
    report: &ClassificationReport,
    resolved: &ResolvedConfig,
    include_html: bool,
) -> Result<mq_report::RenderedReport, Error> {
    let config = resolved.config.render.report_config(include_html);
    Ok(mq_report::render_report(report, &render_text(report), &config)?)
}

#[cfg(feature = "report")]
fn write_artifacts(
    report: &ClassificationReport,
    resolved: &ResolvedConfig,
    dir: &Path,
    include_html: bool,
) -> Result<Vec<PathBuf>, Error> {
    let rendered = render_artifacts(report, resolved, include_html)?;
    Ok(rendered.write_to_dir(dir)?)
}

#[cfg(not(feature = "report"))]
fn write_artifacts(
    _report: &ClassificationReport,
    _resolved: &ResolvedConfig,
    _dir: &Path,
    _include_html: bool,
) -> Result<Vec<PathBuf>, Error> {
    Err(Error::Render(
        "mq-core was built without the 'report' feature".to_string(),
    ))
}

fn write_bundle(
    path: &Path,
    report: &ClassificationReport,
    report_id: &ReportId,
    resolved: &ResolvedConfig,
) -> Result<BundleManifest, Error> {
    let mut writer = BundleWriter::new(report_id.to_string())
        .with_title(report.title.clone())
        .with_tool_version(env!("CARGO_PKG_VERSION"));
    if let Some(hash) = &resolved.hash {
        writer = writer.with_config_hash(hash.clone());
    }

    writer.add_report(report)?;
    writer.add_summary(&render_text(report))?;
    if resolved.config.bundle.include_monitor {
        writer.add_monitor(&MonitorReport::from_report(report))?;
    }
    add_rendered(&mut writer, report, resolved)?;

    Ok(writer.write(path)?)
}

#[cfg(feature = "report")]
fn add_rendered(
    writer: &mut BundleWriter,
    report: &ClassificationReport,
    resolved: &ResolvedConfig,
) -> Result<(), Error> {
    let bundle = &resolved.config.bundle;
    if !bundle.include_svg && !bundle.include_html {
        return Ok(());
    }
    let rendered = render_artifacts(report, resolved, bundle.include_html)?;
    if bundle.include_svg {
        for (name, svg) in rendered.plots() {
            writer.add_plot(name, svg)?;
        }
    }
    if let Some(html) = &rendered.html {
        writer.add_html(html)?;
    }
    Ok(())
}

#[cfg(not(feature = "report"))]
fn add_rendered(
    _writer: &mut BundleWriter,
    _report: &ClassificationReport,
    _resolved: &ResolvedConfig,
) -> Result<(), Error> {
    Ok(())
}

// ============================================================================
// render
// ============================================================================

fn run_render(global: &GlobalOpts, args: &RenderArgs, ctx: &LogContext) -> ExitCode {
    finish(global, Some(ctx), render_command(global, args, ctx))
}

fn render_command(
    global: &GlobalOpts,
    args: &RenderArgs,
    ctx: &LogContext,
) -> Result<ExitCode, Error> {
    let resolved = resolve_config(global)?;
    let report = load_report(&args.report)?;

    let written = write_artifacts(&report, &resolved, &args.out_dir, !args.no_html)?;
    log_event!(
        ctx,
        INFO,
        event_names::RENDER_WROTE,
        Stage::Render,
        "artifacts written",
        dir = tracing::field::display(args.out_dir.display()),
        files = written.len() as u64
    );

    let render = &resolved.config.render;
    let ascii = args.ascii.then(|| {
        (
            ascii_roc(&report, render.ascii_width, render.ascii_height),
            ascii_pr(&report, render.ascii_width, render.ascii_height),
        )
    });

    match global.format {
        OutputFormat::Json | OutputFormat::Monitor => {
            let files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            let mut response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "title": &report.title,
                "out_dir": args.out_dir.display().to_string(),
                "files": files,
            });
            if let Some((roc, pr)) = &ascii {
                response["ascii"] = serde_json::json!({ "roc": roc, "pr": pr });
            }
            print_json(&response)?;
        }
        OutputFormat::Md | OutputFormat::Summary => {
            if let Some((roc, pr)) = &ascii {
                println!("{}", roc);
                println!("{}", pr);
            }
            for path in &written {
                println!("{}", path.display());
            }
        }
        OutputFormat::Exitcode => {}
    }

    Ok(ExitCode::Clean)
}

// ============================================================================
// compare
// ============================================================================

fn run_compare(global: &GlobalOpts, args: &CompareArgs, ctx: &LogContext) -> ExitCode {
    finish(global, Some(ctx), compare_command(global, args, ctx))
}

fn compare_command(
    global: &GlobalOpts,
    args: &CompareArgs,
    ctx: &LogContext,
) -> Result<ExitCode, Error> {
    let reports = if args.predictions {
        evaluate_candidates(global, args)?
    } else {
        args.inputs
            .iter()
            .map(|path| load_report(path))
            .collect::<Result<Vec<_>, _>>()?
    };

    let ranked = rank(&reports, args.metric);
    log_event!(
        ctx,
        INFO,
        event_names::COMPARE_RANKED,
        Stage::Compare,
        "reports ranked",
        count = ranked.len() as u64,
        metric = tracing::field::display(args.metric)
    );

    match global.format {
        OutputFormat::Json | OutputFormat::Monitor => print_json(&serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "metric": args.metric,
            "ranking": ranked,
        }))?,
        OutputFormat::Md | OutputFormat::Summary => print!("{}", render_ranking(&ranked)),
        OutputFormat::Exitcode => {}
    }

    Ok(ExitCode::Clean)
}

fn evaluate_candidates(
    global: &GlobalOpts,
    args: &CompareArgs,
) -> Result<Vec<ClassificationReport>, Error> {
    let resolved = resolve_config(global)?;
    let columns = CsvColumns::default();

    let candidates = args
        .inputs
        .iter()
        .map(|path| {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            load_predictions(path, InputFormat::Auto, &columns).map(|set| Candidate::new(name, set))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut options =
        EvaluateOptions::default().with_class_names(resolved.config.report.class_names.clone());
    options.decision_threshold = args.threshold;

    evaluate_batch(&candidates, &options, args.jobs)
        .into_iter()
        .map(|result| result.map_err(Error::from))
        .collect()
}

// ============================================================================
// bundle
// ============================================================================

fn run_bundle(global: &GlobalOpts, args: &BundleArgs, ctx: &LogContext) -> ExitCode {
    let result = match &args.command {
        BundleCommands::Inspect { path } => bundle_inspect(global, path),
        BundleCommands::Verify { path } => bundle_verify(global, path, ctx),
    };
    finish(global, Some(ctx), result)
}

fn bundle_inspect(global: &GlobalOpts, path: &Path) -> Result<ExitCode, Error> {
    let reader = BundleReader::open(path)?;
    let manifest = reader.manifest();

    match global.format {
        OutputFormat::Json | OutputFormat::Monitor => print_json(manifest)?,
        OutputFormat::Summary => println!(
            "[{}] {} files, {} bytes",
            manifest.report_id,
            manifest.file_count(),
            manifest.total_bytes()
        ),
        OutputFormat::Md => {
            println!("# Bundle {}", path.display());
            println!();
            println!("Report: {}", manifest.report_id);
            if let Some(title) = &manifest.title {
                println!("Title: {}", title);
            }
            println!("Created: {}", manifest.created_at.to_rfc3339());
            println!(
                "Config hash: {}",
                manifest.config_hash.as_deref().unwrap_or("defaults")
            );
            println!();
            println!("| path | bytes | sha256 |");
            println!("|---|---|---|");
            for file in &manifest.files {
                println!("| {} | {} | {} |", file.path, file.bytes, &file.sha256[..12]);
            }
        }
        OutputFormat::Exitcode => {}
    }

    Ok(ExitCode::Clean)
}

fn bundle_verify(global: &GlobalOpts, path: &Path, ctx: &LogContext) -> Result<ExitCode, Error> {
    let mut reader = BundleReader::open(path)?;
    let failures = reader.verify_all();
    let unlisted = reader.unlisted_files();
    let ok = failures.is_empty() && unlisted.is_empty();

    let ctx = ctx.clone().with_report_id(reader.report_id());
    log_event!(
        ctx,
        INFO,
        event_names::BUNDLE_VERIFIED,
        Stage::Bundle,
        "bundle verified",
        ok = ok,
        failures = failures.len() as u64,
        unlisted = unlisted.len() as u64
    );

    match global.format {
        OutputFormat::Json | OutputFormat::Monitor => print_json(&serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "report_id": reader.report_id(),
            "status": if ok { "valid" } else { "invalid" },
            "files_checked": reader.files().len(),
            "failures": failures,
            "unlisted": unlisted,
        }))?,
        OutputFormat::Md | OutputFormat::Summary => {
            if ok {
                println!("[{}] bundle verify: OK ({} files)", reader.report_id(), reader.files().len());
            } else {
                for failure in &failures {
                    println!("checksum mismatch or missing: {}", failure);
                }
                for name in &unlisted {
                    println!("not in manifest: {}", name);
                }
                println!("[{}] bundle verify: FAILED", reader.report_id());
            }
        }
        OutputFormat::Exitcode => {}
    }

    Ok(if ok {
        ExitCode::Clean
    } else {
        ExitCode::BundleIntegrity
    })
}

// ============================================================================
// schema
// ============================================================================

fn run_schema(global: &GlobalOpts, args: &SchemaArgs) -> ExitCode {
    let format = if args.compact {
        SchemaFormat::JsonCompact
    } else {
        SchemaFormat::Json
    };

    if args.all {
        let all = serde_json::to_value(generate_all_schemas()).unwrap_or_default();
        println!("{}", format_schema(&all, format));
        return ExitCode::Clean;
    }

    let name = match (&args.name, args.list) {
        (Some(name), false) => name,
        _ => {
            print_schema_list(global);
            return ExitCode::Clean;
        }
    };

    match generate_schema(name) {
        Some(schema) => {
            println!("{}", format_schema(&schema, format));
            ExitCode::Clean
        }
        None => {
            eprintln!("Unknown schema type: {}", name);
            eprintln!("Use 'mq-core schema --list' to see available types.");
            ExitCode::ArgsError
        }
    }
}

fn print_schema_list(global: &GlobalOpts) {
    let schemas = available_schemas();
    match global.format {
        OutputFormat::Json | OutputFormat::Monitor => {
            let list: Vec<_> = schemas
                .iter()
                .map(|(name, description)| serde_json::json!({ "name": name, "description": description }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&list).unwrap_or_default());
        }
        OutputFormat::Exitcode => {}
        _ => {
            for (name, description) in schemas {
                println!("{:<22} {}", name, description);
            }
        }
    }
}

// ============================================================================
// config
// ============================================================================

fn run_config(global: &GlobalOpts, args: &ConfigArgs) -> ExitCode {
    let result = match &args.command {
        ConfigCommands::Show => config_show(global),
        ConfigCommands::Validate { path } => config_validate(global, path.as_deref()),
    };
    finish(global, None, result)
}

/// Display the resolved configuration (built-in defaults if no file is found).
fn config_show(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let resolved = resolve_config(global)?;
    let snapshot = resolved.snapshot();

    match global.format {
        OutputFormat::Json | OutputFormat::Monitor => print_json(&serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "source": snapshot,
            "config": resolved.config,
        }))?,
        OutputFormat::Summary => {
            let source = snapshot
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in defaults".to_string());
            println!("config: {}", source);
        }
        OutputFormat::Md => {
            println!("# mq-core config show");
            println!();
            match &snapshot.path {
                Some(path) => {
                    println!("Source: {}", path.display());
                    println!("Hash: {}", snapshot.hash.as_deref().unwrap_or("n/a"));
                }
                None => println!("Source: **built-in defaults** (no config.toml found)"),
            }
            println!();
            println!("```toml\n{}```", resolved.config.to_toml());
        }
        OutputFormat::Exitcode => {}
    }

    Ok(ExitCode::Clean)
}

/// Validate a config file.
fn config_validate(global: &GlobalOpts, path: Option<&Path>) -> Result<ExitCode, Error> {
    let resolved = match path {
        Some(path) => load_config_file(path)?,
        None => resolve_config(global)?,
    };
    let snapshot = resolved.snapshot();

    match global.format {
        OutputFormat::Json | OutputFormat::Monitor => print_json(&serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "status": "valid",
            "source": snapshot,
        }))?,
        OutputFormat::Summary => println!("config validate: OK"),
        OutputFormat::Md => {
            println!("# Configuration Validation");
            println!();
            println!("Status: ✓ Valid");
            match &snapshot.path {
                Some(path) => println!("File: {}", path.display()),
                None => println!("File: using built-in defaults"),
            }
        }
        OutputFormat::Exitcode => {}
    }

    Ok(ExitCode::Clean)
}

fn print_version(global: &GlobalOpts) {
    let version_info = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "mq_core_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
        "report_feature": cfg!(feature = "report"),
    });

    match global.format {
        OutputFormat::Json | OutputFormat::Monitor => {
            println!(
                "{}",
                serde_json::to_string_pretty(&version_info).unwrap_or_default()
            );
        }
        OutputFormat::Exitcode => {}
        _ => {
            println!("mq-core {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
}
