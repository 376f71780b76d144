use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use datamodel_overrides_client::{BootstrapConfig, ClientBootstrap};
use datamodel_overrides_core::{datasource_names, extract_sqlite_overrides, normalize_path};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for structured results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "datamodel-overrides")]
#[command(about = "Resolve relative SQLite datasource URLs for test clients")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the SQLite overrides for a schema file.
    Overrides(OverridesArgs),
    /// Print the datasource names declared in a schema file.
    Names(NamesArgs),
    /// Locate the schema in a directory and print the client bootstrap.
    Bootstrap(BootstrapArgs),
}

#[derive(Debug, Args)]
struct OverridesArgs {
    /// Path to the schema file.
    #[arg(long)]
    schema: PathBuf,
    /// Directory relative `file:` URLs resolve against (default: the
    /// schema's directory).
    #[arg(long)]
    cwd: Option<PathBuf>,
    /// Directory the generated client lives in (default: --cwd).
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Emit absolute paths instead of output-relative ones.
    #[arg(long)]
    absolute: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct NamesArgs {
    /// Path to the schema file.
    #[arg(long)]
    schema: PathBuf,
}

#[derive(Debug, Args)]
struct BootstrapArgs {
    /// Directory to search for the schema (default: config `schema_dir`,
    /// then the current directory).
    #[arg(long)]
    dir: Option<PathBuf>,
    /// YAML bootstrap config.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory the generated client lives in.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Emit absolute paths instead of output-relative ones.
    #[arg(long)]
    absolute: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Overrides(args) => run_overrides(args),
        Command::Names(args) => run_names(args),
        Command::Bootstrap(args) => run_bootstrap(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Installs a stderr fmt subscriber; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_overrides(args: OverridesArgs) -> Result<(), String> {
    let schema = absolute(&args.schema)?;
    let datamodel = read_schema(&schema)?;

    let cwd = match args.cwd {
        Some(cwd) => absolute(&cwd)?,
        None => schema
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| format!("'{}' has no parent directory", schema.display()))?,
    };
    let output_dir = match args.output_dir {
        Some(dir) => absolute(&dir)?,
        None => cwd.clone(),
    };
    debug!(cwd = %cwd.display(), output_dir = %output_dir.display(), "Resolving overrides");

    let overrides = extract_sqlite_overrides(&datamodel, &cwd, &output_dir, args.absolute)
        .map_err(|e| e.to_string())?;
    println!("{}", format_output(&overrides, args.format)?);
    Ok(())
}

fn run_names(args: NamesArgs) -> Result<(), String> {
    let datamodel = read_schema(&args.schema)?;
    for name in datasource_names(&datamodel) {
        println!("{name}");
    }
    Ok(())
}

fn run_bootstrap(args: BootstrapArgs) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => BootstrapConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => BootstrapConfig::default(),
    };
    if args.output_dir.is_some() {
        config.output_dir = args.output_dir;
    }
    if args.absolute {
        config.absolute_paths = true;
    }

    let bootstrap = match &args.dir {
        Some(dir) => ClientBootstrap::from_dir(dir, &config),
        None => ClientBootstrap::from_config(&config),
    }
    .map_err(|e| e.to_string())?;
    println!("{}", format_output(&bootstrap, args.format)?);
    Ok(())
}

fn read_schema(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))
}

fn absolute(path: &Path) -> Result<PathBuf, String> {
    std::path::absolute(path)
        .map(|p| normalize_path(&p))
        .map_err(|err| format!("Failed to resolve '{}': {err}", path.display()))
}

fn format_output<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("Failed to serialize output: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("Failed to serialize output: {e}"))
        }
    }
}
