use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pollinator_core::{
    load_config, load_default_config, render_debug, render_json, render_stats, render_summary,
    render_upload_commands, run_analysis, validate_config, write_atomic, CommandFileMode, Config,
    Glyphs,
};

/// Environment variable naming the config file
const CONFIG_ENV: &str = "POLLINATOR_CONFIG";

/// Config file picked up from the working directory when nothing else is named
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Parser, Debug)]
#[command(name = "cross-pollinator", version)]
#[command(about = "Find cross-seeded torrents missing from your trackers")]
struct Cli {
    /// Run the missing-tracker analysis
    #[arg(long)]
    run: bool,

    /// Write upload commands to FILE (default from config)
    #[arg(long, value_name = "FILE")]
    output: Option<Option<PathBuf>>,

    /// Only write command lines to the output file
    #[arg(long)]
    clean: bool,

    /// Use plain ASCII markers instead of emoji
    #[arg(long)]
    no_emoji: bool,

    /// Show per-tracker upload statistics
    #[arg(long)]
    stats: bool,

    /// Show decision details for the first few torrents
    #[arg(long)]
    debug: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Cross-seed database path, overrides the config
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if !cli.run {
        if let Err(e) = Cli::command().print_help() {
            warn!("Failed to print help: {}", e);
        }
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load(cli.config.as_deref())?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }
    validate_config(&config).context("Configuration validation failed")?;

    debug!("Database path: {:?}", config.database.path);

    if cli.clean && cli.output.is_none() {
        warn!("--clean only applies together with --output, ignoring");
    }

    let report = run_analysis(&config)?;
    let glyphs = Glyphs::new(!cli.no_emoji);

    // Render the command file before printing anything so a failure leaves
    // no partial output behind
    let command_file = match &cli.output {
        Some(path) => {
            let path = path
                .clone()
                .unwrap_or_else(|| config.upload.output_file.clone());
            let mode = if cli.clean {
                CommandFileMode::Clean
            } else {
                CommandFileMode::Full
            };
            let text = render_upload_commands(&report, &config.upload, mode, Utc::now())?;
            Some((path, text))
        }
        None => None,
    };

    if cli.json {
        print!("{}", render_json(&report)?);
    } else {
        print!("{}", render_summary(&report, &glyphs));
        if cli.debug {
            println!();
            print!("{}", render_debug(&report, &glyphs));
        }
        if cli.stats {
            println!();
            print!("{}", render_stats(&report, &glyphs));
        }
    }

    if let Some((path, text)) = command_file {
        write_atomic(&path, &text)?;
        info!(path = %path.display(), torrents = report.entries.len(), "Upload commands written");
        if !cli.json {
            println!();
            println!("{} Upload commands written to: {}", glyphs.done, path.display());
        }
    }

    Ok(())
}

/// Explicit path, then `POLLINATOR_CONFIG`, then `config.toml` if present,
/// else built-in defaults.
fn load(explicit: Option<&Path>) -> Result<Config> {
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    if let Some(path) = named {
        info!("Loading configuration from {:?}", path);
        return load_config(&path).with_context(|| format!("Failed to load config from {:?}", path));
    }

    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.exists() {
        info!("Loading configuration from {:?}", local);
        return load_config(local).with_context(|| format!("Failed to load config from {:?}", local));
    }

    debug!("No config file, using defaults");
    load_default_config().context("Failed to load default configuration")
}
