//! polaframe - instant-film frames for JPEG photos
//!
//! Pads a photo with a solid border in Polaroid proportions, honoring the
//! EXIF orientation so the wide margin ends up at the displayed bottom, and
//! copies the original metadata into the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polaframe_core::Rgb8;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "polaframe")]
#[command(author, version, about = "Add an instant-film style frame to JPEG photos")]
#[command(long_about = "
Adds a solid border around a JPEG photo in instant-film proportions and
re-attaches the original EXIF, XMP, IPTC, ICC and comment metadata.

Margins are given relative to the short side of the finished print
(default: 900 with 60 top/left/right and 225 bottom).

Examples:
  polaframe frame photo.jpg framed.jpg          # Classic frame
  polaframe frame photo.jpg out.jpg --square    # Square photo area first
  polaframe frame photo.jpg out.jpg -c '#fffdd0' --bottom 180
  polaframe plan *.jpg --json                   # Show computed padding
  polaframe batch 'shots/*.jpg' -o framed/      # Frame many in parallel
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads for batch mode (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Frame a single photo
    #[command(visible_alias = "f")]
    Frame(FrameArgs),

    /// Show orientation and computed padding without writing anything
    #[command(visible_alias = "p")]
    Plan(PlanArgs),

    /// Frame every photo matching a glob pattern
    #[command(visible_alias = "b")]
    Batch(BatchArgs),
}

/// Frame geometry and output options shared by all commands.
#[derive(Args, Clone, Debug, Default)]
struct FrameOptions {
    /// YAML file with frame settings (flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Short side of the finished print, in pad units
    #[arg(short = 'r', long)]
    reference_length: Option<u32>,

    /// Top margin, in pad units
    #[arg(long)]
    top: Option<u32>,

    /// Left margin, in pad units
    #[arg(long)]
    left: Option<u32>,

    /// Bottom margin, in pad units
    #[arg(long)]
    bottom: Option<u32>,

    /// Right margin, in pad units
    #[arg(long)]
    right: Option<u32>,

    /// Pad the photo to a square before framing
    #[arg(short, long)]
    square: bool,

    /// Frame color: #RGB, #RRGGBB or a name (white, black, cream, ...)
    #[arg(short, long)]
    color: Option<Rgb8>,

    /// JPEG quality (1-100)
    #[arg(short, long)]
    quality: Option<u8>,

    /// Treat every photo as orientation 1
    #[arg(long)]
    ignore_orientation: bool,
}

#[derive(Args)]
struct FrameArgs {
    /// Input JPEG
    input: PathBuf,

    /// Output JPEG
    output: PathBuf,

    #[command(flatten)]
    options: FrameOptions,
}

#[derive(Args)]
struct PlanArgs {
    /// Input JPEG(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    options: FrameOptions,
}

#[derive(Args)]
struct BatchArgs {
    /// Input glob pattern, e.g. 'photos/*.jpg'
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Appended to each output file stem
    #[arg(long, default_value = "")]
    suffix: String,

    #[command(flatten)]
    options: FrameOptions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Frame(args) => commands::frame::run(args, cli.verbose),
        Commands::Plan(args) => commands::plan::run(args, cli.verbose),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose),
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `-v`. The returned guard flushes the log file on drop.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(filter).with(stderr).init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("--log needs a file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Ok(Some(guard))
}
