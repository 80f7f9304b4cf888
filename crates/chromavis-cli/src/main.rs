use std::path::{Path, PathBuf};

use anyhow::Context;
use chromavis::{Deficiency, Mode, OutputFormat, ProcessConfig, process_image};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chromavis")]
#[command(version, about = "Simulate or correct color-vision deficiencies in images", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform one image
    Process {
        /// Input image (any format the decoder recognizes)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Deficiency, e.g. "protanomaly" or "Severe Tritanomaly"
        #[arg(short = 't', long, value_name = "VARIANT")]
        variant: Deficiency,

        /// "simulate" or "correct"
        #[arg(short, long, value_name = "MODE", default_value = "simulate")]
        mode: Mode,

        /// Output file. Defaults to <INPUT>-<variant>-<mode>.<format> next to the input
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Output format (png or bmp). Inferred from --out when omitted
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<OutputFormat>,

        /// Write opaque output even if the input has alpha
        #[arg(long)]
        opaque: bool,

        /// JSON config file; CHROMAVIS_* environment variables override it
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List supported deficiencies and modes
    Variants,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Process {
            input,
            variant,
            mode,
            out,
            format,
            opaque,
            config,
        } => cmd_process(&input, variant, mode, out, format, opaque, config.as_deref()),
        Commands::Variants => {
            cmd_variants();
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_process(
    input: &Path,
    variant: Deficiency,
    mode: Mode,
    out: Option<PathBuf>,
    format: Option<OutputFormat>,
    opaque: bool,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => ProcessConfig::from_json_file(path)?,
        None => ProcessConfig::default(),
    }
    .with_overrides(|key| std::env::var(key).ok());

    if let Some(format) = format.or_else(|| out.as_deref().and_then(OutputFormat::from_path)) {
        config.output_format = format;
    }
    if opaque {
        config.preserve_alpha = false;
    }

    let out = out.unwrap_or_else(|| default_output_path(input, variant, mode, config.output_format));

    let bytes = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let encoded = process_image(&bytes, variant, mode, &config)
        .with_context(|| format!("processing {}", input.display()))?;
    std::fs::write(&out, &encoded).with_context(|| format!("writing {}", out.display()))?;

    tracing::info!(
        "{} ({variant}, {mode}) -> {} [{} bytes]",
        input.display(),
        out.display(),
        encoded.len()
    );
    Ok(())
}

fn cmd_variants() {
    println!("Deficiencies:");
    for d in Deficiency::all() {
        println!("  {:<20} {}", format!("{d:?}"), d.label());
    }
    println!("Modes:");
    for m in Mode::all() {
        println!("  {}", m.label());
    }
}

fn default_output_path(input: &Path, variant: Deficiency, mode: Mode, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let variant = variant.label().to_ascii_lowercase().replace(' ', "-");
    input.with_file_name(format!("{stem}-{variant}-{mode}.{}", format.extension()))
}
