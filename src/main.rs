use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use detcanvas::{
    init_logging, replay, Config, DetectionSet, ImageSize, InputCommand, BUILD_DATE, VERSION,
};
use detcanvas_settings::ConfigFormat;

/// Headless driver for the detcanvas geometry engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (.toml or .json); defaults to the platform config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level filter, e.g. "debug" or "detcanvas_editor=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in sample detection set as JSON
    Sample,

    /// Replay a recorded input script and print the final state as JSON
    Replay {
        /// JSON array of input commands
        #[arg(long)]
        script: PathBuf,

        /// Detection set JSON; the sample set when omitted
        #[arg(long)]
        detections: Option<PathBuf>,

        /// Local copy of the picture, used to read its natural size
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Write the effective configuration, or print it as TOML
    Config {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config =
        Config::load_or_default(cli.config.as_deref()).context("failed to load configuration")?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&level, cli.json_logs || config.logging.json)?;
    tracing::debug!("detcanvas {} (built {})", VERSION, BUILD_DATE);

    match cli.command {
        Command::Sample => {
            println!("{}", DetectionSet::sample().to_json_string()?);
        }
        Command::Replay {
            script,
            detections,
            image: image_path,
        } => {
            let mut set = match detections {
                Some(path) => DetectionSet::load_from_file(&path)
                    .with_context(|| format!("failed to load detections from {}", path.display()))?,
                None => DetectionSet::sample(),
            };

            if let Some(path) = image_path {
                let (width, height) = image::image_dimensions(&path)
                    .with_context(|| format!("failed to read image {}", path.display()))?;
                let natural = ImageSize::new(f64::from(width), f64::from(height));
                if natural != set.image.size {
                    tracing::warn!(
                        "Image {} is {}x{}, detection set says {}x{}; using the file",
                        path.display(),
                        width,
                        height,
                        set.image.size.width,
                        set.image.size.height
                    );
                    set.image.size = natural;
                }
            }

            let content = std::fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let commands: Vec<InputCommand> = serde_json::from_str(&content)
                .with_context(|| format!("invalid script {}", script.display()))?;

            let report = replay(set, &config, &commands)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Config { output } => match output {
            Some(path) => {
                config
                    .save_to_file(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("Wrote configuration to {}", path.display());
            }
            None => print!("{}", config.to_string_as(ConfigFormat::Toml)?),
        },
    }

    Ok(())
}
