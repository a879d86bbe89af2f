// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use klick::config;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "klick")]
#[command(about = "Camera screen with swipe filters, frames, and capture confetti")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    /// Use this config file instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the photo directory
    #[arg(long, global = true)]
    photo_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive camera screen in the terminal (default)
    Terminal,

    /// List stored photos, newest first
    Gallery,

    /// Feed a scripted gesture sequence through the screen and print each frame
    Replay {
        /// JSON script of timed input events
        script: PathBuf,
    },

    /// Print the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Terminal));
    init_logging(interactive);

    let mut config = match &cli.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if let Some(dir) = cli.photo_dir {
        config.photo_directory = Some(dir);
    }

    match cli.command {
        None | Some(Commands::Terminal) => klick::terminal::run(config)?,
        Some(Commands::Gallery) => cli::list_photos(&config)?,
        Some(Commands::Replay { script }) => cli::replay(config, &script)?,
        Some(Commands::Config { save }) => cli::show_config(&config, cli.config.as_deref(), save)?,
    }

    Ok(())
}

/// Set up tracing
///
/// RUST_LOG controls the level (e.g. RUST_LOG=debug, RUST_LOG=klick=debug).
/// The interactive screen owns the terminal, so its logs go to
/// `<cache dir>/klick/klick.log` instead of stderr.
fn init_logging(interactive: bool) {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    if interactive
        && let Some(file) = open_log_file()
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = dirs::cache_dir()?.join("klick");
    std::fs::create_dir_all(&dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("klick.log"))
        .ok()
}
