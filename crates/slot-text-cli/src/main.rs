use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slot_text_core::view::Presentation;
use slot_text_core::{AppConfig, WordOrder};

mod args;
mod commands;

use args::{AnimationArgs, Source, SourceArgs};

#[derive(Parser)]
#[command(name = "slot-text")]
#[command(author, version, about = "Slot machine text animations in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate a string character by character
    Chars {
        text: String,
        #[command(flatten)]
        anim: AnimationArgs,
    },
    /// Cycle through a list of words
    Words {
        /// Words to cycle through (defaults to the configured list)
        words: Vec<String>,
        /// sequential or random
        #[arg(long)]
        order: Option<WordOrder>,
        #[command(flatten)]
        anim: AnimationArgs,
    },
    /// Print frames sampled on a virtual clock instead of drawing
    Frames {
        #[command(flatten)]
        source: SourceArgs,
        /// Sampling step in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 50)]
        step: u64,
        /// Last sample time in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 5000)]
        until: u64,
        /// Emit one JSON object per frame
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        anim: AnimationArgs,
    },
    /// Print the HTML markup of the frame at a point in time
    Markup {
        #[command(flatten)]
        source: SourceArgs,
        /// Time into the run in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 0)]
        at: u64,
        /// Extra class on the container
        #[arg(long, default_value = "")]
        class: String,
        /// Inline style on the container
        #[arg(long)]
        style: Option<String>,
        #[command(flatten)]
        anim: AnimationArgs,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // The terminal UI owns the screen, so its logs go to a file
    let interactive = matches!(cli.command, Commands::Chars { .. } | Commands::Words { .. });
    init_logging(&config, interactive)?;

    // Handle commands
    match cli.command {
        Commands::Chars { text, anim } => {
            let animator = Source::Chars(text).animator(&anim, &config);
            commands::run::run(animator, &config)
        }
        Commands::Words { words, order, anim } => {
            let source = Source::resolve(
                &SourceArgs {
                    text: None,
                    words,
                    order,
                },
                &config,
            );
            commands::run::run(source.animator(&anim, &config), &config)
        }
        Commands::Frames {
            source,
            step,
            until,
            json,
            anim,
        } => {
            let animator = Source::resolve(&source, &config).animator(&anim, &config);
            commands::frames::run(
                animator,
                Duration::from_millis(step),
                Duration::from_millis(until),
                json,
            )
        }
        Commands::Markup {
            source,
            at,
            class,
            style,
            anim,
        } => {
            let animator = Source::resolve(&source, &config).animator(&anim, &config);
            let mut presentation = Presentation::new(class);
            if let Some(style) = style {
                presentation = presentation.style(style);
            }
            commands::markup::run(animator, Duration::from_millis(at), &presentation)
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}

/// Install the tracing subscriber; `RUST_LOG` wins over `general.log_level`
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
