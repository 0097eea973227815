use anyhow::Result;
use clap::{Parser, Subcommand};
use ngamumule::transport::cli;
use ngamumule::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ngamumule")]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("NGAMUMULE_GIT_HASH"), ")"),
    about = "Ngamumule - learn Sundanese with a tool-using chat agent",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat with a persona
    Chat {
        /// Initial message to send
        message: Option<String>,

        /// Persona to start with (asisten, guru, sobat, or one from config)
        #[arg(short, long)]
        persona: Option<String>,
    },

    /// Send one message and print the reply with the action trace
    Ask {
        message: String,

        #[arg(short, long)]
        persona: Option<String>,

        /// Print reply and actions as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the tools available to a persona
    Tools {
        #[arg(short, long)]
        persona: Option<String>,
    },

    /// Show the lesson catalog and progress
    Lessons {
        /// Only show one level (beginner, intermediate, advanced)
        #[arg(short, long)]
        level: Option<String>,

        /// Completed lesson ids
        #[arg(long, value_delimiter = ',')]
        done: Vec<String>,
    },

    /// Show vocabulary with pronunciation and audio paths
    Vocab {
        /// Only show one category (greetings, numbers, family, food, verbs)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show cultural notes
    Culture,

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "ngamumule=debug"
    } else {
        "ngamumule=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Chat { message, persona } => {
            tracing::info!("Starting chat, persona: {:?}", persona);
            cli::run_chat(&config, persona.as_deref(), message).await?;
        }
        Commands::Ask {
            message,
            persona,
            json,
        } => {
            cli::run_ask(&config, persona.as_deref(), &message, json).await?;
        }
        Commands::Tools { persona } => {
            cli::run_tools(&config, persona.as_deref())?;
        }
        Commands::Lessons { level, done } => {
            cli::run_lessons(level.as_deref(), &done)?;
        }
        Commands::Vocab { category } => {
            cli::run_vocab(&config, category.as_deref())?;
        }
        Commands::Culture => {
            cli::run_culture()?;
        }
        Commands::Config => {
            cli::run_config(&config)?;
        }
    }

    Ok(())
}
