use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "rally")]
#[command(about = "Rally - create and track fitness challenges with friends")]
#[command(version)]
struct Cli {
    /// Path to the working directory (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .rally/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a challenge through the interactive wizard
    Create,

    /// List friends available for invitations
    Friends {
        /// Filter the list with a fuzzy name search
        query: Option<String>,
    },

    /// Initialize a new .rally/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));
    let config = match &cli.config {
        Some(path) => rally::config::Config::from_file(path)?,
        None => rally::config::Config::from_dir(&work_dir)?,
    };

    match cli.command {
        Some(Commands::Create) | None => {
            cli::create::create_command(&config).await?;
        }
        Some(Commands::Friends { query }) => {
            cli::friends::friends_command(&config, query.as_deref()).await?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(&work_dir, force)?;
        }
    }

    Ok(())
}
