use anyhow::Result;
use clap::{Parser, Subcommand};
use moneygrab::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for moneygrab::AppCommand {
    fn from(cmd: Commands) -> moneygrab::AppCommand {
        match cmd {
            Commands::Serve => moneygrab::AppCommand::Serve,
            Commands::Fetch => moneygrab::AppCommand::Fetch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Scrape rates periodically and serve them over HTTP (default)
    Serve,
    /// Scrape rates once and write the snapshot
    Fetch,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Setup => moneygrab::cli::setup::setup(),
        cmd => moneygrab::run_command(cmd.into(), cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
