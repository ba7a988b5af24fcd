use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use exportrack::core::log::init_logging;

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

impl From<Commands> for exportrack::AppCommand {
    fn from(cmd: Commands) -> exportrack::AppCommand {
        match cmd {
            Commands::List => exportrack::AppCommand::List,
            Commands::Chart { top } => exportrack::AppCommand::Chart { top },
            Commands::Rate => exportrack::AppCommand::Rate,
            Commands::Session => exportrack::AppCommand::Session,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List products with prices converted at the current rate
    List,
    /// Chart the most expensive products
    Chart {
        /// Number of products to chart
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Show the current exchange rate
    Rate,
    /// Start an interactive session to add and remove products
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => exportrack::cli::setup::setup(),
        Some(cmd) => exportrack::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
