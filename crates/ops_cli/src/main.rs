use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use ops_cli::commands;
use ops_service::Config;

#[derive(Parser)]
#[command(name = "ops")]
#[command(about = "NGO support operations console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the database schema from embedded assets
    Rebuild(commands::rebuild::RebuildArgs),

    /// Submit a form payload through the mapping engine
    Submit(commands::submit::SubmitArgs),

    /// Move a work item to a new status
    Transition(commands::transition::TransitionArgs),

    /// Attach an evidence document to a work item
    Attach(commands::attach::AttachArgs),

    /// Print the operations overview report
    Report(commands::report::ReportArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let cli = Cli::parse();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    match cli.command {
        Commands::Rebuild(args) => {
            commands::rebuild::execute(pool, args).await?;
        }
        Commands::Submit(args) => {
            commands::submit::execute(pool, args).await?;
        }
        Commands::Transition(args) => {
            commands::transition::execute(pool, args).await?;
        }
        Commands::Attach(args) => {
            commands::attach::execute(pool, args).await?;
        }
        Commands::Report(args) => {
            commands::report::execute(pool, args).await?;
        }
    }

    Ok(())
}
