use clap::{Parser, Subcommand};
use colored::*;
use sitedesk_core::UserRole;
use std::process;

mod cli;

#[derive(Parser)]
#[command(name = "sitedesk")]
#[command(about = "Sitedesk - construction project dashboards")]
#[command(version)]
struct Cli {
    /// Print the serde form instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for a role
    Dashboard {
        /// owner, finance, manager, engineer, or admin
        #[arg(long, default_value = "owner")]
        role: UserRole,
    },
    /// List projects with derived progress
    Projects,
    /// Show the report for one project
    Report {
        /// Project ID to report on
        id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command, cli.json).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands, json: bool) -> anyhow::Result<()> {
    let store = sitedesk_cli::open_session()?;

    match command {
        Commands::Dashboard { role } => cli::dashboard::show_dashboard(&store, role, json).await,
        Commands::Projects => cli::projects::list_projects(&store, json).await,
        Commands::Report { id } => cli::projects::show_report(&store, &id, json).await,
    }
}
