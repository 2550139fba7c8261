use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod batch;
pub mod triage;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// Triage a single raw email file and print the outcome
    Triage {
        /// Path to a file holding the raw (possibly HTML) email body
        #[arg(long)]
        file: PathBuf,

        /// The email's subject line
        #[arg(long, default_value = "")]
        subject: String,

        /// The email's Date header, used to resolve relative dates
        /// like "next Friday" against the email's own date
        #[arg(long)]
        date: Option<String>,
    },
    /// Triage every email file in a directory, one at a time
    Batch {
        /// Directory of raw email body files
        #[arg(long)]
        dir: PathBuf,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .init();

    let args = Cli::parse();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Triage {
            file,
            subject,
            date,
        }) => {
            triage::run(&file, &subject, date.as_deref(), &config).await?;
        }
        Some(Command::Batch { dir }) => {
            batch::run(&dir, &config).await?;
        }
        None => {}
    }

    Ok(())
}
