//! Callboard CLI
//!
//! Command-line interface for one-shot reports:
//! - Run the full report pipeline from a text query
//! - Preview the generated SQL without executing it
//! - Extract structured requirements
//! - Generate a default config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use callboard::backend;
use callboard::config::{generate_default_config, Config};
use callboard::intent::extract_requirements;
use callboard::workflow::run_report_pipeline;

#[derive(Parser)]
#[command(name = "callboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Operational text-to-SQL reporting")]
#[command(
    long_about = "Callboard turns free-text operational queries into parameterized SQL,\nexecutes them, and summarizes the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a report from a text query
    Report {
        /// The query text, e.g. "lowest hold time today at 2pm"
        text: String,
        /// Print the generated SQL instead of executing it
        #[arg(long)]
        sql_only: bool,
    },

    /// Extract structured requirements from a text query
    Extract {
        /// The query text
        text: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report { text, sql_only } => {
            let config = Config::load_default();
            let backend = backend::from_config(&config);
            let report =
                run_report_pipeline(&text, sql_only, &config, backend.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Extract { text } => {
            let requirements = extract_requirements(&text);
            println!("{}", serde_json::to_string_pretty(&requirements)?);
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote default config to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}
