//! KTH course catalog CLI
//!
//! Scrapes the catalog and writes the course and offering tables as CSV.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use course_catalog::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    session::{HttpSource, Navigator, RetryPolicy},
    storage::{LocalStorage, TableStorage},
};

/// course-catalog - KTH Course Catalog Scraper
#[derive(Parser, Debug)]
#[command(
    name = "course-catalog",
    version,
    about = "Scrapes the KTH course catalog into course and offering tables"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Output directory (overrides `[output] dir`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Scrape only the first few courses and write debug_ files
    #[arg(long)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape, normalize and write both tables (default)
    Scrape,

    /// Validate the configuration file
    Validate,

    /// Show the tables currently in the output directory
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.dir));
    let storage = LocalStorage::new(&output_dir);

    match cli.command.unwrap_or(Command::Scrape) {
        Command::Scrape => {
            config.validate()?;
            log::info!("Course catalog scraper starting...");

            let source = HttpSource::from_config(&config.browser)?;
            let mut nav = Navigator::new(source, RetryPolicy::from_config(&config.browser));

            let summary = pipeline::run_pipeline(&config, &storage, &mut nav, cli.debug).await?;
            log::info!(
                "Done: {} courses, {} offerings",
                summary.courses.rows,
                summary.offerings.rows
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} departments)", config.catalog.departments.len());
        }

        Command::Info => {
            if !output_dir.is_dir() {
                return Err(AppError::config(format!(
                    "Output directory {} not found",
                    output_dir.display()
                )));
            }
            log::info!("Output directory: {}", output_dir.display());

            for name in [
                config.output.courses_name(cli.debug),
                config.output.offerings_name(cli.debug),
            ] {
                match storage.read_table(&name).await? {
                    Some(table) => log::info!(
                        "{}: {} rows, {} columns",
                        name,
                        table.len(),
                        table.columns().len()
                    ),
                    None => log::info!("{}: not written yet", name),
                }
            }
        }
    }

    Ok(())
}
