mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "relabel",
    version,
    about = "Find order codes on shipping-label PDFs and plan a labeled page order"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product codes found on each page (without planning)
    Parse {
        /// Path to a PDF or a JSON array of pre-extracted pages
        input_file: PathBuf,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Extract text with pdftotext -layout
        #[arg(long)]
        layout: bool,
    },
    /// Label pages and compute the output page order
    Plan {
        /// Path to a PDF or a JSON array of pre-extracted pages
        input_file: PathBuf,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Keep the source page order and only attach labels
        #[arg(long)]
        keep_order: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the full result to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Show per-page labels and suppression details
        #[arg(long)]
        verbose: bool,

        /// Extract text with pdftotext -layout
        #[arg(long)]
        layout: bool,
    },
    /// Manage and inspect product catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(clap::Args)]
struct CatalogArgs {
    /// Custom JSON catalog file (overrides --preset)
    #[arg(short, long = "catalog", value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Predefined catalog
    #[arg(short, long = "preset", value_name = "NAME", default_value = "default")]
    preset: String,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List predefined catalogs
    List,
    /// Explain a catalog in plain language
    Explain {
        /// Preset name (e.g., "default")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom catalog file
    Validate {
        /// Path to JSON catalog file
        file: PathBuf,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            catalog,
            output,
            out,
            layout,
        } => commands::parse::run(
            input_file,
            catalog.catalog,
            &catalog.preset,
            &output,
            out,
            layout,
        ),
        Commands::Plan {
            input_file,
            catalog,
            keep_order,
            output,
            out,
            verbose,
            layout,
        } => commands::plan::run(commands::plan::PlanArgs {
            input_file,
            catalog_file: catalog.catalog,
            preset: catalog.preset,
            keep_order,
            output_format: output,
            out,
            verbose,
            layout,
        }),
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(),
            CatalogAction::Explain { preset } => commands::catalog::explain(&preset),
            CatalogAction::Schema => commands::catalog::schema(),
            CatalogAction::Validate { file } => commands::catalog::validate(&file),
        },
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
