use relabel_core::error::RelabelError;
use relabel_core::model::PlanMode;
use relabel_core::PlanOptions;
use std::path::PathBuf;
use tracing::debug;

use crate::commands::{load_pages, resolve_catalog};
use crate::output;

pub struct PlanArgs {
    pub input_file: PathBuf,
    pub catalog_file: Option<PathBuf>,
    pub preset: String,
    pub keep_order: bool,
    pub output_format: String,
    pub out: Option<PathBuf>,
    pub verbose: bool,
    pub layout: bool,
}

pub fn run(args: PlanArgs) -> Result<(), RelabelError> {
    let catalog = resolve_catalog(args.catalog_file.as_deref(), &args.preset)?;
    let pages = load_pages(&args.input_file, args.layout)?;

    let options = PlanOptions {
        mode: if args.keep_order {
            PlanMode::InPlace
        } else {
            PlanMode::Grouped
        },
    };

    let total = pages.len();
    let result =
        relabel_core::process_pages_with_progress(&pages, &catalog, &options, &mut |record| {
            debug!(page = record.page_index + 1, total, "processed page");
        })?;

    if let Some(path) = &args.out {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(path, json)?;
        eprintln!(
            "Planned {} page(s) ({} labeled), written to {}",
            result.plan.len(),
            result.labeled_count(),
            path.display()
        );
    }

    match args.output_format.as_str() {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&result, args.verbose),
    }

    Ok(())
}
