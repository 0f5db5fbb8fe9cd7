use relabel_core::error::RelabelError;
use std::path::PathBuf;

use crate::commands::{load_pages, resolve_catalog};
use crate::output;

pub fn run(
    input_file: PathBuf,
    catalog_file: Option<PathBuf>,
    preset: &str,
    output_format: &str,
    output_file: Option<PathBuf>,
    layout: bool,
) -> Result<(), RelabelError> {
    let catalog = resolve_catalog(catalog_file.as_deref(), preset)?;
    let pages = load_pages(&input_file, layout)?;
    let parsed = relabel_core::parse_pages(&pages, &catalog)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json)?;
            let matches: usize = parsed.iter().map(|p| p.matches.len()).sum();
            eprintln!(
                "Parsed {} page(s) with {} code(s), written to {}",
                parsed.len(),
                matches,
                path.display()
            );
        }
        None => {
            let output_str = match output_format {
                "json" => serde_json::to_string_pretty(&parsed)?,
                _ => output::table::format_parsed(&parsed, &catalog),
            };
            println!("{output_str}");
        }
    }

    Ok(())
}
