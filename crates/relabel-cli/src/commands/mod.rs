pub mod catalog;
pub mod parse;
pub mod plan;

use relabel_core::catalog::builtin;
use relabel_core::catalog::schema::CatalogDef;
use relabel_core::error::RelabelError;
use relabel_core::extraction::pdftotext::PdftotextExtractor;
use relabel_core::extraction::{PageText, PdfExtractor};
use std::path::Path;
use tracing::info;

/// Load the catalog from a file if given, else the named preset.
pub fn resolve_catalog(
    catalog_file: Option<&Path>,
    preset: &str,
) -> Result<CatalogDef, RelabelError> {
    let catalog = match catalog_file {
        Some(path) => relabel_core::catalog::load_catalog(path)?,
        None => builtin::load_preset(preset)?,
    };
    info!(catalog = %catalog.name, version = %catalog.version, "using catalog");
    Ok(catalog)
}

/// Read pages from a PDF (via pdftotext) or a pre-extracted JSON file.
pub fn load_pages(input_file: &Path, layout: bool) -> Result<Vec<PageText>, RelabelError> {
    let is_json = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let json_bytes = std::fs::read(input_file)?;
        let pages: Vec<PageText> = serde_json::from_slice(&json_bytes)?;
        info!(path = %input_file.display(), pages = pages.len(), "loaded pre-extracted pages");
        Ok(pages)
    } else {
        let pdf_bytes = std::fs::read(input_file)?;
        let extractor = PdftotextExtractor::with_layout(layout);
        let pages = extractor.extract_pages(&pdf_bytes)?;
        info!(
            path = %input_file.display(),
            backend = extractor.backend_name(),
            pages = pages.len(),
            "extracted page text"
        );
        Ok(pages)
    }
}
