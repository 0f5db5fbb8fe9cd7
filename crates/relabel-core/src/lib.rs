pub mod catalog;
pub mod error;
pub mod extraction;
pub mod model;
pub mod outcome;
pub mod parsing;
pub mod plan;
pub mod resolve;

use catalog::schema::CatalogDef;
use error::RelabelError;
use extraction::{PageText, PdfExtractor};
use model::{merge_counts, BucketCounts, PageRecord, PlanMode, ProductCounts};
use outcome::{PageMatches, ProcessingResult};
use parsing::LineParser;
use resolve::Resolver;
use tracing::{debug, info};

/// Options for a processing pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    pub mode: PlanMode,
}

/// Extract a PDF's text and list the product codes found on each page.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    catalog: &CatalogDef,
) -> Result<Vec<PageMatches>, RelabelError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    parse_pages(&pages, catalog)
}

/// List the product codes found on each page.
pub fn parse_pages(
    pages: &[PageText],
    catalog: &CatalogDef,
) -> Result<Vec<PageMatches>, RelabelError> {
    let parser = LineParser::for_catalog(catalog)?;
    Ok(pages
        .iter()
        .map(|page| PageMatches {
            page_index: page.page_index,
            matches: parser.parse_page(page),
        })
        .collect())
}

/// Main API entry point: extract, label and plan a PDF.
pub fn plan_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    catalog: &CatalogDef,
    options: &PlanOptions,
) -> Result<ProcessingResult, RelabelError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    info!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted page text"
    );
    process_pages(&pages, catalog, options)
}

/// Label and plan already-extracted pages.
pub fn process_pages(
    pages: &[PageText],
    catalog: &CatalogDef,
    options: &PlanOptions,
) -> Result<ProcessingResult, RelabelError> {
    process_pages_with_progress(pages, catalog, options, &mut |_| {})
}

/// Like [`process_pages`], calling `on_page` after each page is resolved.
///
/// Pages are resolved independently and their counts are merged in page
/// order, so the result does not depend on how the per-page work is run.
pub fn process_pages_with_progress(
    pages: &[PageText],
    catalog: &CatalogDef,
    options: &PlanOptions,
    on_page: &mut dyn FnMut(&PageRecord),
) -> Result<ProcessingResult, RelabelError> {
    let parser = LineParser::for_catalog(catalog)?;
    let resolver = Resolver::new(catalog);

    let mut records = Vec::with_capacity(pages.len());
    let mut suppressions = Vec::new();
    let mut counts: ProductCounts = catalog
        .tracked_products
        .iter()
        .map(|name| (name.clone(), BucketCounts::default()))
        .collect();

    for page in pages {
        let matches = parser.parse_page(page);
        let resolution = resolver.resolve_page(page.page_index, &matches);

        match &resolution.record.final_label_text {
            Some(label) => debug!(page = page.page_index + 1, label = %label, "labeled page"),
            None => debug!(
                page = page.page_index + 1,
                matches = matches.len(),
                "no label"
            ),
        }

        on_page(&resolution.record);
        counts = merge_counts(counts, &resolution.counts);
        suppressions.extend(resolution.suppressions);
        records.push(resolution.record);
    }

    let plan = plan::plan_pages(&records, &suppressions, options.mode)?;
    let copy_runs = plan::copy_runs(&plan);

    let result = ProcessingResult {
        catalog_name: catalog.name.clone(),
        mode: options.mode,
        records,
        suppressions,
        plan,
        copy_runs,
        counts,
        stamp: catalog.stamp.clone(),
    };

    info!(
        labeled = result.labeled_count(),
        unlabeled = result.unlabeled_count(),
        suppressed = result.suppressions.len(),
        mode = %options.mode,
        "planned pages"
    );

    Ok(result)
}
