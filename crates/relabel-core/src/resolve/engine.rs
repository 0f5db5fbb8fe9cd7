use crate::catalog::schema::{CatalogDef, SuppressionPolicy};
use crate::model::{CodeMatch, LabelEntry, PageRecord, ProductCounts, SuppressionDecision};
use tracing::warn;

/// Everything resolved for a single page.
///
/// Counts cover this page only; callers fold them together in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResolution {
    pub record: PageRecord,
    pub suppressions: Vec<SuppressionDecision>,
    pub counts: ProductCounts,
}

/// Turns code matches into labels using a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a CatalogDef,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a CatalogDef) -> Self {
        Resolver { catalog }
    }

    pub fn catalog(&self) -> &'a CatalogDef {
        self.catalog
    }

    /// Resolve one page's matches into its labels, suppressions and counts.
    pub fn resolve_page(&self, page_index: usize, matches: &[CodeMatch]) -> PageResolution {
        let codes_on_page: Vec<String> = matches.iter().map(|m| m.code.clone()).collect();
        let mut labels = Vec::with_capacity(matches.len());
        let mut suppressions = Vec::new();
        let mut counts = ProductCounts::new();

        for m in matches {
            if !self.catalog.is_known(&m.code) {
                warn!(page = page_index + 1, code = %m.code, "unknown product code");
            }
            let product_name = self.catalog.product_name(&m.code);

            if self.catalog.is_tracked(product_name) {
                counts
                    .entry(product_name.to_string())
                    .or_default()
                    .record(m.quantity);
            }

            let suppressed = self.is_suppressed(m, matches.len());
            if suppressed {
                suppressions.push(SuppressionDecision {
                    page_index,
                    code: m.code.clone(),
                    quantity: m.quantity,
                    codes_on_page: codes_on_page.clone(),
                });
            }

            labels.push(LabelEntry {
                code: m.code.clone(),
                display_text: LabelEntry::display_for(product_name, m.quantity),
                suppressed,
            });
        }

        PageResolution {
            record: PageRecord::from_labels(page_index, labels),
            suppressions,
            counts,
        }
    }

    /// Apply the code's suppression policy, if it has one.
    ///
    /// `match_count` is the number of matches on the page, this one included.
    pub fn is_suppressed(&self, m: &CodeMatch, match_count: usize) -> bool {
        match self.catalog.policy_for(&m.code) {
            Some(SuppressionPolicy::Primary) => m.quantity == 1 && match_count == 1,
            Some(SuppressionPolicy::Secondary) => m.quantity == 1,
            None => false,
        }
    }
}
