use crate::catalog::schema::StampStyle;
use crate::model::{
    CodeMatch, PageRecord, PlacementPlan, PlanMode, ProductCounts, SuppressionDecision,
};
use crate::plan::CopyRun;
use serde::{Deserialize, Serialize};

/// Code matches found on one page (parse-only output).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMatches {
    pub page_index: usize,
    pub matches: Vec<CodeMatch>,
}

/// Full result of one processing pass over a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Name of the catalog that was applied.
    pub catalog_name: String,
    pub mode: PlanMode,
    /// Per-page labels, in source order.
    pub records: Vec<PageRecord>,
    /// Every label entry kept off its page.
    pub suppressions: Vec<SuppressionDecision>,
    /// Output page order with annotations.
    pub plan: PlacementPlan,
    /// The plan folded into contiguous copy ranges.
    pub copy_runs: Vec<CopyRun>,
    /// Quantity buckets per tracked product.
    pub counts: ProductCounts,
    /// Stamp placement hint for whatever writes the output document.
    pub stamp: StampStyle,
}

impl ProcessingResult {
    pub fn labeled_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_labeled()).count()
    }

    pub fn unlabeled_count(&self) -> usize {
        self.records.len() - self.labeled_count()
    }
}
