use crate::error::RelabelError;
use crate::model::{PageRecord, Placement, PlacementPlan, PlanMode, SuppressionDecision};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Compute the output page order for the given mode.
pub fn plan_pages(
    records: &[PageRecord],
    suppressions: &[SuppressionDecision],
    mode: PlanMode,
) -> Result<PlacementPlan, RelabelError> {
    match mode {
        PlanMode::Grouped => plan_grouped(records, suppressions),
        PlanMode::InPlace => plan_in_place(records),
    }
}

/// Unlabeled pages first, then labeled pages, then pinned pairs.
///
/// An unlabeled page directly followed in the source by a labeled page is
/// pinned to it, unless either page appears in the suppression log. Pinned
/// pairs are emitted after the remaining labeled pages, in the order found.
pub fn plan_grouped(
    records: &[PageRecord],
    suppressions: &[SuppressionDecision],
) -> Result<PlacementPlan, RelabelError> {
    check_unique_indices(records)?;

    let suppressed: HashSet<usize> = suppressions.iter().map(|s| s.page_index).collect();
    let labeled: HashMap<usize, &PageRecord> = records
        .iter()
        .filter(|r| r.is_labeled())
        .map(|r| (r.page_index, r))
        .collect();

    let mut pinned: HashSet<usize> = HashSet::new();
    let mut pairs: Vec<(&PageRecord, &PageRecord)> = Vec::new();

    for page in records.iter().filter(|r| !r.is_labeled()) {
        let p = page.page_index;
        let Some(next) = p.checked_add(1).and_then(|n| labeled.get(&n)) else {
            continue;
        };
        if pinned.contains(&p) || pinned.contains(&next.page_index) {
            continue;
        }
        if suppressed.contains(&p) || suppressed.contains(&next.page_index) {
            debug!(page = p + 1, "pin skipped: suppressed label involved");
            continue;
        }
        debug!(page = p + 1, next = next.page_index + 1, "pinned unlabeled page to next");
        pinned.insert(p);
        pinned.insert(next.page_index);
        pairs.push((page, *next));
    }

    let mut placements = Vec::with_capacity(records.len());
    placements.extend(
        records
            .iter()
            .filter(|r| !r.is_labeled() && !pinned.contains(&r.page_index))
            .map(placement),
    );
    placements.extend(
        records
            .iter()
            .filter(|r| r.is_labeled() && !pinned.contains(&r.page_index))
            .map(placement),
    );
    for (unlabeled, labeled) in pairs {
        placements.push(placement(unlabeled));
        placements.push(placement(labeled));
    }

    let plan = PlacementPlan { placements };
    verify_exactly_once(records, &plan)?;
    Ok(plan)
}

/// Keep the source order; only attach labels.
pub fn plan_in_place(records: &[PageRecord]) -> Result<PlacementPlan, RelabelError> {
    check_unique_indices(records)?;
    let plan = PlacementPlan {
        placements: records.iter().map(placement).collect(),
    };
    verify_exactly_once(records, &plan)?;
    Ok(plan)
}

fn placement(record: &PageRecord) -> Placement {
    Placement {
        page_index: record.page_index,
        label_text: record.final_label_text.clone(),
    }
}

fn check_unique_indices(records: &[PageRecord]) -> Result<(), RelabelError> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(r.page_index) {
            return Err(RelabelError::PlanInconsistent(format!(
                "page {} appears more than once in the input",
                r.page_index + 1
            )));
        }
    }
    Ok(())
}

/// Every input page must appear in the plan exactly once.
fn verify_exactly_once(records: &[PageRecord], plan: &PlacementPlan) -> Result<(), RelabelError> {
    if plan.len() != records.len() {
        return Err(RelabelError::PlanInconsistent(format!(
            "plan has {} pages but the input has {}",
            plan.len(),
            records.len()
        )));
    }

    let expected: HashSet<usize> = records.iter().map(|r| r.page_index).collect();
    let mut seen = HashSet::with_capacity(plan.len());
    for p in &plan.placements {
        if !expected.contains(&p.page_index) {
            return Err(RelabelError::PlanInconsistent(format!(
                "page {} is not in the input",
                p.page_index + 1
            )));
        }
        if !seen.insert(p.page_index) {
            return Err(RelabelError::PlanInconsistent(format!(
                "page {} is placed twice",
                p.page_index + 1
            )));
        }
    }
    Ok(())
}

/// A block of output pages that can be copied from the source in one go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRun {
    /// First source page index (inclusive).
    pub first: usize,
    /// Last source page index (inclusive).
    pub last: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,
}

impl CopyRun {
    pub fn page_count(&self) -> usize {
        self.last - self.first + 1
    }
}

/// Fold a plan into copy runs.
///
/// Consecutive unlabeled placements whose source pages are also consecutive
/// share a run. A labeled page is always a run of its own so it can be
/// stamped after copying.
pub fn copy_runs(plan: &PlacementPlan) -> Vec<CopyRun> {
    let mut runs: Vec<CopyRun> = Vec::new();

    for p in &plan.placements {
        if p.label_text.is_none() {
            if let Some(run) = runs.last_mut() {
                if run.label_text.is_none() && run.last + 1 == p.page_index {
                    run.last = p.page_index;
                    continue;
                }
            }
        }
        runs.push(CopyRun {
            first: p.page_index,
            last: p.page_index,
            label_text: p.label_text.clone(),
        });
    }

    runs
}
