//! Integration tests for the plan_pdf() end-to-end pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageText without
//! invoking pdftotext, so these tests run without poppler-utils.

use relabel_core::catalog::builtin::load_preset;
use relabel_core::catalog::parse_catalog_str;
use relabel_core::error::RelabelError;
use relabel_core::extraction::{PageText, PdfExtractor};
use relabel_core::model::PlanMode;
use relabel_core::{parse_pdf, plan_pdf, process_pages_with_progress, PlanOptions};

struct MockExtractor {
    pages: Vec<PageText>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageText>, RelabelError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn page(index: usize, lines: &[&str]) -> PageText {
    PageText::new(index, lines.iter().map(|s| s.to_string()).collect())
}

/// A shipping label with one order line.
fn label(index: usize, code: &str, qty: u32) -> PageText {
    page(
        index,
        &[
            "Ship To: A. Customer",
            "12 Market Road",
            &format!("SKU: {code}"),
            &format!("Qty: {qty}"),
            "Carrier: Standard",
        ],
    )
}

fn cover(index: usize) -> PageText {
    page(index, &["Packing slip", "Thank you for your order!"])
}

// ---------------------------------------------------------------------------
// Test 1: The mixed four-page scenario
// ---------------------------------------------------------------------------
#[test]
fn four_page_scenario() {
    let catalog = load_preset("default").unwrap();
    let extractor = MockExtractor {
        pages: vec![
            cover(0),
            label(1, "TN0002", 2),
            label(2, "TN0001", 1),
            label(3, "TN003", 1),
        ],
    };

    let result = plan_pdf(&[], &extractor, &catalog, &PlanOptions::default()).unwrap();

    // Page 2 is a lone single oil: suppressed, unlabeled, not pinnable.
    assert!(result.records[2].final_label_text.is_none());
    assert_eq!(result.suppressions.len(), 1);
    assert_eq!(result.suppressions[0].page_index, 2);

    // Page 0 (cover) pins to page 1 and the pair goes last.
    assert_eq!(result.plan.page_order(), vec![2, 3, 0, 1]);
    assert_eq!(result.plan.label_for(1), Some("→ Potli×2"));
    assert_eq!(result.plan.label_for(3), Some("→ Rollon"));
    assert_eq!(result.plan.label_for(0), None);
    assert_eq!(result.plan.label_for(2), None);

    assert_eq!(result.labeled_count(), 2);
    assert_eq!(result.unlabeled_count(), 2);
    assert_eq!(result.counts["OIL"].one, 1);
    assert_eq!(result.counts["Potli"].two, 1);
}

// ---------------------------------------------------------------------------
// Test 2: Suppression depends on what else is on the page
// ---------------------------------------------------------------------------
#[test]
fn primary_code_kept_when_page_has_other_codes() {
    let catalog = load_preset("default").unwrap();
    let extractor = MockExtractor {
        pages: vec![
            label(0, "TN0001", 1),
            page(
                1,
                &["SKU: TN0001", "Qty: 1", "SKU: ZX-77", "Qty: 1"],
            ),
        ],
    };

    let result = plan_pdf(&[], &extractor, &catalog, &PlanOptions::default()).unwrap();

    assert!(result.records[0].final_label_text.is_none());
    assert_eq!(
        result.records[1].final_label_text.as_deref(),
        Some("→ OIL | → Unknown Product")
    );
}

// ---------------------------------------------------------------------------
// Test 3: A wrapped code is rebuilt and its quantity read two lines down
// ---------------------------------------------------------------------------
#[test]
fn split_code_is_labeled() {
    let catalog = load_preset("default").unwrap();
    let extractor = MockExtractor {
        pages: vec![
            page(0, &["SKU: TS-NLT5-", "CZ47", "3"]),
            page(1, &["SKU: TS-NLT5-", "CZ47", "1"]),
        ],
    };

    let parsed = parse_pdf(&[], &extractor, &catalog).unwrap();
    assert_eq!(parsed[0].matches[0].code, "TS-NLT5-CZ47");
    assert_eq!(parsed[0].matches[0].quantity, 3);

    let result = plan_pdf(&[], &extractor, &catalog, &PlanOptions::default()).unwrap();
    assert_eq!(
        result.records[0].final_label_text.as_deref(),
        Some("→ Unknown Product×3")
    );
    // Secondary code at quantity 1 is always suppressed.
    assert!(result.records[1].final_label_text.is_none());
    assert_eq!(result.plan.page_order(), vec![1, 0]);
}

// ---------------------------------------------------------------------------
// Test 4: Pinned pair lands after all other labeled pages
// ---------------------------------------------------------------------------
#[test]
fn cover_page_stays_with_its_label() {
    let catalog = load_preset("default").unwrap();
    let extractor = MockExtractor {
        pages: vec![
            label(0, "TN0002", 1),
            cover(1),
            label(2, "TN0001", 1),
            label(3, "TN003", 2),
            cover(4),
            label(5, "TN0002", 3),
            label(6, "TN003", 1),
        ],
    };

    let result = plan_pdf(&[], &extractor, &catalog, &PlanOptions::default()).unwrap();
    let order = result.plan.page_order();

    // 1 -> 2 cannot pin (page 2 lost its only label); 2 -> 3 is blocked by
    // the suppression log; 4 -> 5 pins.
    assert_eq!(order, vec![1, 2, 0, 3, 6, 4, 5]);
    assert_eq!(result.plan.placements[6].label_text.as_deref(), Some("→ Potli×3"));
}

// ---------------------------------------------------------------------------
// Test 5: No pin when the following page is itself suppressed
// ---------------------------------------------------------------------------
#[test]
fn no_pin_onto_suppressed_page() {
    let catalog = load_preset("default").unwrap();
    let extractor = MockExtractor {
        pages: vec![
            label(0, "TN0002", 2),
            label(1, "TN003", 1),
            label(2, "TN0002", 1),
            label(3, "TN003", 3),
            cover(4),
            label(5, "TN0001", 1),
        ],
    };

    let result = plan_pdf(&[], &extractor, &catalog, &PlanOptions::default()).unwrap();
    assert_eq!(result.plan.page_order(), vec![4, 5, 0, 1, 2, 3]);
}

// ---------------------------------------------------------------------------
// Test 6: Tracked-product counters
// ---------------------------------------------------------------------------
#[test]
fn counters_bucket_quantities() {
    let catalog = load_preset("default").unwrap();
    let extractor = MockExtractor {
        pages: vec![
            label(0, "TN0001", 1),
            label(1, "TN0001", 2),
            label(2, "TN0001", 5),
            label(3, "TN003", 4),
        ],
    };

    let result = plan_pdf(&[], &extractor, &catalog, &PlanOptions::default()).unwrap();
    let oil = result.counts["OIL"];
    assert_eq!((oil.one, oil.two, oil.three, oil.more), (1, 1, 0, 1));

    // Tracked products with no matches still report zeroes; untracked ones are absent.
    assert_eq!(result.counts["Potli"].total(), 0);
    assert!(!result.counts.contains_key("Rollon"));
}

// ---------------------------------------------------------------------------
// Test 7: Every page appears exactly once
// ---------------------------------------------------------------------------
#[test]
fn every_page_placed_once() {
    let catalog = load_preset("default").unwrap();
    let codes = ["TN0001", "TN0002", "TN003", "TS-NLT5-CZ47"];
    let pages: Vec<PageText> = (0..60)
        .map(|i| {
            if i % 5 == 0 {
                cover(i)
            } else {
                label(i, codes[i % codes.len()], (i % 4) as u32 + 1)
            }
        })
        .collect();
    let extractor = MockExtractor { pages };

    let result = plan_pdf(&[], &extractor, &catalog, &PlanOptions::default()).unwrap();
    assert_eq!(result.plan.len(), 60);
    let mut order = result.plan.page_order();
    order.sort_unstable();
    assert_eq!(order, (0..60).collect::<Vec<_>>());

    let copied: usize = result.copy_runs.iter().map(|r| r.page_count()).sum();
    assert_eq!(copied, 60);
}

// ---------------------------------------------------------------------------
// Test 8: In-place mode only annotates
// ---------------------------------------------------------------------------
#[test]
fn in_place_mode_keeps_order() {
    let catalog = load_preset("default").unwrap();
    let extractor = MockExtractor {
        pages: vec![cover(0), label(1, "TN0002", 2), label(2, "TN0001", 1)],
    };
    let options = PlanOptions {
        mode: PlanMode::InPlace,
    };

    let result = plan_pdf(&[], &extractor, &catalog, &options).unwrap();
    assert_eq!(result.plan.page_order(), vec![0, 1, 2]);
    assert_eq!(result.plan.label_for(1), Some("→ Potli×2"));
    // cover, labeled page, suppressed page: the label breaks the run
    assert_eq!(result.copy_runs.len(), 3);
}

// ---------------------------------------------------------------------------
// Test 9: Custom catalog with its own marker and policies
// ---------------------------------------------------------------------------
#[test]
fn custom_catalog() {
    let catalog = parse_catalog_str(
        r#"{
            "name": "Tea shop",
            "version": "1",
            "marker": "Item #",
            "products": { "GRN-1": "Green", "BLK-2": "Black" },
            "suppression": [ { "code": "BLK-2", "policy": "secondary" } ],
            "tracked_products": ["Green"]
        }"#,
    )
    .unwrap();
    let extractor = MockExtractor {
        pages: vec![
            page(0, &["Item # GRN-1", "x3"]),
            page(1, &["Item # BLK-2", "x1"]),
            page(2, &["SKU: GRN-1", "x3"]),
        ],
    };

    let result = plan_pdf(&[], &extractor, &catalog, &PlanOptions::default()).unwrap();
    assert_eq!(result.records[0].final_label_text.as_deref(), Some("→ Green×3"));
    assert!(result.records[1].final_label_text.is_none());
    assert!(result.records[2].labels.is_empty());
    assert_eq!(result.counts["Green"].three, 1);
}

// ---------------------------------------------------------------------------
// Test 10: Progress callback sees each page in order
// ---------------------------------------------------------------------------
#[test]
fn progress_callback_in_page_order() {
    let catalog = load_preset("default").unwrap();
    let pages = vec![cover(0), label(1, "TN003", 1), cover(2)];
    let mut seen = Vec::new();

    process_pages_with_progress(&pages, &catalog, &PlanOptions::default(), &mut |r| {
        seen.push(r.page_index)
    })
    .unwrap();

    assert_eq!(seen, vec![0, 1, 2]);
}

// ---------------------------------------------------------------------------
// Test 11: Extraction errors propagate
// ---------------------------------------------------------------------------
#[test]
fn extraction_error_propagates() {
    struct FailingExtractor;

    impl PdfExtractor for FailingExtractor {
        fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageText>, RelabelError> {
            Err(RelabelError::Extraction("corrupt file".into()))
        }

        fn backend_name(&self) -> &str {
            "failing"
        }
    }

    let catalog = load_preset("default").unwrap();
    let err = plan_pdf(&[], &FailingExtractor, &catalog, &PlanOptions::default()).unwrap_err();
    assert!(matches!(err, RelabelError::Extraction(_)));
}

// ---------------------------------------------------------------------------
// Test 12: Duplicate page indices are refused
// ---------------------------------------------------------------------------
#[test]
fn duplicate_page_index_is_inconsistent() {
    let catalog = load_preset("default").unwrap();
    let extractor = MockExtractor {
        pages: vec![cover(0), cover(0)],
    };
    let err = plan_pdf(&[], &extractor, &catalog, &PlanOptions::default()).unwrap_err();
    assert!(matches!(err, RelabelError::PlanInconsistent(_)));
}
