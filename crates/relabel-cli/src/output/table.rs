use relabel_core::catalog::schema::CatalogDef;
use relabel_core::model::{PlanMode, QuantityBucket};
use relabel_core::outcome::{PageMatches, ProcessingResult};
use std::fmt::Write;

const BUCKETS: [QuantityBucket; 4] = [
    QuantityBucket::One,
    QuantityBucket::Two,
    QuantityBucket::Three,
    QuantityBucket::More,
];

pub fn print(result: &ProcessingResult, verbose: bool) {
    println!("=== {} ===\n", result.catalog_name);

    let mode = match result.mode {
        PlanMode::Grouped => "unlabeled first, labeled after",
        PlanMode::InPlace => "source order kept",
    };
    println!(
        "  {} page(s): {} labeled, {} unlabeled ({})\n",
        result.records.len(),
        result.labeled_count(),
        result.unlabeled_count(),
        mode
    );

    // Output order (page numbers are 1-based for display)
    println!("  Page order:");
    for (pos, p) in result.plan.placements.iter().enumerate() {
        match &p.label_text {
            Some(label) => println!("    {:>4}  page {:<5} {}", pos + 1, p.page_index + 1, label),
            None => println!("    {:>4}  page {}", pos + 1, p.page_index + 1),
        }
    }
    println!();

    if verbose {
        println!("  Copy runs:");
        for run in &result.copy_runs {
            let range = if run.first == run.last {
                format!("{}", run.first + 1)
            } else {
                format!("{}-{}", run.first + 1, run.last + 1)
            };
            match &run.label_text {
                Some(label) => println!("    {:<10} stamp \"{}\"", range, label),
                None => println!("    {:<10} ({} page(s))", range, run.page_count()),
            }
        }
        println!();

        if !result.suppressions.is_empty() {
            println!("  Suppressed labels:");
            for s in &result.suppressions {
                println!(
                    "    page {:<5} {} x{} (codes on page: {})",
                    s.page_index + 1,
                    s.code,
                    s.quantity,
                    s.codes_on_page.join(", ")
                );
            }
            println!();
        }
    }

    if !result.counts.is_empty() {
        let max_name = result.counts.keys().map(|n| n.len()).max().unwrap_or(8);
        print!("  {:<width$}", "Quantity", width = max_name + 2);
        for bucket in BUCKETS {
            print!("  {:>6}", bucket.to_string());
        }
        println!();
        for (name, counts) in &result.counts {
            print!("  {:<width$}", name, width = max_name + 2);
            for bucket in BUCKETS {
                print!("  {:>6}", counts.get(bucket));
            }
            println!();
        }
        println!();
    }
}

/// Format parse-only output as a per-page listing.
pub fn format_parsed(pages: &[PageMatches], catalog: &CatalogDef) -> String {
    let mut out = String::new();

    for page in pages {
        if page.matches.is_empty() {
            let _ = writeln!(out, "Page {}: no codes", page.page_index + 1);
            continue;
        }
        let _ = writeln!(out, "Page {}:", page.page_index + 1);
        for m in &page.matches {
            let _ = writeln!(
                out,
                "  line {:<4} {:<16} x{:<4} {}",
                m.source_line_index + 1,
                m.code,
                m.quantity,
                catalog.product_name(&m.code)
            );
        }
    }

    let total: usize = pages.iter().map(|p| p.matches.len()).sum();
    let _ = write!(out, "\n{} code(s) on {} page(s)", total, pages.len());
    out
}
