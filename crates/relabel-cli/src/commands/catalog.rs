use relabel_core::catalog::builtin;
use relabel_core::catalog::schema::SuppressionPolicy;
use relabel_core::error::RelabelError;
use std::path::Path;

pub fn list() -> Result<(), RelabelError> {
    println!("Available predefined catalogs:\n");
    for name in builtin::PRESETS {
        let catalog = builtin::load_preset(name)?;
        println!(
            "  {:<10} {} (v{}) marker \"{}\", {} product(s)",
            name,
            catalog.name,
            catalog.version,
            catalog.marker,
            catalog.products.len()
        );
        if let Some(ref desc) = catalog.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), RelabelError> {
    let catalog = builtin::load_preset(preset)?;

    println!("{} (version {})\n", catalog.name, catalog.version);

    if let Some(ref desc) = catalog.description {
        println!("{}\n", desc);
    }

    println!(
        "Codes are read from lines containing \"{}\". The quantity is the first",
        catalog.marker
    );
    println!("number on the following line (or two lines down when the code wraps).\n");

    println!("Products:\n");
    let max_code_len = catalog.products.keys().map(|c| c.len()).max().unwrap_or(8);
    for (code, name) in &catalog.products {
        println!("  {:<width$}  {}", code, name, width = max_code_len);
    }
    println!("\n  Any other code is labeled \"Unknown Product\".\n");

    if catalog.suppression.is_empty() {
        println!("No codes are suppressed.\n");
    } else {
        println!("Suppressed labels:\n");
        for rule in &catalog.suppression {
            let when = match rule.policy {
                SuppressionPolicy::Primary => {
                    "quantity 1 and no other code on the page"
                }
                SuppressionPolicy::Secondary => "quantity 1, regardless of other codes",
            };
            print!("  {:<width$}  {}", rule.code, when, width = max_code_len);
            if let Some(ref note) = rule.note {
                print!(" ({})", note);
            }
            println!();
        }
        println!();
    }

    if !catalog.tracked_products.is_empty() {
        println!(
            "Quantities are counted (1, 2, 3, more) for: {}\n",
            catalog.tracked_products.join(", ")
        );
    }

    println!("Pages without a remaining label are placed first, labeled pages after.");
    println!("An unlabeled page directly before a labeled page stays with it, unless");
    println!("either page had a suppressed label.\n");

    Ok(())
}

pub fn schema() -> Result<(), RelabelError> {
    print!(
        r#"JSON Catalog Schema
===================

A catalog tells `relabel` how to find product codes on a label page, what
to call them, and which labels to leave off.

Top-level fields:
  name          (string, required)  Human-readable name of the catalog
  description   (string, optional)  What this catalog is for
  version       (string, required)  Version identifier (e.g., "1.0")
  marker        (string, optional)  Text that precedes a code on the label.
                                    Matched literally and case-sensitively.
                                    Default: "SKU:"
  products      (object, required)  Map of product code -> product name.
                                    Codes are case-sensitive and may not
                                    contain whitespace.
  suppression   (array, optional)   Codes whose labels are sometimes left off
                                    (see below)
  tracked_products
                (array, optional)   Product names whose quantities are counted
                                    into buckets 1, 2, 3 and more
  stamp         (object, optional)  Where a downstream tool should stamp the
                                    label: x, y, font, size, color [r, g, b].
                                    Default: 5, 250, "Courier-Bold", 12, [1, 0, 0]

Each entry in the "suppression" array:
  code          (string, required)  Product code
  policy        (string, required)  "primary": left off when the quantity is 1
                                    and it is the only code on the page.
                                    "secondary": left off whenever the
                                    quantity is 1.
  note          (string, optional)  Explanation shown by `catalog explain`

Example:
{{
  "name": "My shop",
  "version": "1.0",
  "marker": "SKU:",
  "products": {{
    "TN0001": "OIL",
    "TN0002": "Potli"
  }},
  "suppression": [
    {{ "code": "TN0001", "policy": "primary" }}
  ],
  "tracked_products": ["OIL"]
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), RelabelError> {
    let catalog = relabel_core::catalog::load_catalog(file)?;

    println!("Catalog '{}' (v{}) is valid.", catalog.name, catalog.version);
    println!("  Marker: \"{}\"", catalog.marker);
    println!("  Products: {}", catalog.products.len());
    println!("  Suppression rules: {}", catalog.suppression.len());

    let warnings = relabel_core::catalog::catalog_warnings(&catalog);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
