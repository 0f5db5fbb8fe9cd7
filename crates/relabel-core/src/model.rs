use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Product name used for codes missing from the catalog.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Separator between the labels of one page.
pub const LABEL_SEPARATOR: &str = " | ";

/// A product code found on a page, with the quantity read next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMatch {
    pub code: String,
    /// Always at least 1.
    pub quantity: u32,
    /// Index of the line carrying the code marker.
    pub source_line_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub code: String,
    pub display_text: String,
    pub suppressed: bool,
}

impl LabelEntry {
    /// Format the annotation for a product: `→ Name` or `→ Name×qty`.
    pub fn display_for(product_name: &str, quantity: u32) -> String {
        if quantity > 1 {
            format!("→ {product_name}×{quantity}")
        } else {
            format!("→ {product_name}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub page_index: usize,
    pub labels: Vec<LabelEntry>,
    /// Non-suppressed labels joined with `" | "`, or None when nothing remains.
    pub final_label_text: Option<String>,
}

impl PageRecord {
    pub fn from_labels(page_index: usize, labels: Vec<LabelEntry>) -> Self {
        let kept: Vec<&str> = labels
            .iter()
            .filter(|l| !l.suppressed)
            .map(|l| l.display_text.as_str())
            .collect();
        let final_label_text = if kept.is_empty() {
            None
        } else {
            Some(kept.join(LABEL_SEPARATOR))
        };
        PageRecord {
            page_index,
            labels,
            final_label_text,
        }
    }

    pub fn is_labeled(&self) -> bool {
        self.final_label_text.is_some()
    }
}

/// Record of a label entry that was kept off the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionDecision {
    pub page_index: usize,
    pub code: String,
    pub quantity: u32,
    /// Every code matched on the page, in match order.
    pub codes_on_page: Vec<String>,
}

/// Quantity bucket used by the tracked-product counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuantityBucket {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "more")]
    More,
}

impl QuantityBucket {
    pub fn for_quantity(quantity: u32) -> Self {
        match quantity {
            0 | 1 => QuantityBucket::One,
            2 => QuantityBucket::Two,
            3 => QuantityBucket::Three,
            _ => QuantityBucket::More,
        }
    }
}

impl fmt::Display for QuantityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityBucket::One => write!(f, "1"),
            QuantityBucket::Two => write!(f, "2"),
            QuantityBucket::Three => write!(f, "3"),
            QuantityBucket::More => write!(f, "more"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    #[serde(rename = "1")]
    pub one: u32,
    #[serde(rename = "2")]
    pub two: u32,
    #[serde(rename = "3")]
    pub three: u32,
    pub more: u32,
}

impl BucketCounts {
    pub fn record(&mut self, quantity: u32) {
        match QuantityBucket::for_quantity(quantity) {
            QuantityBucket::One => self.one += 1,
            QuantityBucket::Two => self.two += 1,
            QuantityBucket::Three => self.three += 1,
            QuantityBucket::More => self.more += 1,
        }
    }

    pub fn get(&self, bucket: QuantityBucket) -> u32 {
        match bucket {
            QuantityBucket::One => self.one,
            QuantityBucket::Two => self.two,
            QuantityBucket::Three => self.three,
            QuantityBucket::More => self.more,
        }
    }

    pub fn merged(self, other: BucketCounts) -> BucketCounts {
        BucketCounts {
            one: self.one + other.one,
            two: self.two + other.two,
            three: self.three + other.three,
            more: self.more + other.more,
        }
    }

    pub fn total(&self) -> u32 {
        self.one + self.two + self.three + self.more
    }
}

/// Bucketed counts per tracked product name.
pub type ProductCounts = BTreeMap<String, BucketCounts>;

/// Fold one page's counts into a running total.
pub fn merge_counts(mut total: ProductCounts, page: &ProductCounts) -> ProductCounts {
    for (name, counts) in page {
        let entry = total.entry(name.clone()).or_default();
        *entry = entry.merged(*counts);
    }
    total
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub page_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,
}

/// The output page order, with the annotation (if any) for each page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementPlan {
    pub placements: Vec<Placement>,
}

impl PlacementPlan {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn page_order(&self) -> Vec<usize> {
        self.placements.iter().map(|p| p.page_index).collect()
    }

    pub fn label_for(&self, page_index: usize) -> Option<&str> {
        self.placements
            .iter()
            .find(|p| p.page_index == page_index)
            .and_then(|p| p.label_text.as_deref())
    }
}

/// How the planner arranges pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// Unlabeled pages first, labeled pages after, with pinned pairs last.
    #[default]
    Grouped,
    /// Source order kept; labels attached only.
    InPlace,
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanMode::Grouped => write!(f, "grouped"),
            PlanMode::InPlace => write!(f, "in-place"),
        }
    }
}
