use crate::model::UNKNOWN_PRODUCT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_marker() -> String {
    "SKU:".to_string()
}

/// A product catalog: code lookup, suppression policies and counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Literal text that precedes a product code on a label (e.g. "SKU:").
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Map of product code -> product name. Codes are case-sensitive.
    pub products: BTreeMap<String, String>,
    #[serde(default)]
    pub suppression: Vec<SuppressionRuleDef>,
    /// Product names whose quantities are bucketed into counters.
    #[serde(default)]
    pub tracked_products: Vec<String>,
    #[serde(default)]
    pub stamp: StampStyle,
}

impl CatalogDef {
    /// Resolve a code to its product name, falling back to "Unknown Product".
    pub fn product_name(&self, code: &str) -> &str {
        self.products
            .get(code)
            .map(|s| s.as_str())
            .unwrap_or(UNKNOWN_PRODUCT)
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.products.contains_key(code)
    }

    pub fn policy_for(&self, code: &str) -> Option<SuppressionPolicy> {
        self.suppression
            .iter()
            .find(|r| r.code == code)
            .map(|r| r.policy)
    }

    pub fn is_tracked(&self, product_name: &str) -> bool {
        self.tracked_products.iter().any(|t| t == product_name)
    }
}

/// When a code's label is kept off the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuppressionPolicy {
    /// Suppressed at quantity 1 when it is the only match on the page.
    Primary,
    /// Suppressed at quantity 1 regardless of other matches.
    Secondary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressionRuleDef {
    pub code: String,
    pub policy: SuppressionPolicy,
    #[serde(default)]
    pub note: Option<String>,
}

/// Where and how a downstream tool should stamp labels. Passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampStyle {
    pub x: f32,
    pub y: f32,
    pub font: String,
    pub size: f32,
    /// RGB, each component in 0.0..=1.0.
    pub color: [f32; 3],
}

impl Default for StampStyle {
    fn default() -> Self {
        StampStyle {
            x: 5.0,
            y: 250.0,
            font: "Courier-Bold".to_string(),
            size: 12.0,
            color: [1.0, 0.0, 0.0],
        }
    }
}
