pub mod builtin;
pub mod schema;

use crate::error::RelabelError;
use schema::CatalogDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<CatalogDef, RelabelError> {
    let content = std::fs::read_to_string(path).map_err(|e| RelabelError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_catalog(&content, path)
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog(json: &str, source: &Path) -> Result<CatalogDef, RelabelError> {
    let catalog: CatalogDef =
        serde_json::from_str(json).map_err(|e| RelabelError::CatalogLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<CatalogDef, RelabelError> {
    let catalog: CatalogDef = serde_json::from_str(json).map_err(RelabelError::Json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &CatalogDef) -> Result<(), RelabelError> {
    if catalog.name.trim().is_empty() {
        return Err(RelabelError::CatalogInvalid("name must not be empty".into()));
    }

    if catalog.marker.trim().is_empty() {
        return Err(RelabelError::CatalogInvalid(
            "marker must not be empty".into(),
        ));
    }

    for (code, name) in &catalog.products {
        if code.trim().is_empty() {
            return Err(RelabelError::CatalogInvalid(
                "product code must not be empty".into(),
            ));
        }
        if code.chars().any(char::is_whitespace) {
            return Err(RelabelError::CatalogInvalid(format!(
                "product code '{}' must not contain whitespace",
                code
            )));
        }
        if name.trim().is_empty() {
            return Err(RelabelError::CatalogInvalid(format!(
                "product code '{}' has an empty name",
                code
            )));
        }
    }

    let mut seen = HashSet::new();
    for rule in &catalog.suppression {
        if rule.code.trim().is_empty() {
            return Err(RelabelError::CatalogInvalid(
                "suppression code must not be empty".into(),
            ));
        }
        if !seen.insert(rule.code.as_str()) {
            return Err(RelabelError::CatalogInvalid(format!(
                "code '{}' has more than one suppression rule",
                rule.code
            )));
        }
    }

    for tracked in &catalog.tracked_products {
        if tracked.trim().is_empty() {
            return Err(RelabelError::CatalogInvalid(
                "tracked product name must not be empty".into(),
            ));
        }
    }

    Ok(())
}

/// Non-fatal issues worth reporting when a catalog is validated.
pub fn catalog_warnings(catalog: &CatalogDef) -> Vec<String> {
    let mut warnings = Vec::new();

    for rule in &catalog.suppression {
        if !catalog.is_known(&rule.code) {
            warnings.push(format!(
                "suppressed code '{}' is not in products and will show as unknown when kept",
                rule.code
            ));
        }
    }

    for tracked in &catalog.tracked_products {
        if !catalog.products.values().any(|name| name == tracked) {
            warnings.push(format!(
                "tracked product '{}' is not the name of any product code",
                tracked
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::SuppressionPolicy;
    use std::io::Write;

    #[test]
    fn test_parse_valid_catalog() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "products": { "A-1": "Alpha", "B-2": "Beta" },
            "suppression": [ { "code": "A-1", "policy": "primary" } ],
            "tracked_products": ["Alpha"]
        }"#;
        let catalog = parse_catalog_str(json).unwrap();
        assert_eq!(catalog.name, "Test");
        assert_eq!(catalog.marker, "SKU:");
        assert_eq!(catalog.product_name("B-2"), "Beta");
        assert_eq!(catalog.product_name("C-3"), "Unknown Product");
        assert_eq!(catalog.policy_for("A-1"), Some(SuppressionPolicy::Primary));
        assert_eq!(catalog.policy_for("B-2"), None);
        assert!(catalog.is_tracked("Alpha"));
        assert_eq!(catalog.stamp.font, "Courier-Bold");
    }

    #[test]
    fn test_empty_marker_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "marker": "  ",
            "products": {}
        }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_duplicate_suppression_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "products": { "A-1": "Alpha" },
            "suppression": [
                { "code": "A-1", "policy": "primary" },
                { "code": "A-1", "policy": "secondary" }
            ]
        }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "products": { "A-1": "Alpha" },
            "suppression": [ { "code": "A-1", "policy": "sometimes" } ]
        }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_whitespace_in_code_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "products": { "A 1": "Alpha" }
        }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "name": "File", "version": "2", "products": {{ "X": "Ex" }} }}"#
        )
        .unwrap();
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.name, "File");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, RelabelError::CatalogLoad { .. }));
    }

    #[test]
    fn test_warnings_for_unmapped_references() {
        let json = r#"{
            "name": "Warn",
            "version": "1.0",
            "products": { "A-1": "Alpha" },
            "suppression": [ { "code": "Z-9", "policy": "secondary" } ],
            "tracked_products": ["Gamma"]
        }"#;
        let catalog = parse_catalog_str(json).unwrap();
        assert_eq!(catalog_warnings(&catalog).len(), 2);
    }
}
