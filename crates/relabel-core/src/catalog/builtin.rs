use crate::catalog::schema::CatalogDef;
use crate::catalog::validate_catalog;
use crate::error::RelabelError;

const DEFAULT_JSON: &str = include_str!("../../../../rules/default.json");

/// Available predefined catalogs.
pub const PRESETS: &[&str] = &["default"];

/// Load a predefined catalog by name.
pub fn load_preset(name: &str) -> Result<CatalogDef, RelabelError> {
    match name {
        "default" => {
            let catalog: CatalogDef = serde_json::from_str(DEFAULT_JSON)?;
            validate_catalog(&catalog)?;
            Ok(catalog)
        }
        _ => Err(RelabelError::CatalogInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The catalog used when no preset or catalog file is given.
pub fn default_catalog() -> Result<CatalogDef, RelabelError> {
    load_preset("default")
}
