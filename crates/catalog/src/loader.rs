use std::fmt;
use std::path::{Path, PathBuf};

use ua_domain::config::CatalogConfig;
use ua_domain::error::{Error, Result};
use ua_domain::trace::TraceEvent;

use crate::catalog::Catalog;
use crate::types::CatalogDocument;

/// The catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../assets/default_catalog.toml");

/// Where a catalog was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Builtin => write!(f, "builtin"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the catalog selected by config. Called once at process start;
/// any error should stop the process.
pub fn load_catalog(cfg: &CatalogConfig) -> Result<(Catalog, CatalogSource)> {
    match &cfg.path {
        Some(path) => Ok((load_from_path(path)?, CatalogSource::File(path.clone()))),
        None => Ok((load_builtin()?, CatalogSource::Builtin)),
    }
}

/// Parse and validate the built-in catalog.
pub fn load_builtin() -> Result<Catalog> {
    let doc = parse_toml(BUILTIN_CATALOG)
        .map_err(|e| Error::Catalog(format!("parsing builtin catalog: {e}")))?;
    finish(doc, &CatalogSource::Builtin)
}

/// Parse and validate a catalog file. `.json` files are read as JSON,
/// anything else as TOML.
pub fn load_from_path(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Catalog(format!("reading {}: {e}", path.display()))
    })?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let doc = if is_json {
        serde_json::from_str(&content)
            .map_err(|e| Error::Catalog(format!("parsing {}: {e}", path.display())))?
    } else {
        parse_toml(&content)
            .map_err(|e| Error::Catalog(format!("parsing {}: {e}", path.display())))?
    };
    finish(doc, &CatalogSource::File(path.to_path_buf()))
}

fn parse_toml(content: &str) -> std::result::Result<CatalogDocument, toml::de::Error> {
    toml::from_str(content)
}

fn finish(doc: CatalogDocument, source: &CatalogSource) -> Result<Catalog> {
    let catalog = Catalog::from_document(doc)?;
    TraceEvent::CatalogLoaded {
        source: source.to_string(),
        agents: catalog.len(),
        groups: catalog.groups().len(),
    }
    .emit();
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = load_builtin().unwrap();
        assert_eq!(catalog.len(), 20);
        assert_eq!(
            catalog.groups(),
            [
                "Sales",
                "Marketing",
                "Customer Success",
                "Product & Engineering",
                "Finance",
                "Operations",
                "Executive",
            ]
        );
    }

    #[test]
    fn builtin_non_executive_records_list_executive() {
        let catalog = load_builtin().unwrap();
        for agent in catalog.agents() {
            assert!(agent.visible_to("Executive"), "{} hidden from Executive", agent.id);
        }
    }

    #[test]
    fn default_config_selects_builtin() {
        let (catalog, source) = load_catalog(&CatalogConfig::default()).unwrap();
        assert_eq!(source, CatalogSource::Builtin);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
groups = ["HR", "Executive"]

[[agents]]
id = "hr-1"
name = "Onboarding Guide"
description = "Walks new hires through onboarding"
category = "HR"
groups = ["HR", "Executive"]
apiEndpoint = "https://example.invalid/onboarding"
isMultiAgent = true
"#
        )
        .unwrap();

        let catalog = load_from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("hr-1").unwrap().is_multi_agent);
    }

    #[test]
    fn loads_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "groups": ["Finance"],
                "agents": [{{
                    "id": "finance-1",
                    "name": "Forecast Analyzer",
                    "description": "Financial forecasting and analysis",
                    "category": "Finance",
                    "groups": ["Finance"],
                    "apiEndpoint": "https://example.invalid/forecast"
                }}]
            }}"#
        )
        .unwrap();

        let catalog = load_from_path(file.path()).unwrap();
        assert_eq!(catalog.get("finance-1").unwrap().category, "Finance");
    }

    #[test]
    fn invalid_file_fails_with_catalog_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
groups = ["Sales"]

[[agents]]
id = "s-1"
name = "Lead Qualifier"
description = ""
category = "Sales"
groups = ["Marketing"]
apiEndpoint = "https://example.invalid/lead"
"#
        )
        .unwrap();

        let err = load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
        assert!(err.to_string().contains("unknown group"));
    }

    #[test]
    fn missing_file_fails() {
        let err = load_from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }
}
