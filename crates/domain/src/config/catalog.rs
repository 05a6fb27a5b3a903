use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Agent catalog
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (`.toml` or `.json`). When unset the built-in
    /// catalog is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Group whose members see the whole catalog.
    #[serde(default = "d_superset")]
    pub superset_group: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            superset_group: d_superset(),
        }
    }
}

fn d_superset() -> String {
    "Executive".into()
}
