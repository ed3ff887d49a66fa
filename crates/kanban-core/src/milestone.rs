use crate::config::Config;
use crate::task::is_truthy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    #[serde(default)]
    pub titulo: String,
    /// Display color token, e.g. `blue` or `#3b82f6`.
    #[serde(default)]
    pub cor: String,
}

impl Milestone {
    pub fn new(id: impl Into<String>, titulo: impl Into<String>, cor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            titulo: titulo.into(),
            cor: cor.into(),
        }
    }
}

/// Look up a milestone by id. The first match wins when the catalog holds
/// duplicates.
pub fn resolve<'a>(milestone_id: &str, catalog: &'a [Milestone]) -> Option<&'a Milestone> {
    catalog.iter().find(|m| m.id == milestone_id)
}

/// Parse a milestone catalog (a JSON array). Corrupt input yields an empty
/// catalog and entries without a truthy `id` are dropped.
pub fn parse_catalog(raw: &str) -> Vec<Milestone> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "milestone catalog is not valid JSON, ignoring it");
            return Vec::new();
        }
    };
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|e| e.get("id").is_some_and(is_truthy))
        .filter_map(|e| serde_json::from_value::<Milestone>(e.clone()).ok())
        .collect()
}

/// Read the catalog configured for `project`; an absent file is an empty catalog.
pub fn load_catalog(project: &Path, config: &Config) -> Vec<Milestone> {
    let path = config.milestones_path(project);
    crate::io::read_optional(&path)
        .map(|raw| parse_catalog(&raw))
        .unwrap_or_default()
}
