use serde::{Deserialize, Serialize};

/// One catalog entry describing an external AI service.
///
/// `api_endpoint` is carried verbatim and never dereferenced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Groups allowed to see this record. Membership is what matters;
    /// order is irrelevant.
    pub groups: Vec<String>,
    pub api_endpoint: String,
    #[serde(default)]
    pub is_multi_agent: bool,
}

impl AgentRecord {
    /// Case-insensitive membership test.
    pub fn visible_to(&self, group: &str) -> bool {
        let group = group.to_lowercase();
        self.groups.iter().any(|g| g.to_lowercase() == group)
    }
}

/// The on-disk catalog shape: the known group set in declaration order,
/// followed by the agent records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub groups: Vec<String>,
    #[serde(default)]
    pub agents: Vec<AgentRecord>,
}

/// A group as exposed to clients: display name plus URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEntry {
    pub name: String,
    /// The slug. Serialized as `id` because clients route on it.
    #[serde(rename = "id")]
    pub slug: String,
}
