use std::collections::{HashMap, HashSet};

use ua_domain::error::{Error, Result};

use crate::types::{AgentRecord, CatalogDocument};

/// Immutable, validated agent catalog.
///
/// Built once at startup and shared behind an `Arc`; there is no write
/// path, so concurrent readers never see partial state.
#[derive(Debug, Clone)]
pub struct Catalog {
    agents: Vec<AgentRecord>,
    groups: Vec<String>,
    /// id -> index into `agents`
    by_id: HashMap<String, usize>,
    /// lower-cased group name -> indices into `agents`, catalog order
    by_group: HashMap<String, Vec<usize>>,
}

impl Catalog {
    /// Validate a parsed document and index it.
    ///
    /// Fails when the group set is empty or repeats a name, when an id is
    /// empty or duplicated, when a record has no groups, or when a record
    /// names a group outside the known set. Every problem is reported, not
    /// just the first.
    pub fn from_document(doc: CatalogDocument) -> Result<Self> {
        let issues = validate(&doc);
        if !issues.is_empty() {
            return Err(Error::Catalog(format!(
                "{} problem(s): {}",
                issues.len(),
                issues.join("; ")
            )));
        }

        let by_id = doc
            .agents
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();

        let mut by_group: HashMap<String, Vec<usize>> = doc
            .groups
            .iter()
            .map(|g| (g.to_lowercase(), Vec::new()))
            .collect();
        for (i, agent) in doc.agents.iter().enumerate() {
            for group in &agent.groups {
                if let Some(members) = by_group.get_mut(&group.to_lowercase()) {
                    members.push(i);
                }
            }
        }

        Ok(Self {
            agents: doc.agents,
            groups: doc.groups,
            by_id,
            by_group,
        })
    }

    /// Every record, in catalog order.
    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    /// Known group names, in declaration order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&AgentRecord> {
        self.by_id.get(id).map(|&i| &self.agents[i])
    }

    /// Canonical spelling of a known group, matched case-insensitively.
    pub fn canonical_group(&self, name: &str) -> Option<&str> {
        let lowered = name.to_lowercase();
        self.groups
            .iter()
            .find(|g| g.to_lowercase() == lowered)
            .map(String::as_str)
    }

    /// Records whose `groups` contain `name` (case-insensitive), in
    /// catalog order. Unknown groups yield nothing.
    pub fn members_of(&self, name: &str) -> Vec<&AgentRecord> {
        self.by_group
            .get(&name.to_lowercase())
            .map(|idx| idx.iter().map(|&i| &self.agents[i]).collect())
            .unwrap_or_default()
    }
}

fn validate(doc: &CatalogDocument) -> Vec<String> {
    let mut issues = Vec::new();

    if doc.groups.is_empty() {
        issues.push("no groups declared".to_owned());
    }
    let mut seen_groups = HashSet::new();
    for group in &doc.groups {
        if group.trim().is_empty() {
            issues.push("empty group name".to_owned());
        } else if !seen_groups.insert(group.to_lowercase()) {
            issues.push(format!("group \"{group}\" declared twice"));
        }
    }
    let known: HashSet<&str> = doc.groups.iter().map(String::as_str).collect();

    let mut seen_ids = HashSet::new();
    for (i, agent) in doc.agents.iter().enumerate() {
        let label = if agent.id.is_empty() {
            format!("agents[{i}]")
        } else {
            format!("agent \"{}\"", agent.id)
        };
        if agent.id.trim().is_empty() {
            issues.push(format!("{label}: empty id"));
        } else if !seen_ids.insert(agent.id.as_str()) {
            issues.push(format!("{label}: duplicate id"));
        }
        if agent.groups.is_empty() {
            issues.push(format!("{label}: no groups"));
        }
        for group in &agent.groups {
            if !known.contains(group.as_str()) {
                issues.push(format!("{label}: unknown group \"{group}\""));
            }
        }
    }

    issues
}
