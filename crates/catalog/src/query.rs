use std::sync::Arc;

use ua_domain::error::{Error, Result};
use ua_domain::identity::Identity;
use ua_domain::trace::TraceEvent;

use crate::catalog::Catalog;
use crate::slug;
use crate::types::{AgentRecord, GroupEntry};

pub const NO_AGENTS_FOR_GROUP: &str = "No agents found for this group";
pub const AGENT_NOT_FOUND: &str = "Agent not found";

/// Agents matched by a group-addressed request.
#[derive(Debug)]
pub struct GroupListing<'a> {
    /// Canonical group name when the request matched a known group,
    /// otherwise the decoded candidate.
    pub group: String,
    pub agents: Vec<&'a AgentRecord>,
}

/// Read-only, group-scoped lookups over an injected [`Catalog`].
///
/// Every method is a pure function of its inputs and the catalog, so the
/// service is freely shared across request handlers.
#[derive(Debug, Clone)]
pub struct AgentQueryService {
    catalog: Arc<Catalog>,
    superset_group: String,
}

impl AgentQueryService {
    /// `superset_group` must be one of the catalog's groups; members of it
    /// see the whole catalog through [`Self::list_agents_for_identity`].
    pub fn new(catalog: Arc<Catalog>, superset_group: &str) -> Result<Self> {
        let superset_group = catalog
            .canonical_group(superset_group)
            .ok_or_else(|| {
                Error::Config(format!(
                    "superset group \"{superset_group}\" is not a known catalog group"
                ))
            })?
            .to_owned();
        Ok(Self {
            catalog,
            superset_group,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn superset_group(&self) -> &str {
        &self.superset_group
    }

    /// Every known group with its slug, in declaration order.
    pub fn list_groups(&self) -> Vec<GroupEntry> {
        self.catalog
            .groups()
            .iter()
            .map(|name| GroupEntry {
                name: name.clone(),
                slug: slug::encode(name),
            })
            .collect()
    }

    /// The full catalog.
    pub fn list_all(&self) -> &[AgentRecord] {
        self.catalog.agents()
    }

    /// Records whose `groups` contain `group_name` (case-insensitive).
    ///
    /// An empty result is `NotFound`, whether or not the group itself is
    /// known.
    pub fn list_agents_for_group(&self, group_name: &str) -> Result<Vec<&AgentRecord>> {
        let agents = self.catalog.members_of(group_name);
        if agents.is_empty() {
            return Err(Error::NotFound(NO_AGENTS_FOR_GROUP.into()));
        }
        Ok(agents)
    }

    /// Group lookup addressed by a URL segment.
    ///
    /// The segment is run through [`slug::decode`] first, which also
    /// leaves plain group names intact, then matched as in
    /// [`Self::list_agents_for_group`].
    pub fn list_agents_for_slug(&self, segment: &str) -> Result<GroupListing<'_>> {
        let decoded = slug::decode(segment);
        let group = self
            .catalog
            .canonical_group(&decoded)
            .map(str::to_owned)
            .unwrap_or_else(|| decoded.clone());
        let result = self.list_agents_for_group(&decoded);

        TraceEvent::GroupLookup {
            requested: segment.to_owned(),
            resolved: group.clone(),
            matches: result.as_ref().map(Vec::len).unwrap_or(0),
        }
        .emit();

        Ok(GroupListing {
            group,
            agents: result?,
        })
    }

    /// What a signed-in user may see.
    ///
    /// Admins and members of the superset group (matched case-insensitively,
    /// like group membership) get the whole catalog. Everyone else gets the records visible to their team, possibly
    /// none; an empty result is not an error here.
    pub fn list_agents_for_identity(&self, identity: &Identity) -> Vec<&AgentRecord> {
        let superset =
            self.catalog.canonical_group(&identity.team) == Some(self.superset_group.as_str());
        if identity.is_admin || superset {
            return self.catalog.agents().iter().collect();
        }
        self.catalog.members_of(&identity.team)
    }

    pub fn get_agent(&self, id: &str) -> Result<&AgentRecord> {
        self.catalog
            .get(id)
            .ok_or_else(|| Error::NotFound(AGENT_NOT_FOUND.into()))
    }
}
