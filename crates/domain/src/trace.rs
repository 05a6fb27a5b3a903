use serde::Serialize;

/// Structured trace events emitted across all Unity AI crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    CatalogLoaded {
        source: String,
        agents: usize,
        groups: usize,
    },
    IdentityResolved {
        email: String,
        team: String,
        is_admin: bool,
        provider: &'static str,
        from_directory: bool,
    },
    TokenIssued {
        user_id: String,
        expires_at: i64,
    },
    TokenRejected {
        reason: &'static str,
    },
    GroupLookup {
        requested: String,
        resolved: String,
        matches: usize,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "ua_event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged() {
        let ev = TraceEvent::TokenRejected { reason: "expired" };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "TokenRejected");
        assert_eq!(json["reason"], "expired");
    }
}
