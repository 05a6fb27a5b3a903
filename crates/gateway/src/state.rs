use std::sync::Arc;

use ua_catalog::AgentQueryService;
use ua_domain::config::Config;
use ua_sessions::{IdentityProvider, TokenIssuer};

/// Shared application state passed to all API handlers.
///
/// Everything here is immutable after bootstrap; handlers only read.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Group-scoped lookups over the catalog loaded at startup.
    pub queries: Arc<AgentQueryService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub tokens: Arc<TokenIssuer>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
