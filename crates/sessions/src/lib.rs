//! Login sessions for Unity AI.
//!
//! Resolves login emails into identities (from a static table or a remote
//! directory) and carries them between requests in signed, stateless
//! bearer tokens.

pub mod identity;
pub mod remote;
pub mod token;

use std::sync::Arc;

use ua_domain::config::{IdentityConfig, IdentityProviderKind};
use ua_domain::error::Result;

pub use identity::{normalize_email, IdentityProvider, StaticDirectory};
pub use remote::RemoteDirectory;
pub use token::{Clock, FixedClock, IssuedToken, SessionClaims, SystemClock, TokenIssuer};

/// Build the identity provider selected by config. Remote directory teams
/// are checked against `known_groups`.
pub fn create_provider(
    cfg: &IdentityConfig,
    known_groups: &[String],
) -> Result<Arc<dyn IdentityProvider>> {
    match cfg.provider {
        IdentityProviderKind::Static => {
            let dir = StaticDirectory::from_config(cfg);
            tracing::info!(users = dir.len(), "using static identity directory");
            Ok(Arc::new(dir))
        }
        IdentityProviderKind::Remote => {
            let dir = RemoteDirectory::from_config(cfg)?.with_known_groups(known_groups.to_vec());
            tracing::info!(base_url = %dir.base_url(), "using remote identity directory");
            Ok(Arc::new(dir))
        }
    }
}
