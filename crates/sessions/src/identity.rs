//! Identity resolution: map a login email to a team and admin flag.
//!
//! [`IdentityProvider`] is the seam: the [`StaticDirectory`] answers from
//! the configured table, [`RemoteDirectory`](crate::remote::RemoteDirectory)
//! asks an external directory service. Both fall back to the same derived
//! defaults for emails they do not know.

use std::collections::HashMap;

use async_trait::async_trait;
use ua_domain::config::{DirectoryUser, IdentityConfig};
use ua_domain::error::{Error, Result};
use ua_domain::identity::{is_valid_email, Identity};
use ua_domain::trace::TraceEvent;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";

/// Resolves a login email into an [`Identity`].
///
/// Implementations are deterministic for a given backing directory and
/// never persist newly seen emails.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fails with `InvalidInput` when the email is empty or malformed.
    async fn resolve(&self, email: &str) -> Result<Identity>;
}

/// Validate and lower-case a login email.
pub fn normalize_email(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::InvalidInput(EMAIL_REQUIRED.into()));
    }
    if !is_valid_email(raw) {
        return Err(Error::InvalidInput(INVALID_EMAIL_FORMAT.into()));
    }
    Ok(raw.to_lowercase())
}

/// Display name for an unknown user: each dot-separated segment of the
/// local part, first letter upper-cased, joined with spaces.
///
/// `alex.jordan@enverus.com` -> `Alex Jordan`
pub fn derive_display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    local
        .split('.')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Identity for an email no directory knows about.
pub fn synthesize(email: &str, default_team: &str) -> Identity {
    Identity::new(email, derive_display_name(email), default_team, false)
}

pub(crate) fn emit_resolved(identity: &Identity, provider: &'static str, from_directory: bool) {
    TraceEvent::IdentityResolved {
        email: identity.email.clone(),
        team: identity.team.clone(),
        is_admin: identity.is_admin,
        provider,
        from_directory,
    }
    .emit();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Static directory
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Table-backed provider built from `[[identity.users]]`.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    /// lower-cased email -> entry
    users: HashMap<String, DirectoryUser>,
    default_team: String,
}

impl StaticDirectory {
    pub fn from_config(cfg: &IdentityConfig) -> Self {
        Self::new(cfg.users.iter().cloned(), cfg.default_team.clone())
    }

    pub fn new(users: impl IntoIterator<Item = DirectoryUser>, default_team: String) -> Self {
        let users = users
            .into_iter()
            .map(|u| (u.email.to_lowercase(), u))
            .collect();
        Self {
            users,
            default_team,
        }
    }

    /// Resolve an already-normalized email. Returns the identity and
    /// whether it came from the table.
    pub fn lookup(&self, email: &str) -> (Identity, bool) {
        match self.users.get(email) {
            Some(user) => (
                Identity::new(email, user.name.clone(), user.team.clone(), user.is_admin),
                true,
            ),
            None => (synthesize(email, &self.default_team), false),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticDirectory {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn resolve(&self, email: &str) -> Result<Identity> {
        let email = normalize_email(email)?;
        let (identity, from_directory) = self.lookup(&email);
        emit_resolved(&identity, self.name(), from_directory);
        Ok(identity)
    }
}
