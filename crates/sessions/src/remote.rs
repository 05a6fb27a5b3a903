//! HTTP-backed [`IdentityProvider`] for an external user directory.
//!
//! Users are fetched from `GET {base_url}/users/{email}`, which must
//! answer `{ "team": .., "isAdmin": .., "name": .. }` or 404 for unknown
//! users. Failures are surfaced as-is; there are no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use ua_domain::config::IdentityConfig;
use ua_domain::error::{Error, Result};
use ua_domain::identity::Identity;

use crate::identity::{derive_display_name, emit_resolved, normalize_email, synthesize, IdentityProvider};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryRecord {
    team: String,
    #[serde(default)]
    is_admin: bool,
    #[serde(default)]
    name: Option<String>,
}

/// Directory client. Built once; the `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct RemoteDirectory {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    default_team: String,
    /// Teams the directory may assign. Empty accepts any team.
    known_groups: Vec<String>,
}

impl RemoteDirectory {
    pub fn from_config(cfg: &IdentityConfig) -> Result<Self> {
        let api_key = std::env::var(&cfg.remote.api_key_env)
            .ok()
            .filter(|k| !k.is_empty());
        Self::new(
            &cfg.remote.base_url,
            api_key,
            cfg.default_team.clone(),
            Duration::from_millis(cfg.remote.timeout_ms),
        )
    }

    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        default_team: String,
        timeout: Duration,
    ) -> Result<Self> {
        if base_url.is_empty() {
            return Err(Error::Config("identity.remote.base_url is empty".into()));
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("identity.remote.base_url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "identity.remote.base_url: {base_url} cannot carry a path"
            )));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            api_key,
            default_team,
            known_groups: Vec::new(),
        })
    }

    /// Restrict directory teams to `groups`. Unknown teams fall back to
    /// the default team; known ones take the group's canonical spelling.
    pub fn with_known_groups(mut self, groups: impl IntoIterator<Item = String>) -> Self {
        self.known_groups = groups.into_iter().collect();
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `{base_url}/users/{email}` with the email as one escaped segment.
    fn user_url(&self, email: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users").push(email);
        }
        url
    }

    fn team_for(&self, email: &str, team: String) -> String {
        if self.known_groups.is_empty() {
            return team;
        }
        let lowered = team.to_lowercase();
        match self.known_groups.iter().find(|g| g.to_lowercase() == lowered) {
            Some(group) => group.clone(),
            None => {
                tracing::warn!(
                    email = %email,
                    team = %team,
                    default_team = %self.default_team,
                    "directory returned an unknown team, using default"
                );
                self.default_team.clone()
            }
        }
    }

    async fn fetch(&self, email: &str) -> Result<Option<DirectoryRecord>> {
        let url = self.user_url(email);
        let mut rb = self.http.get(url.clone());
        if let Some(ref key) = self.api_key {
            rb = rb.bearer_auth(key);
        }

        let resp = rb
            .send()
            .await
            .map_err(|e| Error::IdentityProvider(format!("GET {url}: {e}")))?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => {
                let record = resp
                    .json::<DirectoryRecord>()
                    .await
                    .map_err(|e| Error::IdentityProvider(format!("decoding {url}: {e}")))?;
                Ok(Some(record))
            }
            s => Err(Error::IdentityProvider(format!("GET {url}: status {s}"))),
        }
    }
}

#[async_trait]
impl IdentityProvider for RemoteDirectory {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn resolve(&self, email: &str) -> Result<Identity> {
        let email = normalize_email(email)?;
        let (identity, from_directory) = match self.fetch(&email).await? {
            Some(record) => {
                let name = record
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| derive_display_name(&email));
                let team = self.team_for(&email, record.team);
                (Identity::new(email, name, team, record.is_admin), true)
            }
            None => (synthesize(&email, &self.default_team), false),
        };
        emit_resolved(&identity, self.name(), from_directory);
        Ok(identity)
    }
}
