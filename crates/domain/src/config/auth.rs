use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Bearer tokens
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Inline signing secret. Takes priority over `jwt_secret_env`.
    /// Prefer the env var outside of local development.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt_secret: Option<String>,
    /// Environment variable holding the HS256 signing secret.
    #[serde(default = "d_secret_env")]
    pub jwt_secret_env: String,
    /// Token lifetime in seconds (default 24h).
    #[serde(default = "d_ttl")]
    pub token_ttl_secs: i64,
    /// Tolerance applied to `exp` when verifying.
    #[serde(default)]
    pub clock_skew_secs: i64,
    /// Organization name reported in the `user` payload.
    #[serde(default = "d_company")]
    pub company: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_secret_env: d_secret_env(),
            token_ttl_secs: d_ttl(),
            clock_skew_secs: 0,
            company: d_company(),
        }
    }
}

impl AuthConfig {
    /// Resolve the signing secret: inline value first, then the env var.
    /// Empty values count as unset.
    pub fn resolve_secret(&self) -> Option<String> {
        self.jwt_secret
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| {
                std::env::var(&self.jwt_secret_env)
                    .ok()
                    .filter(|s| !s.is_empty())
            })
    }
}

fn d_secret_env() -> String {
    "JWT_SECRET".into()
}
fn d_ttl() -> i64 {
    24 * 60 * 60
}
fn d_company() -> String {
    "Enverus".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AuthConfig::default();
        assert_eq!(cfg.token_ttl_secs, 86_400);
        assert_eq!(cfg.jwt_secret_env, "JWT_SECRET");
        assert_eq!(cfg.company, "Enverus");
    }

    #[test]
    fn inline_secret_wins() {
        let cfg = AuthConfig {
            jwt_secret: Some("inline".into()),
            jwt_secret_env: "UA_TEST_SECRET_THAT_IS_NEVER_SET".into(),
            ..AuthConfig::default()
        };
        assert_eq!(cfg.resolve_secret().as_deref(), Some("inline"));
    }

    #[test]
    fn empty_inline_secret_is_unset() {
        let cfg = AuthConfig {
            jwt_secret: Some(String::new()),
            jwt_secret_env: "UA_TEST_SECRET_THAT_IS_NEVER_SET".into(),
            ..AuthConfig::default()
        };
        assert!(cfg.resolve_secret().is_none());
    }
}
