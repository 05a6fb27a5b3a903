mod auth;
mod catalog;
mod identity;
mod observability;
mod server;

pub use auth::*;
pub use catalog::*;
pub use identity::*;
pub use observability::*;
pub use server::*;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::is_valid_email;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl ConfigError {
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ConfigSeverity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Group names are not checked here; they are cross-checked against
    /// the loaded catalog at startup.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError::error("server.port", "port must be greater than 0"));
        }
        if self.server.host.is_empty() {
            errors.push(ConfigError::error("server.host", "host must not be empty"));
        }
        if self.server.max_concurrent_requests == 0 {
            errors.push(ConfigError::error(
                "server.max_concurrent_requests",
                "must be greater than 0",
            ));
        }

        if self.server.cors.allowed_origins.len() == 1
            && self.server.cors.allowed_origins[0] == "*"
        {
            errors.push(ConfigError::warning(
                "server.cors.allowed_origins",
                "wildcard \"*\" allows all origins (not recommended for production)",
            ));
        }

        if self.auth.token_ttl_secs <= 0 {
            errors.push(ConfigError::error(
                "auth.token_ttl_secs",
                "token lifetime must be greater than 0",
            ));
        }
        if self.auth.clock_skew_secs < 0 {
            errors.push(ConfigError::error(
                "auth.clock_skew_secs",
                "clock skew must not be negative",
            ));
        }
        // Only a warning here so `config validate` works on machines that
        // don't carry the secret; startup refuses to run without it.
        if self.auth.resolve_secret().is_none() {
            errors.push(ConfigError::warning(
                "auth.jwt_secret",
                format!(
                    "no signing secret (set auth.jwt_secret or the {} env var)",
                    self.auth.jwt_secret_env
                ),
            ));
        }

        if self.identity.default_team.trim().is_empty() {
            errors.push(ConfigError::error(
                "identity.default_team",
                "default team must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for (i, user) in self.identity.users.iter().enumerate() {
            let email = user.email.to_lowercase();
            if !is_valid_email(&email) {
                errors.push(ConfigError::error(
                    format!("identity.users[{i}].email"),
                    format!("\"{}\" is not a valid email", user.email),
                ));
            }
            if !seen.insert(email) {
                errors.push(ConfigError::error(
                    format!("identity.users[{i}].email"),
                    format!("duplicate entry for {}", user.email),
                ));
            }
            if user.team.trim().is_empty() {
                errors.push(ConfigError::error(
                    format!("identity.users[{i}].team"),
                    "team must not be empty",
                ));
            }
        }

        if self.identity.provider == IdentityProviderKind::Remote
            && self.identity.remote.base_url.is_empty()
        {
            errors.push(ConfigError::error(
                "identity.remote.base_url",
                "remote identity provider requires a base_url",
            ));
        }

        if self.catalog.superset_group.trim().is_empty() {
            errors.push(ConfigError::error(
                "catalog.superset_group",
                "superset group must not be empty",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret() -> Config {
        let mut cfg = Config::default();
        cfg.auth.jwt_secret = Some("test-secret".into());
        cfg
    }

    fn has_error(issues: &[ConfigError], field: &str) -> bool {
        issues
            .iter()
            .any(|e| e.severity == ConfigSeverity::Error && e.field == field)
    }

    #[test]
    fn default_config_with_secret_is_clean() {
        assert!(with_secret().validate().is_empty());
    }

    #[test]
    fn missing_secret_is_only_a_warning() {
        let mut cfg = Config::default();
        cfg.auth.jwt_secret_env = "UA_TEST_SECRET_THAT_IS_NEVER_SET".into();
        let issues = cfg.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, ConfigSeverity::Warning);
        assert_eq!(issues[0].field, "auth.jwt_secret");
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let mut cfg = with_secret();
        cfg.auth.token_ttl_secs = 0;
        assert!(has_error(&cfg.validate(), "auth.token_ttl_secs"));
    }

    #[test]
    fn duplicate_directory_emails_are_rejected() {
        let mut cfg = with_secret();
        let mut dup = cfg.identity.users[0].clone();
        dup.email = dup.email.to_uppercase();
        cfg.identity.users.push(dup);
        assert!(has_error(&cfg.validate(), "identity.users[3].email"));
    }

    #[test]
    fn malformed_directory_email_is_rejected() {
        let mut cfg = with_secret();
        cfg.identity.users[1].email = "not-an-email".into();
        assert!(has_error(&cfg.validate(), "identity.users[1].email"));
    }

    #[test]
    fn remote_provider_needs_base_url() {
        let mut cfg = with_secret();
        cfg.identity.provider = IdentityProviderKind::Remote;
        assert!(has_error(&cfg.validate(), "identity.remote.base_url"));
    }

    #[test]
    fn wildcard_cors_warns() {
        let mut cfg = with_secret();
        cfg.server.cors.allowed_origins = vec!["*".into()];
        let issues = cfg.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, ConfigSeverity::Warning);
    }

    #[test]
    fn display_includes_severity_tag() {
        let e = ConfigError::error("server.port", "bad");
        assert_eq!(e.to_string(), "[ERROR] server.port: bad");
    }
}
