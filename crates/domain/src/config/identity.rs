use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Identity resolution
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Which identity backend resolves login emails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityProviderKind {
    /// Lookup table from config, with derived defaults on a miss.
    Static,
    /// External directory service over HTTP.
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "d_provider")]
    pub provider: IdentityProviderKind,
    /// Team assigned to emails the directory does not know.
    #[serde(default = "d_default_team")]
    pub default_team: String,
    /// Known users for the `static` provider.
    #[serde(default = "d_users")]
    pub users: Vec<DirectoryUser>,
    #[serde(default)]
    pub remote: RemoteDirectoryConfig,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            provider: d_provider(),
            default_team: d_default_team(),
            users: d_users(),
            remote: RemoteDirectoryConfig::default(),
        }
    }
}

/// One entry of the static identity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub email: String,
    pub team: String,
    #[serde(default)]
    pub is_admin: bool,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDirectoryConfig {
    /// Directory base URL; users are fetched from `{base_url}/users/{email}`.
    #[serde(default)]
    pub base_url: String,
    /// Environment variable holding an optional bearer key for the directory.
    #[serde(default = "d_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "d_5000")]
    pub timeout_ms: u64,
}

impl Default for RemoteDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key_env: d_api_key_env(),
            timeout_ms: 5000,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_provider() -> IdentityProviderKind {
    IdentityProviderKind::Static
}
fn d_default_team() -> String {
    "Sales".into()
}
fn d_api_key_env() -> String {
    "UA_DIRECTORY_API_KEY".into()
}
fn d_5000() -> u64 {
    5000
}
fn d_users() -> Vec<DirectoryUser> {
    vec![
        DirectoryUser {
            email: "santosh.inukoti@enverus.com".into(),
            team: "Sales".into(),
            is_admin: true,
            name: "Santosh Inukoti".into(),
        },
        DirectoryUser {
            email: "john.doe@enverus.com".into(),
            team: "Sales".into(),
            is_admin: false,
            name: "John Doe".into(),
        },
        DirectoryUser {
            email: "jane.smith@enverus.com".into(),
            team: "Customer Success".into(),
            is_admin: false,
            name: "Jane Smith".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_builtin_directory() {
        let cfg: IdentityConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.provider, IdentityProviderKind::Static);
        assert_eq!(cfg.default_team, "Sales");
        assert_eq!(cfg.users.len(), 3);
    }

    #[test]
    fn explicit_users_replace_defaults() {
        let toml_str = r#"
            [[users]]
            email = "ops.lead@enverus.com"
            team = "Operations"
            name = "Ops Lead"
        "#;
        let cfg: IdentityConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.users.len(), 1);
        assert!(!cfg.users[0].is_admin);
        assert_eq!(cfg.users[0].team, "Operations");
    }

    #[test]
    fn remote_provider_parses() {
        let toml_str = r#"
            provider = "remote"
            [remote]
            base_url = "https://directory.internal"
            timeout_ms = 1500
        "#;
        let cfg: IdentityConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.provider, IdentityProviderKind::Remote);
        assert_eq!(cfg.remote.base_url, "https://directory.internal");
        assert_eq!(cfg.remote.timeout_ms, 1500);
        assert_eq!(cfg.remote.api_key_env, "UA_DIRECTORY_API_KEY");
    }
}
