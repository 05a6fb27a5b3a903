use ua_domain::config::{Config, IdentityProviderKind};

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3001);
}

#[test]
fn default_cors_allows_frontend_and_localhost() {
    let config = Config::default();
    let origins = &config.server.cors.allowed_origins;
    assert!(origins.contains(&"http://localhost:3000".to_string()));
    assert!(origins.contains(&"http://localhost:*".to_string()));
}

#[test]
fn default_token_lifetime_is_a_day() {
    let config = Config::default();
    assert_eq!(config.auth.token_ttl_secs, 24 * 60 * 60);
}

#[test]
fn default_catalog_is_builtin_with_executive_superset() {
    let config = Config::default();
    assert!(config.catalog.path.is_none());
    assert_eq!(config.catalog.superset_group, "Executive");
}

#[test]
fn full_config_parses() {
    let toml_str = r#"
[server]
host = "0.0.0.0"
port = 8080
frontend_url = "https://unity-ai.enverus.com"

[server.cors]
allowed_origins = ["https://unity-ai.enverus.com"]

[auth]
jwt_secret_env = "UNITY_JWT_SECRET"
token_ttl_secs = 28800
company = "Enverus"

[identity]
default_team = "Operations"

[[identity.users]]
email = "cfo@enverus.com"
team = "Finance"
is_admin = true
name = "Chief Financial Officer"

[catalog]
path = "catalog.toml"
superset_group = "Executive"

[observability]
otlp_endpoint = "http://localhost:4317"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.cors.allowed_origins.len(), 1);
    assert_eq!(config.auth.jwt_secret_env, "UNITY_JWT_SECRET");
    assert_eq!(config.auth.token_ttl_secs, 28_800);
    assert_eq!(config.identity.provider, IdentityProviderKind::Static);
    assert_eq!(config.identity.default_team, "Operations");
    assert_eq!(config.identity.users.len(), 1);
    assert!(config.identity.users[0].is_admin);
    assert_eq!(
        config.catalog.path.as_deref(),
        Some(std::path::Path::new("catalog.toml"))
    );
    assert!(config.observability.otlp_endpoint.is_some());
}

#[test]
fn resolved_config_serializes_back_to_toml() {
    let config = Config::default();
    let rendered = toml::to_string_pretty(&config).unwrap();
    let reparsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(reparsed.server.port, config.server.port);
    assert_eq!(reparsed.identity.users, config.identity.users);
}
