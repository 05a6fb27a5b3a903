//! Application bootstrap: validate config, load the catalog, build the
//! identity provider and token issuer.

use std::sync::Arc;

use anyhow::Context;
use ua_catalog::{load_catalog, AgentQueryService, Catalog};
use ua_domain::config::{Config, ConfigError, ConfigSeverity, IdentityProviderKind};
use ua_sessions::{create_provider, TokenIssuer};

use crate::state::AppState;

/// Build the fully-initialized [`AppState`].
///
/// Any error here should stop the process: a server without its catalog
/// or signing secret cannot answer a single request correctly.
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    log_issues(&issues);
    let errors = error_count(&issues);
    if errors > 0 {
        anyhow::bail!("config validation failed with {errors} error(s)");
    }

    // ── Catalog ──────────────────────────────────────────────────────
    let (catalog, source) = load_catalog(&config.catalog).context("loading agent catalog")?;
    tracing::info!(
        source = %source,
        agents = catalog.len(),
        groups = catalog.groups().len(),
        "catalog ready"
    );

    let issues = cross_check(&config, &catalog);
    log_issues(&issues);
    let errors = error_count(&issues);
    if errors > 0 {
        anyhow::bail!("config does not match the catalog: {errors} error(s)");
    }

    let groups = catalog.groups().to_vec();
    let queries = AgentQueryService::new(Arc::new(catalog), &config.catalog.superset_group)
        .context("building query service")?;

    // ── Sessions ─────────────────────────────────────────────────────
    let tokens = TokenIssuer::from_config(&config.auth).context("creating token issuer")?;
    tracing::info!(ttl_secs = tokens.ttl_secs(), "token issuer ready");

    let identity =
        create_provider(&config.identity, &groups).context("creating identity provider")?;

    Ok(AppState {
        config,
        queries: Arc::new(queries),
        identity,
        tokens: Arc::new(tokens),
    })
}

/// Check the group names used by config against the loaded catalog.
pub fn cross_check(config: &Config, catalog: &Catalog) -> Vec<ConfigError> {
    let mut issues = Vec::new();

    if catalog.canonical_group(&config.catalog.superset_group).is_none() {
        issues.push(ConfigError::error(
            "catalog.superset_group",
            format!(
                "\"{}\" is not a catalog group",
                config.catalog.superset_group
            ),
        ));
    }

    if catalog.canonical_group(&config.identity.default_team).is_none() {
        issues.push(ConfigError::error(
            "identity.default_team",
            format!("\"{}\" is not a catalog group", config.identity.default_team),
        ));
    }

    if config.identity.provider == IdentityProviderKind::Static {
        for (i, user) in config.identity.users.iter().enumerate() {
            if catalog.canonical_group(&user.team).is_none() {
                issues.push(ConfigError::error(
                    format!("identity.users[{i}].team"),
                    format!("\"{}\" ({}) is not a catalog group", user.team, user.email),
                ));
            }
        }
    }

    issues
}

fn log_issues(issues: &[ConfigError]) {
    for issue in issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
}

fn error_count(issues: &[ConfigError]) -> usize {
    issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count()
}
