use ua_catalog::load_catalog;
use ua_domain::config::{Config, ConfigError, ConfigSeverity};

use crate::bootstrap::cross_check;

/// All issues `config validate` reports: field-level validation plus the
/// group-name cross-check against the configured catalog.
pub fn collect_issues(config: &Config) -> Vec<ConfigError> {
    let mut issues = config.validate();
    match load_catalog(&config.catalog) {
        Ok((catalog, _)) => issues.extend(cross_check(config, &catalog)),
        Err(e) => issues.push(ConfigError::error("catalog", e.to_string())),
    }
    issues
}

/// Parse and validate the config, printing any issues.
///
/// Returns `false` when at least one error was found.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let issues = collect_issues(config);

    if issues.is_empty() {
        println!("Config OK ({config_path})");
        return true;
    }

    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    for issue in &issues {
        println!("{issue}");
    }
    println!("\n{error_count} error(s), {warning_count} warning(s) in {config_path}");

    error_count == 0
}

/// Resolved config as TOML, with an inline signing secret masked.
pub fn render(config: &Config) -> anyhow::Result<String> {
    let mut shown = config.clone();
    if shown.auth.jwt_secret.is_some() {
        shown.auth.jwt_secret = Some("********".into());
    }
    Ok(toml::to_string_pretty(&shown)?)
}

/// Dump the resolved config (with all defaults filled in).
pub fn show(config: &Config) -> anyhow::Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_only_warn_about_secret() {
        let mut cfg = Config::default();
        cfg.auth.jwt_secret_env = "UA_TEST_SECRET_THAT_IS_NEVER_SET".into();
        let issues = collect_issues(&cfg);
        assert!(issues.iter().all(|i| i.severity == ConfigSeverity::Warning), "{issues:?}");
    }

    #[test]
    fn unknown_superset_group_is_an_error() {
        let mut cfg = Config::default();
        cfg.catalog.superset_group = "Board".into();
        assert!(collect_issues(&cfg)
            .iter()
            .any(|i| i.field == "catalog.superset_group" && i.severity == ConfigSeverity::Error));
    }

    #[test]
    fn render_masks_inline_secret() {
        let mut cfg = Config::default();
        cfg.auth.jwt_secret = Some("super-secret-value".into());
        let out = render(&cfg).unwrap();
        assert!(!out.contains("super-secret-value"));
        assert!(out.contains("********"));
    }
}
