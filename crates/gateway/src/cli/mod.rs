pub mod catalog;
pub mod config;
pub mod doctor;

use clap::{Parser, Subcommand};

/// Unity AI: group-scoped AI agent catalog service.
#[derive(Debug, Parser)]
#[command(name = "unity-ai", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default when no subcommand is given).
    Serve,
    /// Run diagnostic checks against the current configuration.
    Doctor,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Agent catalog utilities.
    #[command(subcommand)]
    Catalog(CatalogCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Load and validate the configured catalog, then print a per-group summary.
    Check,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by `UA_CONFIG` (or
/// `config.toml` by default).  Returns the parsed [`Config`] and the
/// path that was used.
///
/// [`Config`]: ua_domain::config::Config
pub fn load_config() -> anyhow::Result<(ua_domain::config::Config, String)> {
    let config_path = std::env::var("UA_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let config = load_config_from(&config_path)?;
    Ok((config, config_path))
}

/// Parse the config at `path`; a missing file yields all defaults.
pub fn load_config_from(path: &str) -> anyhow::Result<ua_domain::config::Config> {
    if !std::path::Path::new(path).exists() {
        return Ok(ua_domain::config::Config::default());
    }
    let raw =
        std::fs::read_to_string(path).map_err(|e| anyhow::anyhow!("reading {path}: {e}"))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {path}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load_config_from("/definitely/not/here/config.toml").unwrap();
        assert_eq!(cfg.server.port, 3001);
    }

    #[test]
    fn parses_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
port = 8080

[identity]
default_team = "Operations"
"#
        )
        .unwrap();
        let cfg = load_config_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.identity.default_team, "Operations");
        assert_eq!(cfg.catalog.superset_group, "Executive");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[server\nport = ").unwrap();
        let err = load_config_from(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("parsing "));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::parse_from(["unity-ai", "catalog", "check"]);
        assert!(matches!(cli.command, Some(Command::Catalog(CatalogCommand::Check))));
        let cli = Cli::parse_from(["unity-ai"]);
        assert!(cli.command.is_none());
    }
}
