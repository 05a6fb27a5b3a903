use ua_catalog::load_catalog;
use ua_domain::config::{Config, ConfigSeverity, IdentityProviderKind};

use crate::bootstrap::cross_check;

/// Run all diagnostic checks and print a summary.
///
/// Returns `Ok(true)` when every check passes, `Ok(false)` when at least
/// one check failed.
pub async fn run(config: &Config, config_path: &str) -> anyhow::Result<bool> {
    println!("unity-ai doctor");
    println!("===============\n");

    let mut all_passed = true;

    // 1. Config file
    check_config_file(config_path, &mut all_passed);

    // 2. Config validation
    check_config_validation(config, &mut all_passed);

    // 3. Signing secret
    check_signing_secret(config, &mut all_passed);

    // 4. Catalog
    check_catalog(config, &mut all_passed);

    // 5. Identity directory (remote only)
    if config.identity.provider == IdentityProviderKind::Remote {
        check_remote_directory(config, &mut all_passed).await;
    }

    // Summary
    println!();
    if all_passed {
        println!("All checks passed.");
    } else {
        println!("Some checks failed. Review the output above.");
    }

    Ok(all_passed)
}

// ── Individual checks ─────────────────────────────────────────────────

fn check_config_file(config_path: &str, all_passed: &mut bool) {
    let exists = std::path::Path::new(config_path).exists();
    print_check(
        "Config file exists",
        exists,
        if exists {
            config_path.to_owned()
        } else {
            format!("{config_path} not found (using defaults)")
        },
    );
    if !exists {
        *all_passed = false;
    }
}

fn check_config_validation(config: &Config, all_passed: &mut bool) {
    let issues = config.validate();
    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();

    if issues.is_empty() {
        print_check("Config validation", true, "no issues".into());
        return;
    }

    print_check(
        "Config validation",
        error_count == 0,
        format!("{} issue(s) ({error_count} error(s))", issues.len()),
    );
    for issue in &issues {
        println!("      {issue}");
    }
    if error_count > 0 {
        *all_passed = false;
    }
}

fn check_signing_secret(config: &Config, all_passed: &mut bool) {
    let present = config.auth.resolve_secret().is_some();
    let detail = match (&config.auth.jwt_secret, present) {
        (Some(_), true) => "inline auth.jwt_secret".to_owned(),
        (_, true) => format!("${}", config.auth.jwt_secret_env),
        (_, false) => format!("${} is not set", config.auth.jwt_secret_env),
    };
    print_check("Signing secret", present, detail);
    if !present {
        *all_passed = false;
    }
}

fn check_catalog(config: &Config, all_passed: &mut bool) {
    let (catalog, source) = match load_catalog(&config.catalog) {
        Ok(loaded) => loaded,
        Err(e) => {
            print_check("Catalog loads", false, e.to_string());
            *all_passed = false;
            return;
        }
    };
    print_check(
        "Catalog loads",
        true,
        format!(
            "{source}: {} agent(s), {} group(s)",
            catalog.len(),
            catalog.groups().len()
        ),
    );

    let issues = cross_check(config, &catalog);
    print_check(
        "Config groups known to catalog",
        issues.is_empty(),
        if issues.is_empty() {
            "ok".into()
        } else {
            format!("{} unknown group reference(s)", issues.len())
        },
    );
    for issue in &issues {
        println!("      {issue}");
    }
    if !issues.is_empty() {
        *all_passed = false;
    }
}

async fn check_remote_directory(config: &Config, all_passed: &mut bool) {
    let url = &config.identity.remote.base_url;
    let reachable = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(config.identity.remote.timeout_ms))
        .build()
    {
        Ok(client) => client.get(url).send().await.is_ok(),
        Err(_) => false,
    };

    print_check(
        "Identity directory reachable",
        reachable,
        if reachable {
            url.clone()
        } else {
            format!("{url} (unreachable)")
        },
    );

    if !reachable {
        *all_passed = false;
    }
}

// ── Formatting helper ─────────────────────────────────────────────────

fn print_check(name: &str, passed: bool, detail: String) {
    let status = if passed { "PASS" } else { "FAIL" };
    println!("  [{status}] {name}: {detail}");
}
