use ua_catalog::{load_catalog, slug, Catalog};
use ua_domain::config::Config;

/// `catalog check`: load and validate the configured catalog, then print
/// one row per group. Loading errors propagate and fail the command.
pub fn check(config: &Config) -> anyhow::Result<()> {
    let (catalog, source) = load_catalog(&config.catalog)?;
    println!(
        "Catalog OK ({source}): {} agent(s), {} group(s)\n",
        catalog.len(),
        catalog.groups().len()
    );
    print!("{}", summary(&catalog));
    Ok(())
}

/// Per-group table: name, slug, record count.
pub fn summary(catalog: &Catalog) -> String {
    let rows: Vec<(String, String, usize)> = catalog
        .groups()
        .iter()
        .map(|g| (g.clone(), slug::encode(g), catalog.members_of(g).len()))
        .collect();

    let name_w = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).max("GROUP".len());
    let slug_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max("SLUG".len());

    let mut out = format!("{:<name_w$}  {:<slug_w$}  AGENTS\n", "GROUP", "SLUG");
    for (name, slug, count) in rows {
        out.push_str(&format!("{name:<name_w$}  {slug:<slug_w$}  {count}\n"));
    }
    out
}
