//! The `show` command: list models from a previously written output file.
//!
//! Reads only the local file; no provider is contacted.

use std::fmt::Write as _;
use std::path::Path;

use crate::core::models::NormalizedModel;
use crate::core::persistence;
use crate::core::provider::Provider;

/// Keep models from `provider` (if given) whose id or name contains `query`, ignoring case.
pub fn filter_models<'a>(
    models: &'a [NormalizedModel],
    query: Option<&str>,
    provider: Option<Provider>,
) -> Vec<&'a NormalizedModel> {
    let q = query.map(str::to_lowercase).filter(|q| !q.is_empty());
    models
        .iter()
        .filter(|m| provider.is_none_or(|p| m.provider == p))
        .filter(|m| match &q {
            Some(q) => m.id.to_lowercase().contains(q) || m.name.to_lowercase().contains(q),
            None => true,
        })
        .collect()
}

/// Format context length as human-readable (e.g. "128k", "1.0M"); 0 means unknown.
fn format_context(n: u64) -> String {
    if n == 0 {
        "-".to_string()
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}k", n / 1_000)
    } else {
        n.to_string()
    }
}

/// Aligned provider / id / context table.
fn render_table(models: &[&NormalizedModel]) -> String {
    let provider_w = models
        .iter()
        .map(|m| m.provider.name().len())
        .max()
        .unwrap_or(11)
        .max(11);
    let id_w = models.iter().map(|m| m.id.len()).max().unwrap_or(20).max(20);

    let mut out = String::new();
    let _ = writeln!(out, "{:<provider_w$}  {:<id_w$}  {:>7}", "Provider", "ID", "Context");
    let _ = writeln!(out, "{}  {}  -------", "-".repeat(provider_w), "-".repeat(id_w));
    for m in models {
        let _ = writeln!(
            out,
            "{:<provider_w$}  {:<id_w$}  {:>7}",
            m.provider.name(),
            m.id,
            format_context(m.context_length)
        );
    }
    out
}

/// Run the `show` command. Exits with status 1 if the file can't be read.
pub fn run_show(path: &Path, query: Option<&str>, provider: Option<Provider>) {
    let result_set = match persistence::load_result_set(path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let filtered = filter_models(&result_set.models, query, provider);
    if filtered.is_empty() {
        println!("No models found.");
        return;
    }

    print!("{}", render_table(&filtered));
    println!(
        "\n{} of {} model(s) listed (updated {})",
        filtered.len(),
        result_set.total_count,
        result_set.updated_at
    );
}
