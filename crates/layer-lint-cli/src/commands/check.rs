//! Check command implementation.

use anyhow::{Context, Result};
use layer_lint_core::LintResult;
use std::path::Path;

use crate::config_resolver::Lookup;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    strict: bool,
    format: OutputFormat,
    exclude: &[String],
    lookup: &Lookup,
) -> Result<()> {
    let resolved = lookup.resolve(path)?;
    tracing::debug!("Config: {resolved}");

    let root = resolved.source_root(path);
    let analyzer = resolved.analyzer(exclude)?;

    let result = analyzer
        .validate(&root)
        .with_context(|| format!("Cannot check {}", root.display()))?;

    super::output::print(&result, format)?;

    if should_fail(&result, strict) {
        std::process::exit(1);
    }

    Ok(())
}

/// Violations only fail the run in strict mode.
fn should_fail(result: &LintResult, strict: bool) -> bool {
    strict && !result.is_clean()
}
