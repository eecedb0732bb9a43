//! # layer-lint-py
//!
//! Tree-sitter powered Python support for layer-lint.
//!
//! Provides [`PythonExtractor`], an [`ImportExtractor`] for `.py` files, and
//! [`validate`] for checking a source tree against the built-in layer rules.
//!
//! ```ignore
//! let violations = layer_lint_py::validate("src")?;
//! assert!(violations.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod python;

use layer_lint_core::{Analyzer, AnalyzerError, LintConfig, Violation};
use std::path::Path;

pub use layer_lint_core::ImportExtractor;
pub use python::PythonExtractor;

/// Builds an analyzer for Python sources from `config`.
///
/// # Errors
///
/// Returns an error if the configuration does not validate.
pub fn analyzer(config: LintConfig) -> Result<Analyzer, AnalyzerError> {
    Analyzer::builder()
        .config(config)
        .extractor(PythonExtractor::new())
        .build()
}

/// Validates all Python files under `root` with the default rule tables.
///
/// # Errors
///
/// Returns an error if `root` does not exist or cannot be read.
pub fn validate(root: impl AsRef<Path>) -> Result<Vec<Violation>, AnalyzerError> {
    analyzer(LintConfig::default())?
        .validate(root)
        .map(|result| result.violations)
}
