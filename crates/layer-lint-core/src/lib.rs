//! # layer-lint-core
//!
//! Core engine for layered-architecture linting.
//!
//! This crate classifies source files into architecture layers by path,
//! checks each file's imports against two rule tables, and aggregates the
//! resulting violations. It includes:
//!
//! - [`LayerClassifier`] for path-segment to layer mapping
//! - [`RuleTables`] for forbidden-framework and forbidden-layer rules
//! - [`ImportExtractor`] trait for pluggable per-language import scanning
//! - [`Analyzer`] for walking a source tree and collecting [`Violation`]s
//! - [`LintConfig`] for TOML-based layer and rule definitions
//!
//! ## Example
//!
//! ```ignore
//! use layer_lint_core::{Analyzer, RuleTables};
//!
//! let analyzer = Analyzer::builder()
//!     .rules(RuleTables::defaults())
//!     .extractor(MyExtractor::new())
//!     .build()?;
//!
//! let result = analyzer.validate("./src")?;
//! for v in &result.violations {
//!     println!("{v}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod classifier;
mod config;
mod extractor;
mod rules;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use classifier::LayerClassifier;
pub use config::{AnalyzerConfig, ConfigError, LayerDef, LintConfig};
pub use extractor::{ImportExtractor, ParseFailure, ScanOutcome};
pub use rules::RuleTables;
pub use types::{ImportEdge, Layer, LintResult, RuleKind, Violation, DEFAULT_LAYERS};
