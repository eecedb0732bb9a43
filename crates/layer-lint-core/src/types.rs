//! Core types for layers, import edges, violations and results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Layer names used when no configuration overrides them, in match order.
pub const DEFAULT_LAYERS: &[&str] = &["domain", "application", "infrastructure", "presentation"];

/// A named architectural tier (e.g. `domain`, `infrastructure`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer(String);

impl Layer {
    /// Creates a layer from its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the layer name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Layer {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single source-level import reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportEdge {
    /// Dotted module path as written in the source (e.g. `app.domain.order`).
    pub imported_name: String,
    /// Line of the import statement (1-indexed).
    pub line: usize,
}

impl ImportEdge {
    /// Creates a new import edge.
    #[must_use]
    pub fn new(imported_name: impl Into<String>, line: usize) -> Self {
        Self {
            imported_name: imported_name.into(),
            line,
        }
    }
}

/// Which rule table produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// The import names a framework the layer must stay independent of.
    ForbiddenFramework,
    /// The import reaches into a layer this layer must not depend on.
    ForbiddenLayer,
}

impl RuleKind {
    /// Stable rule code used in compact output.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::ForbiddenFramework => "LL001",
            Self::ForbiddenLayer => "LL002",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ForbiddenFramework => write!(f, "forbidden-framework"),
            Self::ForbiddenLayer => write!(f, "forbidden-layer"),
        }
    }
}

/// An import edge that breaks a layer's dependency policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// File containing the import, as walked from the analysis root.
    pub file: PathBuf,
    /// Line of the offending import statement (1-indexed).
    pub line: usize,
    /// Layer the file was classified into.
    pub layer: Layer,
    /// Imported module name as written in the source.
    pub import_name: String,
    /// Human-readable reason.
    pub reason: String,
    /// Rule table that matched.
    pub kind: RuleKind,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {} ({})",
            self.file.display(),
            self.line,
            self.layer,
            self.reason,
            self.import_name
        )
    }
}

/// Result of validating a source tree.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations, sorted by file then line.
    pub violations: Vec<Violation>,
    /// Number of classified files that were evaluated.
    pub files_checked: usize,
    /// Number of files that matched no layer.
    pub files_skipped: usize,
    /// Classified files whose source could not be read or parsed.
    ///
    /// These contribute no import edges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parse_failures: Vec<PathBuf>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no violations were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Groups violations by layer, ordered by layer name.
    #[must_use]
    pub fn by_layer(&self) -> BTreeMap<&Layer, Vec<&Violation>> {
        let mut groups: BTreeMap<&Layer, Vec<&Violation>> = BTreeMap::new();
        for v in &self.violations {
            groups.entry(&v.layer).or_default().push(v);
        }
        groups
    }

    /// Sorts violations by file, then line.
    ///
    /// The sort is stable, so violations on the same line keep rule order.
    pub fn sort(&mut self) {
        self.violations
            .sort_by(|a, b| a.file.cmp(&b.file).then(a.line.cmp(&b.line)));
    }
}
