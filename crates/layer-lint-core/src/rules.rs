//! Rule tables and the per-edge rule evaluator.

use std::collections::HashMap;
use std::path::Path;

use crate::types::{ImportEdge, Layer, RuleKind, Violation};

/// Immutable dependency policy: what each layer must not import.
///
/// Both tables are total: a layer without an entry forbids nothing.
#[derive(Debug, Clone, Default)]
pub struct RuleTables {
    forbidden_frameworks: HashMap<Layer, Vec<String>>,
    forbidden_layers: HashMap<Layer, Vec<Layer>>,
}

impl RuleTables {
    /// Creates empty tables that forbid nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in policy for a clean-architecture Python project.
    #[must_use]
    pub fn defaults() -> Self {
        let mut tables = Self::new();
        for fw in [
            "fastapi",
            "flask",
            "sqlalchemy",
            "pydantic",
            "django",
            "celery",
            "redis",
        ] {
            tables = tables.forbid_framework("domain", fw);
        }
        for fw in ["fastapi", "flask", "django"] {
            tables = tables.forbid_framework("application", fw);
        }
        for other in ["application", "infrastructure", "presentation"] {
            tables = tables.forbid_layer("domain", other);
        }
        for other in ["infrastructure", "presentation"] {
            tables = tables.forbid_layer("application", other);
        }
        tables.forbid_layer("infrastructure", "presentation")
    }

    /// Forbids `layer` from importing `framework` or any of its submodules.
    #[must_use]
    pub fn forbid_framework(mut self, layer: impl Into<Layer>, framework: impl Into<String>) -> Self {
        self.forbidden_frameworks
            .entry(layer.into())
            .or_default()
            .push(framework.into());
        self
    }

    /// Forbids `layer` from importing any module path naming `other`.
    #[must_use]
    pub fn forbid_layer(mut self, layer: impl Into<Layer>, other: impl Into<Layer>) -> Self {
        self.forbidden_layers
            .entry(layer.into())
            .or_default()
            .push(other.into());
        self
    }

    /// Frameworks forbidden for `layer`, in configured order.
    #[must_use]
    pub fn forbidden_frameworks(&self, layer: &Layer) -> &[String] {
        self.forbidden_frameworks
            .get(layer)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Layers forbidden for `layer`, in configured order.
    #[must_use]
    pub fn forbidden_layers(&self, layer: &Layer) -> &[Layer] {
        self.forbidden_layers.get(layer).map_or(&[][..], Vec::as_slice)
    }

    /// Checks one import edge of a file in `layer`.
    ///
    /// Runs the framework check, then the layer-direction check. Both always
    /// run and every matching entry yields its own violation.
    #[must_use]
    pub fn evaluate(&self, layer: &Layer, file: &Path, edge: &ImportEdge) -> Vec<Violation> {
        let name = edge.imported_name.as_str();
        let mut violations = Vec::new();

        for framework in self.forbidden_frameworks(layer) {
            if names_framework(name, framework) {
                violations.push(Violation {
                    file: file.to_path_buf(),
                    line: edge.line,
                    layer: layer.clone(),
                    import_name: edge.imported_name.clone(),
                    reason: format!("{layer} cannot import framework '{framework}'"),
                    kind: RuleKind::ForbiddenFramework,
                });
            }
        }

        for forbidden in self.forbidden_layers(layer) {
            if name.split('.').any(|segment| segment == forbidden.as_str()) {
                violations.push(Violation {
                    file: file.to_path_buf(),
                    line: edge.line,
                    layer: layer.clone(),
                    import_name: edge.imported_name.clone(),
                    reason: format!("{layer} cannot import from {forbidden}"),
                    kind: RuleKind::ForbiddenLayer,
                });
            }
        }

        violations
    }
}

/// Exact name or dotted submodule; never a bare string prefix.
fn names_framework(imported: &str, framework: &str) -> bool {
    imported == framework
        || imported
            .strip_prefix(framework)
            .is_some_and(|rest| rest.starts_with('.'))
}
