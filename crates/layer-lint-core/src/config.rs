//! TOML configuration for layer definitions and rule tables.
//!
//! ```toml
//! [analyzer]
//! root = "."
//! exclude = ["**/migrations/**"]
//!
//! [[layers]]
//! name = "domain"
//! segments = ["domain", "core"]
//!
//! [forbidden_frameworks]
//! domain = ["fastapi", "sqlalchemy"]
//!
//! [forbidden_layers]
//! domain = ["infrastructure"]
//! ```
//!
//! Sections that are absent fall back to the built-in defaults; a section
//! that is present but empty forbids nothing. Default rule entries only
//! survive for layers the file declares, so a custom `[[layers]]` list never
//! inherits rules about layers it dropped.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::classifier::LayerClassifier;
use crate::rules::RuleTables;
use crate::types::{Layer, DEFAULT_LAYERS};

/// Top-level configuration for layer-lint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLintConfig")]
pub struct LintConfig {
    /// Analyzer configuration.
    pub analyzer: AnalyzerConfig,

    /// Layer definitions, in classification priority order.
    pub layers: Vec<LayerDef>,

    /// Layer name -> frameworks it must not import.
    pub forbidden_frameworks: BTreeMap<String, Vec<String>>,

    /// Layer name -> layers it must not import from.
    pub forbidden_layers: BTreeMap<String, Vec<String>>,
}

/// The file as written; `None` marks an absent table.
#[derive(Deserialize)]
struct RawLintConfig {
    #[serde(default)]
    analyzer: AnalyzerConfig,
    #[serde(default = "default_layers")]
    layers: Vec<LayerDef>,
    forbidden_frameworks: Option<BTreeMap<String, Vec<String>>>,
    forbidden_layers: Option<BTreeMap<String, Vec<String>>>,
}

impl From<RawLintConfig> for LintConfig {
    fn from(raw: RawLintConfig) -> Self {
        let declared: HashSet<&str> = raw.layers.iter().map(|l| l.name.as_str()).collect();
        let forbidden_frameworks = raw.forbidden_frameworks.unwrap_or_else(|| {
            restrict_to_declared(default_forbidden_frameworks(), &declared, false)
        });
        let forbidden_layers = raw.forbidden_layers.unwrap_or_else(|| {
            restrict_to_declared(default_forbidden_layers(), &declared, true)
        });
        Self {
            analyzer: raw.analyzer,
            layers: raw.layers,
            forbidden_frameworks,
            forbidden_layers,
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            layers: default_layers(),
            forbidden_frameworks: default_forbidden_frameworks(),
            forbidden_layers: default_forbidden_layers(),
        }
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze, relative to the checked path.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default)]
    pub respect_gitignore: bool,

    /// Worker threads; `0` or `1` runs sequentially, unset uses all cores.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: Vec::new(),
            respect_gitignore: false,
            parallelism: None,
        }
    }
}

/// A named architecture layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDef {
    /// Layer name (e.g., `"domain"`).
    pub name: String,
    /// Directory names that place a file in this layer (default: the name).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<String>,
}

impl LayerDef {
    /// Creates a layer matched by its own name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: Vec::new(),
        }
    }

    /// Segments used for classification.
    pub fn effective_segments(&self) -> impl Iterator<Item = &str> {
        let own = self.segments.is_empty().then_some(self.name.as_str());
        own.into_iter()
            .chain(self.segments.iter().map(String::as_str))
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_layers() -> Vec<LayerDef> {
    DEFAULT_LAYERS.iter().map(|n| LayerDef::new(*n)).collect()
}

fn default_forbidden_frameworks() -> BTreeMap<String, Vec<String>> {
    let defaults = RuleTables::defaults();
    table_from(|name| {
        defaults
            .forbidden_frameworks(&Layer::new(name))
            .to_vec()
    })
}

fn default_forbidden_layers() -> BTreeMap<String, Vec<String>> {
    let defaults = RuleTables::defaults();
    table_from(|name| {
        defaults
            .forbidden_layers(&Layer::new(name))
            .iter()
            .map(|l| l.as_str().to_owned())
            .collect()
    })
}

/// Drops default entries keyed by undeclared layers; with `values_are_layers`
/// also drops undeclared targets.
fn restrict_to_declared(
    mut table: BTreeMap<String, Vec<String>>,
    declared: &HashSet<&str>,
    values_are_layers: bool,
) -> BTreeMap<String, Vec<String>> {
    table.retain(|layer, entries| {
        if values_are_layers {
            entries.retain(|other| declared.contains(other.as_str()));
        }
        declared.contains(layer.as_str()) && !entries.is_empty()
    });
    table
}

fn table_from(entries: impl Fn(&str) -> Vec<String>) -> BTreeMap<String, Vec<String>> {
    DEFAULT_LAYERS
        .iter()
        .map(|name| ((*name).to_owned(), entries(name)))
        .filter(|(_, list)| !list.is_empty())
        .collect()
}

/// Errors when loading configuration.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(layer_lint::config::io))]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    #[diagnostic(code(layer_lint::config::parse))]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    #[diagnostic(
        code(layer_lint::config::validation),
        help("every table key and forbidden layer must name a [[layers]] entry")
    )]
    Validation(String),
}

impl LintConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validate config consistency.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut layer_names: HashSet<&str> = HashSet::new();
        for l in &self.layers {
            if l.name.is_empty() {
                return Err(ConfigError::Validation("layer with empty name".into()));
            }
            if !layer_names.insert(l.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "layer '{}' declared twice",
                    l.name
                )));
            }
            if l.segments.iter().any(String::is_empty) {
                return Err(ConfigError::Validation(format!(
                    "layer '{}' has an empty segment",
                    l.name
                )));
            }
        }

        for (layer, frameworks) in &self.forbidden_frameworks {
            if !layer_names.contains(layer.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "forbidden_frameworks.{layer}: unknown layer"
                )));
            }
            for fw in frameworks {
                if fw.is_empty() || fw.starts_with('.') || fw.ends_with('.') {
                    return Err(ConfigError::Validation(format!(
                        "forbidden_frameworks.{layer}: invalid framework name '{fw}'"
                    )));
                }
            }
        }

        for (layer, others) in &self.forbidden_layers {
            if !layer_names.contains(layer.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "forbidden_layers.{layer}: unknown layer"
                )));
            }
            for other in others {
                if !layer_names.contains(other.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "forbidden_layers.{layer}: unknown layer '{other}'"
                    )));
                }
            }
            if others.contains(layer) {
                return Err(ConfigError::Validation(format!(
                    "forbidden_layers.{layer}: layer forbids itself"
                )));
            }
        }

        Ok(())
    }

    /// Builds the layer classifier in declaration order.
    #[must_use]
    pub fn classifier(&self) -> LayerClassifier {
        let mut classifier = LayerClassifier::new();
        for def in &self.layers {
            for segment in def.effective_segments() {
                classifier = classifier.with_segment(segment, Layer::new(def.name.as_str()));
            }
        }
        classifier
    }

    /// Builds the immutable rule tables.
    #[must_use]
    pub fn rule_tables(&self) -> RuleTables {
        let mut tables = RuleTables::new();
        for (layer, frameworks) in &self.forbidden_frameworks {
            for fw in frameworks {
                tables = tables.forbid_framework(layer.as_str(), fw.as_str());
            }
        }
        for (layer, others) in &self.forbidden_layers {
            for other in others {
                tables = tables.forbid_layer(layer.as_str(), other.as_str());
            }
        }
        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = LintConfig::parse("").expect("parse failed");
        assert_eq!(config, LintConfig::default());
        assert_eq!(config.layers.len(), 4);
        assert_eq!(config.forbidden_frameworks["domain"].len(), 7);
        assert_eq!(
            config.forbidden_layers["infrastructure"],
            vec!["presentation".to_string()]
        );
        assert!(!config.forbidden_frameworks.contains_key("presentation"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[analyzer]
root = "./src"
exclude = ["**/migrations/**"]
respect_gitignore = true
parallelism = 2

[[layers]]
name = "core"
segments = ["core", "model"]

[[layers]]
name = "adapters"

[forbidden_frameworks]
core = ["django"]

[forbidden_layers]
core = ["adapters"]
"#;
        let config = LintConfig::parse(toml).expect("parse failed");
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.parallelism, Some(2));
        assert!(config.analyzer.respect_gitignore);
        assert_eq!(config.layers.len(), 2);
        assert!(config.validate().is_ok());

        let classifier = config.classifier();
        let pairs: Vec<(&str, &str)> = classifier
            .patterns()
            .iter()
            .map(|(s, l)| (s.as_str(), l.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [("core", "core"), ("model", "core"), ("adapters", "adapters")]
        );

        let tables = config.rule_tables();
        assert_eq!(tables.forbidden_frameworks(&Layer::new("core")), ["django"]);
        assert_eq!(
            tables.forbidden_layers(&Layer::new("core")),
            [Layer::new("adapters")]
        );
    }

    #[test]
    fn present_but_empty_table_forbids_nothing() {
        let toml = "[forbidden_frameworks]\n";
        let config = LintConfig::parse(toml).expect("parse failed");
        assert!(config.forbidden_frameworks.is_empty());
        assert!(!config.forbidden_layers.is_empty());
    }

    #[test]
    fn default_tables_match_rule_defaults() {
        let tables = LintConfig::default().rule_tables();
        let builtin = RuleTables::defaults();
        for name in DEFAULT_LAYERS {
            let layer = Layer::new(*name);
            assert_eq!(
                tables.forbidden_frameworks(&layer),
                builtin.forbidden_frameworks(&layer)
            );
            assert_eq!(
                tables.forbidden_layers(&layer),
                builtin.forbidden_layers(&layer)
            );
        }
    }

    #[test]
    fn custom_layers_keep_only_their_default_rules() {
        let config = LintConfig::parse("[[layers]]\nname = \"core\"\n").expect("parse failed");
        assert!(config.forbidden_frameworks.is_empty());
        assert!(config.forbidden_layers.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_layer_list_narrows_default_rules() {
        let toml = r#"
[[layers]]
name = "domain"

[[layers]]
name = "infrastructure"
"#;
        let config = LintConfig::parse(toml).expect("parse failed");
        assert!(config.validate().is_ok());
        assert_eq!(config.forbidden_frameworks["domain"].len(), 7);
        assert!(!config.forbidden_frameworks.contains_key("application"));
        assert_eq!(
            config.forbidden_layers["domain"],
            vec!["infrastructure".to_string()]
        );
        assert_eq!(config.forbidden_layers.len(), 1);
    }

    #[test]
    fn validate_catches_unknown_layer_key() {
        let toml = r#"
[forbidden_frameworks]
persistence = ["redis"]
"#;
        let config = LintConfig::parse(toml).expect("parse failed");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("persistence"));
    }

    #[test]
    fn validate_catches_unknown_forbidden_layer() {
        let toml = r#"
[forbidden_layers]
domain = ["adapters"]
"#;
        let config = LintConfig::parse(toml).expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_catches_self_forbidding() {
        let toml = r#"
[forbidden_layers]
domain = ["domain"]
"#;
        let config = LintConfig::parse(toml).expect("parse failed");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("forbids itself"));
    }

    #[test]
    fn validate_catches_duplicate_layer() {
        let toml = r#"
[[layers]]
name = "domain"

[[layers]]
name = "domain"

[forbidden_frameworks]

[forbidden_layers]
"#;
        let config = LintConfig::parse(toml).expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_catches_dotted_framework() {
        let toml = r#"
[forbidden_frameworks]
domain = ["redis."]
"#;
        let config = LintConfig::parse(toml).expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = LintConfig::parse("[[layers]\nname = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
