//! Finds, loads and validates the configuration for one invocation.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config PATH`
//! 2. `layer-lint.toml`, then `.layer-lint.toml`, in the checked directory
//! 3. `config.toml` in `$LAYER_LINT_CONFIG_DIR`, else in `~/.layer-lint/`
//! 4. built-in layers and rule tables

use anyhow::{Context, Result};
use layer_lint_core::{Analyzer, LintConfig};
use layer_lint_py::PythonExtractor;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["layer-lint.toml", ".layer-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "LAYER_LINT_CONFIG_DIR";

/// Which lookup step produced the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// `--config` flag.
    Flag,
    /// File next to the checked sources.
    Project,
    /// User-wide config directory.
    Global,
    /// Nothing found.
    BuiltIn,
}

/// Lookup inputs that do not depend on the checked directory.
#[derive(Debug, Clone)]
pub struct Lookup {
    explicit: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl Lookup {
    /// Lookup using the `--config` flag and the process environment.
    #[must_use]
    pub fn from_env(explicit: Option<&Path>) -> Self {
        let global_dir = std::env::var_os(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|h| h.join(".layer-lint")));
        Self {
            explicit: explicit.map(Path::to_path_buf),
            global_dir,
        }
    }

    /// Locates the config file for `project_dir`.
    fn locate(&self, project_dir: &Path) -> (Origin, Option<PathBuf>) {
        if let Some(path) = &self.explicit {
            return (Origin::Flag, Some(path.clone()));
        }

        let project = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| project_dir.join(name))
            .find(|candidate| candidate.is_file());
        if project.is_some() {
            return (Origin::Project, project);
        }

        let global = self
            .global_dir
            .as_ref()
            .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
            .filter(|candidate| candidate.is_file());
        if global.is_some() {
            return (Origin::Global, global);
        }

        (Origin::BuiltIn, None)
    }

    /// Locates, loads and validates the configuration for `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the located file cannot be read, parsed or
    /// validated. An explicit `--config` path that does not exist is an error.
    pub fn resolve(&self, project_dir: &Path) -> Result<Resolved> {
        let (origin, file) = self.locate(project_dir);
        let config = match &file {
            Some(path) => {
                tracing::debug!("Loading {:?} config from {}", origin, path.display());
                LintConfig::from_file(path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?
            }
            None => {
                tracing::debug!("No config file found, using built-in layers");
                LintConfig::default()
            }
        };
        config
            .validate()
            .with_context(|| format!("Invalid configuration ({origin:?})"))?;

        Ok(Resolved {
            origin,
            file,
            config,
        })
    }
}

/// A loaded and validated configuration.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Lookup step that produced it.
    pub origin: Origin,
    /// File it was read from, if any.
    pub file: Option<PathBuf>,
    /// The configuration itself.
    pub config: LintConfig,
}

impl Resolved {
    /// Built-in defaults, as if no file had been found.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            origin: Origin::BuiltIn,
            file: None,
            config: LintConfig::default(),
        }
    }

    /// Directory to walk: `[analyzer] root` applied to the checked path.
    #[must_use]
    pub fn source_root(&self, checked: &Path) -> PathBuf {
        let configured = &self.config.analyzer.root;
        if configured.is_absolute() {
            configured.clone()
        } else if configured.components().all(|c| c == Component::CurDir) {
            checked.to_path_buf()
        } else {
            checked.join(configured)
        }
    }

    /// Builds a Python analyzer from this configuration plus extra excludes.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is invalid.
    pub fn analyzer(&self, extra_excludes: &[String]) -> Result<Analyzer> {
        extra_excludes
            .iter()
            .fold(
                Analyzer::builder()
                    .config(self.config.clone())
                    .extractor(PythonExtractor::new()),
                |builder, pattern| builder.exclude(pattern.as_str()),
            )
            .build()
            .context("Failed to build analyzer")
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.origin) {
            (Some(path), Origin::Flag) => write!(f, "{} (--config)", path.display()),
            (Some(path), Origin::Global) => write!(f, "{} (global)", path.display()),
            (Some(path), _) => write!(f, "{}", path.display()),
            (None, _) => write!(f, "built-in defaults"),
        }
    }
}
