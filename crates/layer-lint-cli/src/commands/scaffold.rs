//! Scaffold command: generates a clean-architecture Python project.
//!
//! The generated tree uses the default layer directory names, so a fresh
//! project passes `layer-lint check` without configuration.

use anyhow::{bail, Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Package directories; each gets an empty `__init__.py`.
const DIRS: &[&str] = &[
    "src/{name}/domain/entities",
    "src/{name}/domain/value_objects",
    "src/{name}/domain/events",
    "src/{name}/domain/services",
    "src/{name}/domain/interfaces",
    "src/{name}/application/commands",
    "src/{name}/application/queries",
    "src/{name}/application/handlers",
    "src/{name}/infrastructure/persistence",
    "src/{name}/infrastructure/messaging",
    "src/{name}/infrastructure/external",
    "src/{name}/presentation/api/routes",
    "src/{name}/presentation/api/schemas",
    "src/{name}/presentation/cli",
    "src/{name}/presentation/consumers",
    "tests/unit/domain",
    "tests/unit/application",
    "tests/integration",
    "tests/e2e",
];

/// Template files as `(path, content)`; `{name}` and `{title}` are substituted.
const FILES: &[(&str, &str)] = &[
    (
        "src/{name}/domain/exceptions.py",
        r#""""Domain exceptions."""


class DomainException(Exception):
    """Base domain exception."""
"#,
    ),
    (
        "src/{name}/application/unit_of_work.py",
        r#""""Abstract unit of work."""
from abc import ABC, abstractmethod
from typing import Self


class AbstractUnitOfWork(ABC):
    def __enter__(self) -> Self:
        return self

    def __exit__(self, *args) -> None:
        self.rollback()

    @abstractmethod
    def commit(self) -> None:
        raise NotImplementedError

    @abstractmethod
    def rollback(self) -> None:
        raise NotImplementedError
"#,
    ),
    (
        "src/{name}/infrastructure/config.py",
        r#""""Settings loaded from the environment."""
from pydantic_settings import BaseSettings, SettingsConfigDict


class Settings(BaseSettings):
    model_config = SettingsConfigDict(env_file=".env")

    database_url: str = "sqlite:///./app.db"
    debug: bool = False
"#,
    ),
    (
        "src/{name}/bootstrap.py",
        r#""""Dependency wiring."""
from functools import lru_cache

from .infrastructure.config import Settings


@lru_cache
def get_settings() -> Settings:
    return Settings()
"#,
    ),
    (
        "src/{name}/main.py",
        r#""""Application entry point."""
from fastapi import FastAPI

app = FastAPI(title="{title}")


@app.get("/health")
def health() -> dict[str, str]:
    return {"status": "healthy"}
"#,
    ),
    (
        "tests/conftest.py",
        r#""""Pytest fixtures."""
import pytest
"#,
    ),
    (
        "tests/fakes.py",
        r#""""In-memory fakes for ports."""
"#,
    ),
    (
        "tests/factories.py",
        r#""""Test data factories."""
from uuid import uuid4
"#,
    ),
    (
        "pyproject.toml",
        r#"[project]
name = "{name}"
version = "0.1.0"
requires-python = ">=3.11"
dependencies = [
    "fastapi>=0.100.0",
    "uvicorn[standard]>=0.23.0",
    "pydantic>=2.0.0",
    "pydantic-settings>=2.0.0",
]

[project.optional-dependencies]
dev = ["pytest>=7.0", "pytest-cov>=4.0", "ruff>=0.1", "mypy>=1.0", "layer-lint"]

[tool.pytest.ini_options]
testpaths = ["tests"]

[tool.ruff]
line-length = 100

[tool.mypy]
python_version = "3.11"
strict = true
"#,
    ),
    (
        ".gitignore",
        r"__pycache__/
*.py[cod]
.venv/
.env
*.db
.coverage
htmlcov/
.pytest_cache/
.mypy_cache/
",
    ),
];

/// A validated project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName {
    /// Python package name (snake_case).
    pub package: String,
    /// Human-readable title.
    pub title: String,
}

impl ProjectName {
    /// Normalizes `raw` to a snake_case package name.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid Python identifier.
    pub fn parse(raw: &str) -> Result<Self> {
        let package = raw.trim().to_lowercase().replace('-', "_");

        let mut chars = package.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid_start || !valid_rest {
            bail!("'{raw}' is not a valid Python package name");
        }

        let title = package
            .split('_')
            .filter(|w| !w.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self { package, title })
    }

    fn expand(&self, template: &str) -> String {
        template
            .replace("{name}", &self.package)
            .replace("{title}", &self.title)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Paths written by a scaffold run.
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    /// Template files written.
    pub written: Vec<PathBuf>,
    /// Template files left untouched because they already existed.
    pub kept: Vec<PathBuf>,
}

/// Creates the project tree under `base`.
///
/// Package `__init__.py` files are created if missing and never truncated.
/// Existing template files are kept unless `force` is set.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be written.
pub fn generate(name: &ProjectName, base: &Path, force: bool) -> Result<ScaffoldReport> {
    for dir in DIRS {
        let path = base.join(name.expand(dir));
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let init = path.join("__init__.py");
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&init)
            .with_context(|| format!("Failed to create {}", init.display()))?;
    }

    let mut report = ScaffoldReport::default();
    for (rel, content) in FILES {
        let path = base.join(name.expand(rel));
        if path.exists() && !force {
            tracing::debug!("Keeping existing {}", path.display());
            report.kept.push(path);
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, name.expand(content))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        report.written.push(path);
    }

    Ok(report)
}

/// Runs the scaffold command.
pub fn run(raw_name: &str, output: &Path, force: bool) -> Result<()> {
    let name = ProjectName::parse(raw_name)?;
    println!("Creating {}...", name.package);

    let report = generate(&name, output, force)?;
    for path in &report.written {
        println!("  created {}", path.display());
    }
    for path in &report.kept {
        println!("  kept    {} (use --force to overwrite)", path.display());
    }

    println!("\nProject '{}' created.", name.package);
    println!("\nNext steps:");
    println!("  cd {}", output.display());
    println!("  python -m venv .venv && source .venv/bin/activate");
    println!("  pip install -e '.[dev]'");
    println!("  layer-lint check src --strict");

    Ok(())
}
