//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# layer-lint configuration
# Layers are matched by directory name; the first listed layer wins when a
# path contains several layer directories.

[analyzer]
# Root directory to analyze, relative to the checked path
root = "."

# Exclude patterns, relative to root (__pycache__ is always skipped).
# A pattern without '/' matches any file or directory name ("migrations");
# one with '/' matches the relative path ("domain/legacy/*.py").
exclude = []

# Respect .gitignore files
respect_gitignore = false

# Worker threads (1 = sequential, unset = all cores)
# parallelism = 4

[[layers]]
name = "domain"

[[layers]]
name = "application"

[[layers]]
name = "infrastructure"

[[layers]]
name = "presentation"
# segments = ["presentation", "api"]  # extra directory names for this layer

# Frameworks each layer must stay independent of.
# Matches the exact module or any submodule ("redis" matches "redis.client").
[forbidden_frameworks]
domain = ["fastapi", "flask", "sqlalchemy", "pydantic", "django", "celery", "redis"]
application = ["fastapi", "flask", "django"]

# Layers each layer must not import from.
# Matches any dotted segment of the imported module name.
[forbidden_layers]
domain = ["application", "infrastructure", "presentation"]
application = ["infrastructure", "presentation"]
infrastructure = ["presentation"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("layer-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created layer-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit [[layers]] and the forbidden tables for your project");
    println!("  2. Run: layer-lint check src");

    Ok(())
}
