//! List-layers command implementation.

use anyhow::Result;
use layer_lint_core::{Analyzer, Layer};
use std::fmt::Write;
use std::path::Path;

use crate::config_resolver::{Lookup, Resolved};

/// Runs the list-layers command.
pub fn run(path: &Path, lookup: &Lookup) -> Result<()> {
    let resolved = lookup.resolve(path)?;
    let analyzer = resolved.analyzer(&[])?;

    println!("Config: {resolved}");
    println!();
    print!("{}", render(&resolved, &analyzer));
    Ok(())
}

/// Layers in declaration order with the segments and rules the analyzer uses.
fn render(resolved: &Resolved, analyzer: &Analyzer) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Layers (first match wins):");
    let _ = writeln!(out);
    for def in &resolved.config.layers {
        let layer = Layer::new(def.name.as_str());
        let segments: Vec<&str> = analyzer
            .classifier()
            .patterns()
            .iter()
            .filter(|(_, l)| *l == layer)
            .map(|(segment, _)| segment.as_str())
            .collect();
        let _ = writeln!(out, "  {:<16} segments: {}", def.name, segments.join(", "));

        let frameworks = analyzer.rules().forbidden_frameworks(&layer);
        if !frameworks.is_empty() {
            let _ = writeln!(out, "  {:<16} no frameworks: {}", "", frameworks.join(", "));
        }
        let layers: Vec<&str> = analyzer
            .rules()
            .forbidden_layers(&layer)
            .iter()
            .map(Layer::as_str)
            .collect();
        if !layers.is_empty() {
            let _ = writeln!(out, "  {:<16} no imports from: {}", "", layers.join(", "));
        }
    }
    out
}
