//! Shared output formatting for lint results.

use anyhow::Result;
use layer_lint_core::LintResult;
use std::fmt::Write;
use std::io::IsTerminal;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result, std::io::stdout().is_terminal())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
    }
    Ok(())
}

/// ANSI escapes, or empty strings when color is off.
struct Palette {
    red: &'static str,
    green: &'static str,
    yellow: &'static str,
    bold: &'static str,
    reset: &'static str,
}

impl Palette {
    fn new(color: bool) -> Self {
        if color {
            Self {
                red: "\x1b[31m",
                green: "\x1b[32m",
                yellow: "\x1b[33m",
                bold: "\x1b[1m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                red: "",
                green: "",
                yellow: "",
                bold: "",
                reset: "",
            }
        }
    }
}

/// Violations grouped under `[LAYER]` headings, layers in name order.
fn render_text(result: &LintResult, color: bool) -> String {
    let p = Palette::new(color);
    let mut out = String::new();

    if result.is_clean() {
        let _ = writeln!(out, "{}No architectural violations found{}", p.green, p.reset);
    } else {
        let _ = writeln!(
            out,
            "{}Found {} violation(s):{}",
            p.red,
            result.violations.len(),
            p.reset
        );
        for (layer, violations) in result.by_layer() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{}[{}]{}",
                p.bold,
                layer.as_str().to_uppercase(),
                p.reset
            );
            for v in violations {
                let _ = writeln!(out, "  {}:{}", v.file.display(), v.line);
                let _ = writeln!(out, "    import: {}", v.import_name);
                let _ = writeln!(out, "    reason: {}", v.reason);
            }
        }
        let _ = writeln!(out);
    }

    for path in &result.parse_failures {
        let _ = writeln!(
            out,
            "{}warning{}: could not parse {}",
            p.yellow,
            p.reset,
            path.display()
        );
    }

    let _ = writeln!(
        out,
        "Checked {} file(s), {} unclassified",
        result.files_checked, result.files_skipped
    );
    out
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for v in &result.violations {
        let _ = writeln!(
            out,
            "{}:{}: [{}] {}: {} ({})",
            v.file.display(),
            v.line,
            v.kind.code(),
            v.layer,
            v.reason,
            v.import_name,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use layer_lint_core::{Layer, RuleKind, Violation};
    use std::path::PathBuf;

    fn violation(file: &str, line: usize, layer: &str, import: &str, kind: RuleKind) -> Violation {
        let reason = match kind {
            RuleKind::ForbiddenFramework => format!("{layer} cannot import framework '{import}'"),
            RuleKind::ForbiddenLayer => format!("{layer} cannot import from infrastructure"),
        };
        Violation {
            file: PathBuf::from(file),
            line,
            layer: Layer::new(layer),
            import_name: import.into(),
            reason,
            kind,
        }
    }

    fn sample() -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 4;
        result.files_skipped = 1;
        result.violations = vec![
            violation("src/application/svc.py", 2, "application", "flask", RuleKind::ForbiddenFramework),
            violation("src/domain/order.py", 3, "domain", "fastapi", RuleKind::ForbiddenFramework),
            violation("src/domain/order.py", 5, "domain", "app.infrastructure.db", RuleKind::ForbiddenLayer),
        ];
        result
    }

    #[test]
    fn text_groups_by_layer() {
        assert_snapshot!(render_text(&sample(), false), @r"
Found 3 violation(s):

[APPLICATION]
  src/application/svc.py:2
    import: flask
    reason: application cannot import framework 'flask'

[DOMAIN]
  src/domain/order.py:3
    import: fastapi
    reason: domain cannot import framework 'fastapi'
  src/domain/order.py:5
    import: app.infrastructure.db
    reason: domain cannot import from infrastructure

Checked 4 file(s), 1 unclassified
");
    }

    #[test]
    fn text_for_clean_result() {
        let mut result = LintResult::new();
        result.files_checked = 2;
        result.parse_failures.push(PathBuf::from("src/domain/broken.py"));
        assert_snapshot!(render_text(&result, false), @r"
No architectural violations found
warning: could not parse src/domain/broken.py
Checked 2 file(s), 0 unclassified
");
    }

    #[test]
    fn color_only_when_requested() {
        assert!(!render_text(&sample(), false).contains('\x1b'));
        assert!(render_text(&sample(), true).contains("\x1b[31mFound 3 violation(s):"));
    }

    #[test]
    fn compact_is_one_line_per_violation() {
        let out = render_compact(&sample());
        assert_eq!(out.lines().count(), 3);
        assert_eq!(
            out.lines().nth(2),
            Some("src/domain/order.py:5: [LL002] domain: domain cannot import from infrastructure (app.infrastructure.db)")
        );
    }

    #[test]
    fn json_round_trips_violations() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["violations"][1]["import_name"], "fastapi");
        assert_eq!(json["violations"][2]["kind"], "forbidden-layer");
        assert_eq!(json["files_checked"], 4);
        assert!(json.get("parse_failures").is_none());
    }
}
