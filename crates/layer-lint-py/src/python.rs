//! Python import extractor using Tree-sitter.

use layer_lint_core::{ImportEdge, ImportExtractor, ParseFailure, ScanOutcome};
use tree_sitter::{Language, Node, Parser};

/// Extracts module-level import edges from Python source.
///
/// Every `import` and `from ... import` statement counts, wherever it is
/// nested. Relative imports report the module part after the dots, and a
/// bare `from . import x` reports nothing.
pub struct PythonExtractor {
    language: Language,
}

impl PythonExtractor {
    /// Creates a new Python extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        node.utf8_text(src).unwrap_or("")
    }

    /// Join identifier children of a `dotted_name` node with dots.
    fn dotted_name(node: &Node<'_>, src: &[u8]) -> String {
        let mut parts = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "identifier" {
                parts.push(Self::text(&child, src));
            }
        }
        parts.join(".")
    }

    /// Module named by an import target, if it has one.
    fn module_of(node: &Node<'_>, src: &[u8]) -> Option<String> {
        let name = match node.kind() {
            "dotted_name" => Self::dotted_name(node, src),
            "aliased_import" => Self::dotted_name(&node.child_by_field_name("name")?, src),
            "relative_import" => {
                let mut cursor = node.walk();
                let dotted = node
                    .named_children(&mut cursor)
                    .find(|c| c.kind() == "dotted_name")?;
                Self::dotted_name(&dotted, src)
            }
            _ => return None,
        };
        (!name.is_empty()).then_some(name)
    }

    /// Pushes the edges of an import statement; returns false for other nodes.
    fn push_import(node: &Node<'_>, src: &[u8], edges: &mut Vec<ImportEdge>) -> bool {
        let line = node.start_position().row + 1;
        match node.kind() {
            "import_statement" => {
                let mut cursor = node.walk();
                for target in node.children_by_field_name("name", &mut cursor) {
                    if let Some(module) = Self::module_of(&target, src) {
                        edges.push(ImportEdge::new(module, line));
                    }
                }
            }
            "import_from_statement" => {
                if let Some(module) = node
                    .child_by_field_name("module_name")
                    .and_then(|m| Self::module_of(&m, src))
                {
                    edges.push(ImportEdge::new(module, line));
                }
            }
            "future_import_statement" => edges.push(ImportEdge::new("__future__", line)),
            _ => return false,
        }
        true
    }

    /// Pre-order walk over the whole tree, collecting import edges.
    fn collect_imports(root: Node<'_>, src: &[u8]) -> Vec<ImportEdge> {
        let mut edges = Vec::new();
        let mut cursor = root.walk();
        'walk: loop {
            let node = cursor.node();
            let is_import = Self::push_import(&node, src, &mut edges);
            if !is_import && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }
        edges
    }

    /// Line (1-indexed) of the first error or missing node.
    fn first_error_line(root: Node<'_>) -> usize {
        let mut cursor = root.walk();
        'walk: loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                return node.start_position().row + 1;
            }
            if node.has_error() && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }
        root.start_position().row + 1
    }

    /// Line (1-indexed) of the first construct Python 3 rejects.
    ///
    /// The grammar is permissive: it still accepts Python 2 statements and
    /// literals, and its indent scanner lets misaligned siblings through.
    fn first_py3_error_line(root: Node<'_>, src: &[u8]) -> Option<usize> {
        let mut cursor = root.walk();
        'walk: loop {
            let node = cursor.node();
            if Self::rejected_by_py3(&node, src) {
                return Some(node.start_position().row + 1);
            }
            if let Some(line) = Self::misaligned_line(&node, src) {
                return Some(line);
            }
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }
        None
    }

    fn rejected_by_py3(node: &Node<'_>, src: &[u8]) -> bool {
        match node.kind() {
            "print_statement" | "exec_statement" => true,
            // `except E, e:`
            "except_clause" => Self::has_token(node, ","),
            "comparison_operator" => Self::has_token(node, "<>"),
            "integer" => {
                let text = Self::text(node, src);
                let long = text.ends_with(['l', 'L']);
                let legacy_octal = text.len() > 1
                    && text.starts_with('0')
                    && text.bytes().all(|b| b.is_ascii_digit() || b == b'_')
                    && text.bytes().any(|b| (b'1'..=b'9').contains(&b));
                long || legacy_octal
            }
            _ => false,
        }
    }

    fn has_token(node: &Node<'_>, token: &str) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|c| !c.is_named() && c.kind() == token);
        found
    }

    /// Statements that open a line in the same suite must share one indent;
    /// module-level statements must not be indented at all.
    fn misaligned_line(node: &Node<'_>, src: &[u8]) -> Option<usize> {
        let top_level = match node.kind() {
            "module" => true,
            "block" => false,
            _ => return None,
        };
        let mut expected: Option<&[u8]> = top_level.then_some(b"".as_slice());
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if matches!(child.kind(), "comment" | "line_continuation") {
                continue;
            }
            let Some(indent) = Self::leading_indent(&child, src) else {
                continue;
            };
            match expected {
                Some(want) if want != indent => return Some(child.start_position().row + 1),
                Some(_) => {}
                None => expected = Some(indent),
            }
        }
        None
    }

    /// Whitespace before `node` on its line, or `None` if other code precedes it.
    fn leading_indent<'a>(node: &Node<'_>, src: &'a [u8]) -> Option<&'a [u8]> {
        let start = node.start_byte();
        let line_start = src[..start]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let prefix = &src[line_start..start];
        prefix
            .iter()
            .all(|b| matches!(b, b' ' | b'\t' | b'\x0c'))
            .then_some(prefix)
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportExtractor for PythonExtractor {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py"]
    }

    fn scan(&self, source: &[u8]) -> ScanOutcome {
        if std::str::from_utf8(source).is_err() {
            return ScanOutcome::Unparsable(ParseFailure::InvalidUtf8);
        }

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&self.language) {
            return ScanOutcome::Unparsable(ParseFailure::ParserUnavailable(e.to_string()));
        }
        let Some(tree) = parser.parse(source, None) else {
            return ScanOutcome::Unparsable(ParseFailure::ParserUnavailable(
                "parser returned no tree".into(),
            ));
        };

        let root = tree.root_node();
        if root.has_error() {
            return ScanOutcome::Unparsable(ParseFailure::Syntax {
                line: Self::first_error_line(root),
            });
        }
        if let Some(line) = Self::first_py3_error_line(root, source) {
            return ScanOutcome::Unparsable(ParseFailure::Syntax { line });
        }

        let imports = Self::collect_imports(root, source);
        tracing::trace!("Extracted {} import(s)", imports.len());
        ScanOutcome::Parsed(imports)
    }
}
