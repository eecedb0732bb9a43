//! Tree walker that classifies, extracts and evaluates every source file.

use crate::classifier::LayerClassifier;
use crate::config::LintConfig;
use crate::extractor::{ImportExtractor, ParseFailure, ScanOutcome};
use crate::rules::RuleTables;
use crate::types::{LintResult, Violation};

use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Directory names that hold build or bytecode caches; never descended into.
const CACHE_DIRS: &[&str] = &["__pycache__"];

/// `*` and `?` stay within one path component; `**` crosses directories.
const EXCLUDE_MATCH: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Errors that abort an analysis run.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum AnalyzerError {
    /// The root directory does not exist.
    #[error("root directory not found: {}", .0.display())]
    #[diagnostic(
        code(layer_lint::root_not_found),
        help("pass the directory holding your layered source tree")
    )]
    RootNotFound(PathBuf),

    /// The root exists but is not a directory.
    #[error("root is not a directory: {}", .0.display())]
    #[diagnostic(code(layer_lint::root_not_directory))]
    RootNotDirectory(PathBuf),

    /// The root directory cannot be listed.
    #[error("cannot read root directory {}: {source}", .path.display())]
    #[diagnostic(code(layer_lint::root_unreadable))]
    RootUnreadable {
        /// Root that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// No extractor was registered.
    #[error("no import extractor registered")]
    #[diagnostic(code(layer_lint::no_extractor))]
    NoExtractor,

    /// Worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    #[diagnostic(code(layer_lint::thread_pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// An exclude pattern is not a valid glob.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    #[diagnostic(
        code(layer_lint::invalid_exclude),
        help("patterns without '/' match a file or directory name; others match the path below the root")
    )]
    InvalidExclude {
        /// Pattern as given.
        pattern: String,
        /// Glob syntax error.
        source: glob::PatternError,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    #[diagnostic(code(layer_lint::config))]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    config: Option<LintConfig>,
    classifier: Option<LayerClassifier>,
    rules: Option<RuleTables>,
    extractors: Vec<Box<dyn ImportExtractor>>,
    exclude_patterns: Vec<String>,
    parallelism: Option<usize>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration the classifier and rule tables are built from.
    #[must_use]
    pub fn config(mut self, config: LintConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the classifier derived from configuration.
    #[must_use]
    pub fn classifier(mut self, classifier: LayerClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Overrides the rule tables derived from configuration.
    #[must_use]
    pub fn rules(mut self, rules: RuleTables) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Registers an import extractor.
    #[must_use]
    pub fn extractor<E: ImportExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Adds an exclude glob, matched relative to the validated root.
    ///
    /// Without a `/` the pattern matches any single file or directory name.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the number of worker threads, overriding configuration.
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no extractor was registered, if the configuration
    /// is invalid, or if an exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        if self.extractors.is_empty() {
            return Err(AnalyzerError::NoExtractor);
        }

        let config = self.config.unwrap_or_default();
        config.validate()?;

        let excludes = self
            .exclude_patterns
            .iter()
            .chain(&config.analyzer.exclude)
            .map(|pattern| ExcludeRule::compile(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            classifier: self.classifier.unwrap_or_else(|| config.classifier()),
            rules: self.rules.unwrap_or_else(|| config.rule_tables()),
            extractors: self.extractors,
            excludes,
            respect_gitignore: config.analyzer.respect_gitignore,
            parallelism: self.parallelism.or(config.analyzer.parallelism),
        })
    }
}

/// A compiled exclude pattern, matched against paths relative to the root.
enum ExcludeRule {
    /// No `/`: matches any single file or directory name, gitignore style.
    Name(glob::Pattern),
    /// Contains `/`: matches the whole relative path.
    Path(glob::Pattern),
}

impl ExcludeRule {
    fn compile(raw: &str) -> Result<Self, AnalyzerError> {
        let trimmed = raw.trim_start_matches("./").trim_end_matches('/');
        let pattern = glob::Pattern::new(trimmed).map_err(|source| AnalyzerError::InvalidExclude {
            pattern: raw.to_owned(),
            source,
        })?;
        Ok(if trimmed.contains('/') {
            Self::Path(pattern)
        } else {
            Self::Name(pattern)
        })
    }

    fn matches(&self, relative: &Path) -> bool {
        match self {
            Self::Name(pattern) => relative.components().any(|c| match c {
                Component::Normal(part) => {
                    pattern.matches_with(&part.to_string_lossy(), EXCLUDE_MATCH)
                }
                _ => false,
            }),
            Self::Path(pattern) => pattern.matches_path_with(relative, EXCLUDE_MATCH),
        }
    }
}

/// What happened to a single discovered file.
enum FileOutcome {
    Unclassified,
    Checked {
        violations: Vec<Violation>,
        failure: Option<ParseFailure>,
    },
}

/// Walks a source tree and evaluates every classified file.
///
/// Use [`Analyzer::builder()`] to construct an instance. The analyzer holds
/// only immutable state, so one instance can validate many roots.
pub struct Analyzer {
    classifier: LayerClassifier,
    rules: RuleTables,
    extractors: Vec<Box<dyn ImportExtractor>>,
    excludes: Vec<ExcludeRule>,
    respect_gitignore: bool,
    parallelism: Option<usize>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// The classifier in use.
    #[must_use]
    pub fn classifier(&self) -> &LayerClassifier {
        &self.classifier
    }

    /// The rule tables in use.
    #[must_use]
    pub fn rules(&self) -> &RuleTables {
        &self.rules
    }

    /// Validates every source file under `root`.
    ///
    /// Violations come back sorted by file, then line. An empty violation
    /// list is the success case.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing, not a directory or unreadable,
    /// or if the worker pool cannot start. Individual files never fail the
    /// run.
    pub fn validate(&self, root: impl AsRef<Path>) -> Result<LintResult, AnalyzerError> {
        let root = root.as_ref();
        check_root(root)?;

        info!("Starting analysis at {}", root.display());
        let files = self.discover_files(root);
        info!("Found {} files to analyze", files.len());

        let outcomes = self.run_files(&files)?;

        let mut result = LintResult::new();
        for (path, outcome) in files.into_iter().zip(outcomes) {
            match outcome {
                FileOutcome::Unclassified => result.files_skipped += 1,
                FileOutcome::Checked {
                    violations,
                    failure,
                } => {
                    if let Some(failure) = failure {
                        warn!("No imports read from {}: {}", path.display(), failure);
                        result.parse_failures.push(path);
                    }
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files ({} unclassified)",
            result.violations.len(),
            result.files_checked,
            result.files_skipped
        );

        Ok(result)
    }

    /// Classifies `path` and evaluates `source` against the rule tables.
    ///
    /// Unclassified paths and unparsable sources yield no violations.
    #[must_use]
    pub fn check_source(&self, path: &Path, source: &[u8]) -> Vec<Violation> {
        match self.check_classified(path, || Ok(source.to_vec())) {
            FileOutcome::Unclassified => Vec::new(),
            FileOutcome::Checked { violations, .. } => violations,
        }
    }

    fn run_files(&self, files: &[PathBuf]) -> Result<Vec<FileOutcome>, AnalyzerError> {
        let check = |path: &PathBuf| self.check_file(path);
        let outcomes: Vec<FileOutcome> = match self.parallelism {
            Some(0 | 1) => files.iter().map(check).collect(),
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| files.par_iter().map(check).collect()),
            None => files.par_iter().map(check).collect(),
        };
        Ok(outcomes)
    }

    fn check_file(&self, path: &Path) -> FileOutcome {
        self.check_classified(path, || std::fs::read(path))
    }

    fn check_classified(
        &self,
        path: &Path,
        read: impl FnOnce() -> std::io::Result<Vec<u8>>,
    ) -> FileOutcome {
        let Some(layer) = self.classifier.classify(path) else {
            debug!("Unclassified: {}", path.display());
            return FileOutcome::Unclassified;
        };
        debug!("Analyzing {} as {}", path.display(), layer);

        let outcome = match (read(), self.extractor_for(path)) {
            (Ok(source), Some(extractor)) => extractor.scan(&source),
            (Ok(_), None) => ScanOutcome::Parsed(Vec::new()),
            (Err(e), _) => ScanOutcome::Unparsable(ParseFailure::Unreadable(e.to_string())),
        };
        let failure = outcome.failure().cloned();

        let violations = outcome
            .into_edges()
            .iter()
            .flat_map(|edge| self.rules.evaluate(layer, path, edge))
            .collect();

        FileOutcome::Checked {
            violations,
            failure,
        }
    }

    fn extractor_for(&self, path: &Path) -> Option<&dyn ImportExtractor> {
        let ext = dotted_extension(path)?;
        self.extractors
            .iter()
            .find(|e| e.extensions().contains(&ext.as_str()))
            .map(AsRef::as_ref)
    }

    /// Discovers source files handled by a registered extractor, sorted.
    ///
    /// Symlinked files are included; symlinked directories are not entered.
    fn discover_files(&self, root: &Path) -> Vec<PathBuf> {
        let supported: Vec<&str> = self
            .extractors
            .iter()
            .flat_map(|e| e.extensions().iter().copied())
            .collect();

        let mut builder = ignore::WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .git_ignore(self.respect_gitignore)
            .require_git(false)
            .follow_links(false)
            .filter_entry(|entry| !is_cache_dir(entry.path()));

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            let path = entry.path();

            let is_file = entry
                .file_type()
                .is_some_and(|t| t.is_file() || (t.is_symlink() && path.is_file()));
            if !is_file {
                continue;
            }

            let handled = dotted_extension(path).is_some_and(|ext| supported.contains(&ext.as_str()));
            if !handled {
                continue;
            }

            if self.should_exclude(root, path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        files
    }

    /// Checks `path` against the exclude rules, relative to `root`.
    fn should_exclude(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.excludes.iter().any(|rule| rule.matches(relative))
    }
}

fn check_root(root: &Path) -> Result<(), AnalyzerError> {
    if !root.exists() {
        return Err(AnalyzerError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(AnalyzerError::RootNotDirectory(root.to_path_buf()));
    }
    std::fs::read_dir(root).map_err(|source| AnalyzerError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn is_cache_dir(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(part) => part.to_str().is_some_and(|p| CACHE_DIRS.contains(&p)),
        _ => false,
    })
}

fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImportEdge, Layer, DEFAULT_LAYERS};
    use std::fs;
    use tempfile::TempDir;

    /// Treats every `import <name>` line as an edge; `!!` marks the file broken.
    struct LineExtractor;

    impl ImportExtractor for LineExtractor {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".py"]
        }

        fn scan(&self, source: &[u8]) -> ScanOutcome {
            let Ok(text) = std::str::from_utf8(source) else {
                return ScanOutcome::Unparsable(ParseFailure::InvalidUtf8);
            };
            let mut edges = Vec::new();
            for (i, line) in text.lines().enumerate() {
                if line.contains("!!") {
                    return ScanOutcome::Unparsable(ParseFailure::Syntax { line: i + 1 });
                }
                if let Some(name) = line.strip_prefix("import ") {
                    edges.push(ImportEdge::new(name.trim(), i + 1));
                }
            }
            ScanOutcome::Parsed(edges)
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn analyzer() -> Analyzer {
        Analyzer::builder()
            .extractor(LineExtractor)
            .parallelism(1)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn builder_requires_extractor() {
        assert!(matches!(
            Analyzer::builder().build(),
            Err(AnalyzerError::NoExtractor)
        ));
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let mut config = LintConfig::default();
        config
            .forbidden_layers
            .insert("domain".into(), vec!["domain".into()]);
        let result = Analyzer::builder()
            .config(config)
            .extractor(LineExtractor)
            .build();
        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn missing_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = analyzer().validate(tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, AnalyzerError::RootNotFound(_)));
    }

    #[test]
    fn file_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.py", "");
        let err = analyzer().validate(tmp.path().join("a.py")).unwrap_err();
        assert!(matches!(err, AnalyzerError::RootNotDirectory(_)));
    }

    #[test]
    fn collects_violations_sorted_by_file_and_line() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "domain/b.py", "x = 1\nimport fastapi\nimport app.infrastructure.db\n");
        write(root, "domain/a.py", "import redis.client\n");
        write(root, "application/c.py", "import app.domain.order\nimport flask\n");

        let result = analyzer().validate(root).unwrap();

        let got: Vec<(String, usize, &str)> = result
            .violations
            .iter()
            .map(|v| {
                let rel = v.file.strip_prefix(root).unwrap().display().to_string();
                (rel, v.line, v.reason.as_str())
            })
            .collect();
        assert_eq!(
            got,
            [
                ("application/c.py".to_string(), 2, "application cannot import framework 'flask'"),
                ("domain/a.py".to_string(), 1, "domain cannot import framework 'redis'"),
                ("domain/b.py".to_string(), 2, "domain cannot import framework 'fastapi'"),
                ("domain/b.py".to_string(), 3, "domain cannot import from infrastructure"),
            ]
        );
        assert_eq!(result.files_checked, 3);
        assert_eq!(result.files_skipped, 0);
    }

    #[test]
    fn unclassified_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "scripts/run.py", "import fastapi\nimport app.infrastructure\n");

        let result = analyzer().validate(tmp.path()).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.files_checked, 0);
        assert_eq!(result.files_skipped, 1);
    }

    #[test]
    fn cache_dirs_and_other_suffixes_ignored() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "domain/__pycache__/order.py", "import fastapi\n");
        write(tmp.path(), "domain/notes.txt", "import fastapi\n");

        let result = analyzer().validate(tmp.path()).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.files_checked + result.files_skipped, 0);
    }

    #[test]
    fn exclude_patterns_apply() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "domain/migrations/0001.py", "import django\n");
        write(tmp.path(), "domain/order.py", "import django\n");

        let result = Analyzer::builder()
            .extractor(LineExtractor)
            .exclude("**/migrations/**")
            .build()
            .unwrap()
            .validate(tmp.path())
            .unwrap();
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].file.ends_with("domain/order.py"));
    }

    #[test]
    fn parse_failure_degrades_to_no_edges() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "domain/broken.py", "import fastapi\n!!\n");
        write(tmp.path(), "domain/ok.py", "import flask\n");

        let result = analyzer().validate(tmp.path()).unwrap();
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].file.ends_with("domain/ok.py"));
        assert_eq!(result.files_checked, 2);
        assert_eq!(result.parse_failures.len(), 1);
        assert!(result.parse_failures[0].ends_with("domain/broken.py"));
    }

    #[test]
    fn parallel_matches_sequential() {
        let tmp = TempDir::new().unwrap();
        for i in 0..20 {
            write(
                tmp.path(),
                &format!("domain/m{i:02}.py"),
                "import fastapi\nimport app.presentation.api\n",
            );
        }

        let sequential = analyzer().validate(tmp.path()).unwrap();
        let parallel = Analyzer::builder()
            .extractor(LineExtractor)
            .parallelism(4)
            .build()
            .unwrap()
            .validate(tmp.path())
            .unwrap();
        assert_eq!(sequential.violations, parallel.violations);
        assert_eq!(sequential.violations.len(), 40);
    }

    #[test]
    fn validate_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "domain/a.py", "import celery\nimport pydantic\n");
        let a = analyzer();
        assert_eq!(
            a.validate(tmp.path()).unwrap().violations,
            a.validate(tmp.path()).unwrap().violations
        );
    }

    #[test]
    fn check_source_ignores_unclassified_paths() {
        let a = analyzer();
        assert!(a
            .check_source(Path::new("tools/gen.py"), b"import fastapi\n")
            .is_empty());
        assert_eq!(
            a.check_source(Path::new("src/domain/gen.py"), b"import fastapi\n")
                .len(),
            1
        );
    }

    fn excluding(patterns: &[&str]) -> Analyzer {
        patterns
            .iter()
            .fold(Analyzer::builder().extractor(LineExtractor), |b, p| b.exclude(*p))
            .build()
            .unwrap()
    }

    #[test]
    fn exclude_globs_match_relative_to_root() {
        let a = excluding(&["domain/legacy/*.py", "**/migrations/**"]);
        let root = Path::new(".");
        assert!(a.should_exclude(root, Path::new("./domain/legacy/old.py")));
        assert!(!a.should_exclude(root, Path::new("./domain/legacy/deep/old.py")));
        assert!(a.should_exclude(root, Path::new("./app/migrations/0001.py")));
        assert!(a.should_exclude(Path::new("/p"), Path::new("/p/domain/migrations/0001.py")));
        assert!(!a.should_exclude(root, Path::new("./domain/order.py")));
    }

    #[test]
    fn bare_exclude_names_match_whole_components() {
        let a = excluding(&["order", "tests"]);
        let root = Path::new("/srv/order-service");
        assert!(a.should_exclude(root, Path::new("/srv/order-service/domain/order")));
        assert!(a.should_exclude(root, Path::new("/srv/order-service/tests/domain/a.py")));
        assert!(!a.should_exclude(root, Path::new("/srv/order-service/domain/reorder_svc.py")));
        assert!(!a.should_exclude(root, Path::new("/srv/order-service/domain/order.py")));

        let files = excluding(&["order.py"]);
        assert!(files.should_exclude(root, Path::new("/srv/order-service/domain/order.py")));
        assert!(!files.should_exclude(root, Path::new("/srv/order-service/domain/reorder.py")));
    }

    #[test]
    fn relative_exclude_applies_during_walk() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "domain/legacy/old.py", "import fastapi\n");
        write(tmp.path(), "domain/reorder_svc.py", "import flask\n");

        let result = excluding(&["domain/legacy/*.py", "order"])
            .validate(tmp.path())
            .unwrap();
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].file.ends_with("domain/reorder_svc.py"));
    }

    #[test]
    fn invalid_exclude_is_rejected() {
        let result = Analyzer::builder()
            .extractor(LineExtractor)
            .exclude("domain/[")
            .build();
        assert!(matches!(result, Err(AnalyzerError::InvalidExclude { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_checked() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "shared/real.py", "import fastapi\n");
        fs::create_dir_all(tmp.path().join("domain")).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("shared/real.py"),
            tmp.path().join("domain/order.py"),
        )
        .unwrap();

        let result = analyzer().validate(tmp.path()).unwrap();
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].file.ends_with("domain/order.py"));
        assert_eq!(result.files_skipped, 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_dirs_are_not_entered() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "domain/order.py", "import fastapi\n");
        std::os::unix::fs::symlink(tmp.path().join("domain"), tmp.path().join("domain/loop"))
            .unwrap();

        let result = analyzer().validate(tmp.path()).unwrap();
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn gitignore_respected_outside_git_repo() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".gitignore", "legacy/\n");
        write(tmp.path(), "domain/legacy/old.py", "import fastapi\n");
        write(tmp.path(), "domain/order.py", "import flask\n");

        assert_eq!(analyzer().validate(tmp.path()).unwrap().violations.len(), 2);

        let mut config = LintConfig::default();
        config.analyzer.respect_gitignore = true;
        let result = Analyzer::builder()
            .config(config)
            .extractor(LineExtractor)
            .build()
            .unwrap()
            .validate(tmp.path())
            .unwrap();
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0].file.ends_with("domain/order.py"));
    }

    #[test]
    fn accessors_expose_configured_tables() {
        let a = analyzer();
        assert_eq!(a.classifier().patterns().len(), DEFAULT_LAYERS.len());
        assert_eq!(
            a.rules().forbidden_layers(&Layer::new("infrastructure")),
            [Layer::new("presentation")]
        );
    }
}
