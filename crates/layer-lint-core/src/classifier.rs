//! Layer classification: maps module paths to architecture layers.

use std::path::{Component, Path};

use crate::types::{Layer, DEFAULT_LAYERS};

/// Classifies files into layers by directory segment.
///
/// Holds an ordered list of `(segment, layer)` pairs evaluated top to bottom;
/// the first pair whose segment equals one of the path's components wins.
/// When a path nests several layer-named directories, the layer listed first
/// is chosen regardless of nesting depth.
#[derive(Debug, Clone)]
pub struct LayerClassifier {
    patterns: Vec<(String, Layer)>,
}

impl LayerClassifier {
    /// Creates an empty classifier that matches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Appends a `(segment, layer)` pair at the lowest priority.
    #[must_use]
    pub fn with_segment(mut self, segment: impl Into<String>, layer: Layer) -> Self {
        self.patterns.push((segment.into(), layer));
        self
    }

    /// The ordered `(segment, layer)` pairs.
    #[must_use]
    pub fn patterns(&self) -> &[(String, Layer)] {
        &self.patterns
    }

    /// Which layer does this path belong to?
    #[must_use]
    pub fn classify(&self, path: &Path) -> Option<&Layer> {
        self.patterns
            .iter()
            .find(|(segment, _)| has_segment(path, segment))
            .map(|(_, layer)| layer)
    }
}

impl Default for LayerClassifier {
    /// One segment per default layer, named after the layer.
    fn default() -> Self {
        DEFAULT_LAYERS
            .iter()
            .fold(Self::new(), |c, name| c.with_segment(*name, Layer::new(*name)))
    }
}

fn has_segment(path: &Path, segment: &str) -> bool {
    path.components().any(|c| match c {
        Component::Normal(part) => part.to_str() == Some(segment),
        _ => false,
    })
}
