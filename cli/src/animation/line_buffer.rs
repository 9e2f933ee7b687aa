//! Grapheme-Aware Line Buffer
//!
//! Figure lines are sliced by grapheme cluster so partial reveals never cut
//! a combining mark off its base or halve a wide glyph.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One line of figure text split into grapheme clusters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterLine {
    raw: String,
    /// Byte offset of every cluster start, plus `raw.len()` at the end
    boundaries: Vec<usize>,
}

impl ClusterLine {
    pub fn new(raw: &str) -> Self {
        let mut boundaries: Vec<usize> = raw.grapheme_indices(true).map(|(at, _)| at).collect();
        boundaries.push(raw.len());
        Self {
            raw: raw.to_string(),
            boundaries,
        }
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Display width in terminal columns
    pub fn width(&self) -> usize {
        self.raw.width()
    }

    /// Clusters `[i, j)` as a string
    ///
    /// An empty line always yields `""`. Out-of-range bounds are clamped.
    pub fn slice(&self, i: usize, j: usize) -> &str {
        if self.is_empty() {
            return "";
        }
        let j = j.min(self.len());
        let i = i.min(j);
        &self.raw[self.boundaries[i]..self.boundaries[j]]
    }
}

/// Split text on `\n` into cluster lines
pub fn split_lines(text: &str) -> Vec<ClusterLine> {
    text.split('\n').map(ClusterLine::new).collect()
}
