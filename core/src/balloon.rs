//! Balloon Layout
//!
//! Turns a phrase into the bordered speech (or thought) bubble drawn above a
//! figure. The phrase is optionally word-wrapped, split into rows, and each
//! row is framed with a border pair chosen by its position in the bubble.
//!
//! ```text
//!   ________
//!  / first  \
//!  | middle |
//!  \ last   /
//!   --------
//! ```

use textwrap::{Options, WordSeparator, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

/// Replacement for a tab character in the phrase
const TAB_EXPANSION: &str = "        ";

/// Left and right glyphs framing one balloon row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderPair {
    pub left: char,
    pub right: char,
}

impl BorderPair {
    const fn new(left: char, right: char) -> Self {
        Self { left, right }
    }
}

/// The four border pairs of a balloon
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderSet {
    /// First row of a multi-row balloon
    pub first: BorderPair,
    /// Interior rows
    pub middle: BorderPair,
    /// Last row of a multi-row balloon
    pub last: BorderPair,
    /// The row of a single-row balloon
    pub only: BorderPair,
}

impl BorderSet {
    /// Speech balloon borders
    pub const SPEECH: Self = Self {
        first: BorderPair::new('/', '\\'),
        middle: BorderPair::new('|', '|'),
        last: BorderPair::new('\\', '/'),
        only: BorderPair::new('<', '>'),
    };

    /// Thought balloon borders
    pub const THOUGHT: Self = Self {
        first: BorderPair::new('(', ')'),
        middle: BorderPair::new('(', ')'),
        last: BorderPair::new('(', ')'),
        only: BorderPair::new('(', ')'),
    };

    /// Select the border set for the given mode
    pub const fn for_mode(thinking: bool) -> Self {
        if thinking {
            Self::THOUGHT
        } else {
            Self::SPEECH
        }
    }

    /// Border pair for row `index` of a balloon with `count` rows
    pub fn pair_for(&self, index: usize, count: usize) -> BorderPair {
        if count == 1 {
            self.only
        } else if index == 0 {
            self.first
        } else if index + 1 == count {
            self.last
        } else {
            self.middle
        }
    }
}

/// Layout parameters for a balloon
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalloonLayout {
    /// Wrap column (must be positive)
    pub width: usize,
    /// Reflow the phrase at `width`
    pub word_wrap: bool,
    /// Use thought borders instead of speech borders
    pub thinking: bool,
    /// Columns the balloon is shifted right relative to the figure
    pub offset: usize,
}

impl Default for BalloonLayout {
    fn default() -> Self {
        Self {
            width: 40,
            word_wrap: true,
            thinking: false,
            offset: 0,
        }
    }
}

/// One row of balloon text with its display width
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub width: usize,
}

impl Line {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            width: UnicodeWidthStr::width(text),
        }
    }
}

impl BalloonLayout {
    /// Expand tabs and, when enabled, reflow the phrase
    pub fn canonicalize(&self, phrase: &str) -> String {
        let phrase = phrase.replace('\t', TAB_EXPANSION);
        if !self.word_wrap {
            return phrase;
        }

        let mut rows: Vec<String> = Vec::new();
        for paragraph in phrase.split('\n') {
            let options = Options::new(self.width)
                .break_words(false)
                .word_separator(WordSeparator::AsciiSpace)
                .wrap_algorithm(WrapAlgorithm::FirstFit);
            let start = rows.len();
            rows.extend(textwrap::wrap(paragraph, options).into_iter().map(String::from));

            // wrapping drops the paragraph's trailing spaces; keep what still fits
            let trailing = paragraph.len() - paragraph.trim_end_matches(' ').len();
            if let Some(last) = rows[start..].last_mut() {
                let kept = last.trim_end_matches(' ').len();
                last.truncate(kept);
                let room = self.width.saturating_sub(last.width());
                last.push_str(&" ".repeat(trailing.min(room)));
            }
        }
        rows.join("\n")
    }

    /// Split the canonical phrase into balloon rows
    pub fn lines(&self, phrase: &str) -> Vec<Line> {
        self.canonicalize(phrase).split('\n').map(Line::new).collect()
    }

    /// Widest row, capped at the wrap column when wrapping is on
    pub fn max_width(&self, lines: &[Line]) -> usize {
        let mut max_width = 0;
        for line in lines {
            max_width = max_width.max(line.width);
            if self.word_wrap && max_width > self.width {
                return self.width;
            }
        }
        max_width
    }

    /// Render the balloon for `phrase`
    pub fn render(&self, phrase: &str) -> String {
        let lines = self.lines(phrase);
        let max_width = self.max_width(&lines);
        self.write_balloon(&lines, max_width)
    }

    fn write_balloon(&self, lines: &[Line], max_width: usize) -> String {
        let margin = " ".repeat(self.offset);
        let row_margin = " ".repeat(self.offset.saturating_sub(1));
        let borders = BorderSet::for_mode(self.thinking);

        let mut buf = String::new();
        buf.push_str(&margin);
        buf.push_str(&"_".repeat(max_width + 2));
        buf.push_str(" \n");

        let count = lines.len();
        for (index, line) in lines.iter().enumerate() {
            let pair = borders.pair_for(index, count);
            buf.push_str(&row_margin);
            buf.push(pair.left);
            buf.push(' ');
            buf.push_str(&line.text);
            // A lone row is written as-is; only multi-row balloons square off.
            if count > 1 {
                buf.push_str(&" ".repeat(max_width.saturating_sub(line.width)));
            }
            buf.push(' ');
            buf.push(pair.right);
            buf.push('\n');
        }

        buf.push_str(&margin);
        buf.push_str(&"-".repeat(max_width + 2));
        buf.push_str(" \n");
        buf
    }
}

/// Render a balloon for `phrase` with the given layout
pub fn render_balloon(phrase: &str, layout: &BalloonLayout) -> String {
    layout.render(phrase)
}
