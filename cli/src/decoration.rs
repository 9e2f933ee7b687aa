//! Decoration Writer
//!
//! Colors rendered text with xterm-256 foreground escapes. Each grapheme is
//! colored by its position (`base + row + column`) so the output shows
//! diagonal stripes; shifting `base` between frames makes the colors flow.
//! Whitespace is never colored.

use std::fmt::{self, Write};

use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::Command;
use unicode_segmentation::UnicodeSegmentation;

use bonesay_core::OutputStyle;

/// Seven-step rainbow in the 256-color palette
const RAINBOW: [u8; 7] = [196, 208, 226, 46, 51, 21, 201];

/// Aurora wave frequency per color step
const AURORA_FREQUENCY: f64 = 0.1;

/// How graphemes are colored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorStyle {
    #[default]
    Plain,
    Rainbow,
    Aurora,
}

impl From<OutputStyle> for ColorStyle {
    fn from(style: OutputStyle) -> Self {
        match style {
            OutputStyle::Plain => Self::Plain,
            OutputStyle::Rainbow => Self::Rainbow,
            OutputStyle::Aurora => Self::Aurora,
        }
    }
}

/// Text decoration settings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoration {
    pub style: ColorStyle,
    pub bold: bool,
    /// Color-cycle base
    pub base: usize,
}

impl Decoration {
    pub fn new(style: ColorStyle, bold: bool) -> Self {
        Self {
            style,
            bold,
            base: 0,
        }
    }

    /// Aurora coloring starting at `base`, as used by the animation
    pub fn aurora(base: usize, bold: bool) -> Self {
        Self {
            style: ColorStyle::Aurora,
            bold,
            base,
        }
    }

    pub fn set_base(&mut self, base: usize) {
        self.base = base;
    }

    fn color(&self, index: usize) -> Option<Color> {
        match self.style {
            ColorStyle::Plain => None,
            ColorStyle::Rainbow => Some(Color::AnsiValue(RAINBOW[index % RAINBOW.len()])),
            ColorStyle::Aurora => Some(aurora(index)),
        }
    }

    /// Write one line (no `\n`) whose first grapheme sits on `row`
    pub fn paint_line(&self, line: &str, row: usize, out: &mut impl Write) -> fmt::Result {
        if self.style == ColorStyle::Plain && !self.bold {
            return out.write_str(line);
        }
        if line.is_empty() {
            return Ok(());
        }

        if self.bold {
            SetAttribute(Attribute::Bold).write_ansi(out)?;
        }
        let mut colored = false;
        for (column, grapheme) in line.graphemes(true).enumerate() {
            let color = self.color(self.base + row + column);
            match color {
                Some(color) if !grapheme.trim().is_empty() => {
                    SetForegroundColor(color).write_ansi(out)?;
                    colored = true;
                }
                _ => {}
            }
            out.write_str(grapheme)?;
        }
        if colored {
            ResetColor.write_ansi(out)?;
        }
        if self.bold {
            SetAttribute(Attribute::Reset).write_ansi(out)?;
        }
        Ok(())
    }

    /// Decorate multi-line text, keeping its newlines
    pub fn paint(&self, text: &str) -> Result<String, fmt::Error> {
        let mut out = String::with_capacity(text.len());
        for (row, line) in text.split('\n').enumerate() {
            if row > 0 {
                out.push('\n');
            }
            self.paint_line(line, row, &mut out)?;
        }
        Ok(out)
    }
}

/// Map a color step onto the 6x6x6 cube with three phase-shifted waves
pub fn aurora(index: usize) -> Color {
    let t = AURORA_FREQUENCY * index as f64;
    let level = |phase: f64| -> u8 {
        let value = (t + phase).sin() * 127.0 + 128.0;
        (value * 6.0 / 256.0) as u8
    };
    let third = std::f64::consts::TAU / 3.0;
    let (r, g, b) = (level(0.0), level(third), level(2.0 * third));
    Color::AnsiValue(16 + 36 * r + 6 * g + b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_is_untouched() {
        let text = " ____ \n< hi >\n ---- ";
        assert_eq!(Decoration::default().paint(text).unwrap(), text);
    }

    #[test]
    fn test_bold_wraps_non_empty_lines() {
        let decoration = Decoration::new(ColorStyle::Plain, true);
        assert_eq!(decoration.paint("ab\n").unwrap(), "\x1b[1mab\x1b[0m\n");
    }

    #[test]
    fn test_rainbow_skips_whitespace() {
        let decoration = Decoration::new(ColorStyle::Rainbow, false);
        let got = decoration.paint("a b").unwrap();
        assert_eq!(got, "\x1b[38;5;196ma \x1b[38;5;226mb\x1b[0m");
    }

    #[test]
    fn test_rows_shift_the_cycle() {
        let decoration = Decoration::new(ColorStyle::Rainbow, false);
        let got = decoration.paint("a\na").unwrap();
        assert_eq!(got, "\x1b[38;5;196ma\x1b[0m\n\x1b[38;5;208ma\x1b[0m");
    }

    #[test]
    fn test_combining_cluster_gets_one_escape() {
        let decoration = Decoration::new(ColorStyle::Rainbow, false);
        let got = decoration.paint("e\u{301}").unwrap();
        assert_eq!(got, "\x1b[38;5;196me\u{301}\x1b[0m");
    }

    #[test]
    fn test_aurora_stays_in_color_cube() {
        for index in 0..500 {
            match aurora(index) {
                Color::AnsiValue(value) => assert!((16..=231).contains(&value)),
                other => panic!("unexpected color {other:?}"),
            }
        }
    }

    #[test]
    fn test_base_changes_aurora_output() {
        let a = Decoration::aurora(0, false).paint("xxxx").unwrap();
        let b = Decoration::aurora(70, false).paint("xxxx").unwrap();
        assert_ne!(a, b);
    }
}
