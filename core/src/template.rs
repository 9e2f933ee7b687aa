//! Figure Templates
//!
//! A bonefile is a small text template. Placeholders for the eyes, tongue
//! and thought connector are substituted, directive and comment lines are
//! dropped, and the body ends at the `EOB` marker:
//!
//! ```text
//! ## a comment
//! $ballonOffset = 6
//! $the_bone = <<EOB;
//!   $thoughts
//!  ( $eyes )
//! EOB
//! ```

use tracing::trace;

/// Line that opens the template body
const BODY_START: &str = "$the_bone = <<EOB";
/// Prefix of the line that closes the template body
const BODY_END: &str = "EOB";
/// Prefix of comment lines
const COMMENT: &str = "##";
/// Directive setting the balloon offset
const OFFSET_DIRECTIVE: &str = "$ballonOffset = ";

/// Values substituted into a template
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholders {
    pub eyes: String,
    pub tongue: String,
    pub thoughts: char,
}

/// A parsed figure ready to be drawn below the balloon
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Figure {
    /// Figure text with placeholders substituted
    pub text: String,
    /// Columns the balloon is shifted right relative to the figure
    pub balloon_offset: usize,
}

/// Replace escapes and placeholders in one left-to-right pass
pub fn substitute(src: &str, placeholders: &Placeholders) -> String {
    let thoughts = placeholders.thoughts.to_string();
    let table: [(&str, &str); 9] = [
        ("\\\\", "\\"),
        ("\\@", "@"),
        ("\\$", "$"),
        ("$eyes", &placeholders.eyes),
        ("${eyes}", &placeholders.eyes),
        ("$tongue", &placeholders.tongue),
        ("${tongue}", &placeholders.tongue),
        ("$thoughts", &thoughts),
        ("${thoughts}", &thoughts),
    ];

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    'scan: while let Some(ch) = rest.chars().next() {
        if ch == '\\' || ch == '$' {
            for (token, value) in &table {
                if let Some(tail) = rest.strip_prefix(token) {
                    out.push_str(value);
                    rest = tail;
                    continue 'scan;
                }
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// Parse a bonefile into a [`Figure`]
pub fn parse(src: &str, placeholders: &Placeholders) -> Figure {
    let substituted = substitute(src, placeholders);

    let mut balloon_offset = 0;
    let mut body = Vec::new();
    for line in substituted.split('\n') {
        if line.contains(BODY_START) || line.starts_with(COMMENT) {
            continue;
        }

        if let Some(at) = line.find(OFFSET_DIRECTIVE) {
            let value = line[at + OFFSET_DIRECTIVE.len()..].trim();
            balloon_offset = value.parse().unwrap_or(0);
            trace!(balloon_offset, "Balloon offset directive");
            continue;
        }

        if line.starts_with(BODY_END) {
            break;
        }

        body.push(line);
    }

    Figure {
        text: body.join("\n"),
        balloon_offset,
    }
}
