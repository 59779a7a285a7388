//! Emphasis scanner.

use std::ops::Range;

use memchr::{memchr, memchr2, memmem};

/// An emphasis delimiter and the style it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub marker: &'static str,
    pub italic: bool,
    pub bold: bool,
}

/// Delimiters in the order they are tried at each scan position.
pub const DELIMITERS: [Delimiter; 6] = [
    Delimiter {
        marker: "***",
        italic: true,
        bold: true,
    },
    Delimiter {
        marker: "___",
        italic: true,
        bold: true,
    },
    Delimiter {
        marker: "**",
        italic: false,
        bold: true,
    },
    Delimiter {
        marker: "__",
        italic: false,
        bold: true,
    },
    Delimiter {
        marker: "*",
        italic: true,
        bold: false,
    },
    Delimiter {
        marker: "_",
        italic: true,
        bold: false,
    },
];

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    /// Visible text, delimiters removed.
    pub text: String,
    pub italic: bool,
    pub bold: bool,
    /// Byte range of the segment in the parsed input, delimiters included.
    pub source: Range<usize>,
}

impl StyledSegment {
    /// An unstyled segment covering `source` in `input`.
    pub fn plain(input: &str, source: Range<usize>) -> Self {
        Self {
            text: input[source.clone()].to_string(),
            italic: false,
            bold: false,
            source,
        }
    }

    pub fn is_plain(&self) -> bool {
        !self.italic && !self.bold
    }
}

/// Parse a paragraph of emphasis markup into styled segments.
///
/// Segments come back ordered and non-overlapping; their `source` ranges
/// tile the input exactly. Unpaired delimiters stay in plain segments. When
/// nothing matches, the result is a single plain segment holding the whole
/// input.
///
/// # Examples
///
/// ```
/// use folio::markup::parse_inline;
///
/// let segments = parse_inline("She was *not* amused.");
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].text, "not");
/// assert!(segments[1].italic);
/// ```
pub fn parse_inline(text: &str) -> Vec<StyledSegment> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while let Some(offset) = memchr2(b'*', b'_', &bytes[pos..]) {
        let start = pos + offset;
        let Some((delim, end)) = match_at(text, start) else {
            pos = start + 1;
            continue;
        };

        if start > plain_start {
            segments.push(StyledSegment::plain(text, plain_start..start));
        }

        let width = delim.marker.len();
        segments.push(StyledSegment {
            text: text[start + width..end - width].to_string(),
            italic: delim.italic,
            bold: delim.bold,
            source: start..end,
        });

        plain_start = end;
        pos = end;
    }

    if plain_start < text.len() || segments.is_empty() {
        segments.push(StyledSegment::plain(text, plain_start..text.len()));
    }

    segments
}

/// Try each delimiter at `start`; return the first that closes on the same
/// line, with the byte offset just past its closing marker.
fn match_at(text: &str, start: usize) -> Option<(Delimiter, usize)> {
    let bytes = text.as_bytes();
    let rest = &text[start..];

    DELIMITERS.iter().find_map(|delim| {
        if !rest.starts_with(delim.marker) {
            return None;
        }

        let open = start + delim.marker.len();
        let line_end = memchr(b'\n', &bytes[open..]).map_or(text.len(), |i| open + i);

        // At least one character of content before the closer.
        let first = text[open..line_end].chars().next()?;
        let search_from = open + first.len_utf8();

        let close = memmem::find(&bytes[search_from..line_end], delim.marker.as_bytes())?;
        Some((*delim, search_from + close + delim.marker.len()))
    })
}
