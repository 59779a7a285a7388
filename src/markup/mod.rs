//! Inline emphasis markup.
//!
//! Scene prose uses a small subset of Markdown emphasis: `*italic*`,
//! `**bold**`, and `***bold italic***`, each with an underscore twin. This
//! module turns a paragraph of that markup into [`StyledSegment`]s that the
//! exporters map onto runs.
//!
//! ## Design Notes
//!
//! The parser is an explicit scanner rather than a regular expression with
//! overlapping alternatives, so the priority order is fixed by the
//! [`DELIMITERS`] table and does not depend on a regex engine's backtracking:
//!
//! - **Leftmost match**: the earliest position where any delimiter opens a
//!   closed span wins
//! - **Priority**: at a given position, longer delimiters are tried first
//! - **Non-greedy**: a span closes at the first matching delimiter after at
//!   least one character of content
//! - **Line bound**: emphasis never crosses a newline
//!
//! Anything that does not pair up is left in the output as literal text.

mod inline;

pub use inline::{DELIMITERS, Delimiter, StyledSegment, parse_inline};
