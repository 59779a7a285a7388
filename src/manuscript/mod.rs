//! Manuscript layout model.
//!
//! A [`ManuscriptDocument`] is the hand-off point between the formatting
//! engine and the exporters: an ordered list of [`Element`]s (styled blocks
//! and page-break directives) plus the strings the running header needs.
//! Nothing here knows about DOCX or any other output format.

mod assemble;
mod style;
mod title;

use std::fmt;

use crate::markup::StyledSegment;

pub use assemble::{AssembleOptions, Assembler, assemble, build_manuscript, count_words};
pub use style::{
    BYLINE_SPACER_COUNT, LineSpacing, MARGIN_TWIPS, ManuscriptStyle, PaperSize,
    TITLE_SPACER_COUNT, TWIPS_PER_INCH,
};
pub use title::{
    NOVELLA_THRESHOLD, STOPWORDS, author_last_name, compose_title_page, format_word_count,
    round_word_count, title_keywords,
};

/// Horizontal alignment of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// A body paragraph of scene prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub segments: Vec<StyledSegment>,
    /// First-line indent.
    pub indented: bool,
    pub alignment: Alignment,
}

impl Paragraph {
    /// A regular prose paragraph: indented, left aligned.
    pub fn body(segments: Vec<StyledSegment>) -> Self {
        Self {
            segments,
            indented: true,
            alignment: Alignment::Left,
        }
    }

    /// Visible text with emphasis markers removed.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A unit of styled content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// First title-page line: the author's name on the left and the rounded
    /// word count on the right.
    Heading { author: String, word_count: String },
    /// One line of the contact block under the author's name.
    ContactLine(String),
    /// An empty double-spaced line on the title page.
    Spacer,
    /// Centered story title.
    TitleLine(String),
    /// Centered `by <pen name>` line.
    BylineLine(String),
    Paragraph(Paragraph),
    /// Centered break glyph between sections of a scene.
    SceneBreak,
    /// Centered end marker after the last scene.
    EndMarker,
}

/// A non-content layout instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    PageBreak,
}

/// An entry in the manuscript sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Block(Block),
    Directive(Directive),
}

impl From<Block> for Element {
    fn from(block: Block) -> Self {
        Element::Block(block)
    }
}

impl From<Directive> for Element {
    fn from(directive: Directive) -> Self {
        Element::Directive(directive)
    }
}

/// Strings for the running header shown on every page but the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningHeader {
    pub author_last_name: String,
    pub title_keywords: String,
}

impl RunningHeader {
    /// Header text up to, and not including, the page number.
    pub fn prefix(&self) -> String {
        format!("{} / {} / ", self.author_last_name, self.title_keywords)
    }

    /// Full header text for a given page.
    pub fn for_page(&self, page: u32) -> String {
        format!("{}{page}", self.prefix())
    }
}

impl fmt::Display for RunningHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / #", self.author_last_name, self.title_keywords)
    }
}

/// A fully laid-out manuscript, ready for an exporter.
#[derive(Debug, Clone, PartialEq)]
pub struct ManuscriptDocument {
    pub title: String,
    pub author: String,
    pub header: RunningHeader,
    /// Rounded word count as shown on the title page.
    pub word_count: String,
    /// Number of scenes that went into the body.
    pub scene_count: usize,
    pub elements: Vec<Element>,
    pub style: ManuscriptStyle,
}

impl ManuscriptDocument {
    /// All blocks, skipping directives.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.elements.iter().filter_map(|e| match e {
            Element::Block(block) => Some(block),
            Element::Directive(_) => None,
        })
    }

    /// Body paragraphs in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn page_breaks(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, Element::Directive(Directive::PageBreak)))
            .count()
    }
}
