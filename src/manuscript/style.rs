//! Manuscript style configuration.

/// Twentieths of a point per inch, the unit Word uses for page geometry.
pub const TWIPS_PER_INCH: u32 = 1440;

/// Page margins on every side. Fixed by the manuscript format.
pub const MARGIN_TWIPS: u32 = TWIPS_PER_INCH;

/// Blank double-spaced lines between the contact block and the title.
///
/// Twelve puts the title roughly a third of the way down a US Letter page
/// with 1-inch margins; shorter or taller paper may want a different count.
pub const TITLE_SPACER_COUNT: usize = 12;

/// Blank lines between the byline and the first scene.
pub const BYLINE_SPACER_COUNT: usize = 2;

/// Paper size of the output document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaperSize {
    #[default]
    Letter,
    A4,
}

impl PaperSize {
    /// Page width and height in twips.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            PaperSize::Letter => (12240, 15840),
            PaperSize::A4 => (11906, 16838),
        }
    }

    /// Width between the margins, in twips.
    pub fn text_width(self) -> u32 {
        self.dimensions().0 - 2 * MARGIN_TWIPS
    }
}

/// Line spacing for every paragraph of the manuscript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineSpacing {
    Single,
    #[default]
    Double,
}

impl LineSpacing {
    /// Spacing in 240ths of a line.
    pub fn line_240ths(self) -> u32 {
        match self {
            LineSpacing::Single => 240,
            LineSpacing::Double => 480,
        }
    }
}

/// Fixed typographic choices for a manuscript.
///
/// The defaults are the standard submission format: 12 pt Times New Roman,
/// double spaced, half-inch paragraph indent, US Letter.
#[derive(Debug, Clone, PartialEq)]
pub struct ManuscriptStyle {
    pub font_family: String,
    pub font_size_pt: u32,
    pub line_spacing: LineSpacing,
    /// First-line indent of body paragraphs, in inches.
    pub first_line_indent: f32,
    pub paper: PaperSize,
    pub title_spacer_count: usize,
    pub byline_spacer_count: usize,
    /// Glyph printed for every scene break, whatever marker the prose used.
    pub scene_break_glyph: String,
    pub end_marker: String,
}

impl Default for ManuscriptStyle {
    fn default() -> Self {
        Self {
            font_family: "Times New Roman".to_string(),
            font_size_pt: 12,
            line_spacing: LineSpacing::Double,
            first_line_indent: 0.5,
            paper: PaperSize::Letter,
            title_spacer_count: TITLE_SPACER_COUNT,
            byline_spacer_count: BYLINE_SPACER_COUNT,
            scene_break_glyph: "#".to_string(),
            end_marker: "END".to_string(),
        }
    }
}

impl ManuscriptStyle {
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.paper = paper;
        self
    }

    pub fn with_title_spacer_count(mut self, count: usize) -> Self {
        self.title_spacer_count = count;
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size_pt: u32) -> Self {
        self.font_family = family.into();
        self.font_size_pt = size_pt;
        self
    }

    /// Font size in half-points.
    pub fn font_half_points(&self) -> u32 {
        self.font_size_pt * 2
    }

    /// First-line indent in twips.
    pub fn first_line_indent_twips(&self) -> u32 {
        (self.first_line_indent * TWIPS_PER_INCH as f32).round() as u32
    }
}
