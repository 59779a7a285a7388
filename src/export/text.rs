//! Plain-text exporter.
//!
//! Produces a quick proof of the manuscript layout for reading in a terminal
//! or diffing between runs. Page breaks become form feeds, centered blocks
//! are padded to the line width, and emphasis is shown with `_italic_` and
//! `**bold**` markers.

use std::io::{Seek, Write};

use crate::error::Result;
use crate::manuscript::{Block, Directive, Element, ManuscriptDocument, Paragraph};

use super::Exporter;

/// Width used for centering when no line width is configured.
const DEFAULT_WIDTH: usize = 60;

/// Configuration for plain-text export.
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Line width for wrapping body paragraphs (0 = no wrapping).
    pub line_width: usize,
}

/// Exporter for plain-text proofs.
#[derive(Debug, Clone, Default)]
pub struct TextExporter {
    config: TextConfig,
}

impl TextExporter {
    /// Create a new TextExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: TextConfig) -> Self {
        self.config = config;
        self
    }

    /// Render the manuscript to a string.
    pub fn render(&self, doc: &ManuscriptDocument) -> String {
        let width = if self.config.line_width > 0 {
            self.config.line_width
        } else {
            DEFAULT_WIDTH
        };
        let style = &doc.style;
        let mut out = String::new();

        for element in &doc.elements {
            match element {
                Element::Directive(Directive::PageBreak) => out.push_str("\u{0C}\n"),
                Element::Block(block) => match block {
                    Block::Heading { author, word_count } => {
                        let used = author.chars().count() + word_count.chars().count();
                        let gap = width.saturating_sub(used).max(1);
                        out.push_str(&format!("{author}{}{word_count}\n", " ".repeat(gap)));
                    }
                    Block::ContactLine(line) => push_line(&mut out, line),
                    Block::Spacer => out.push('\n'),
                    Block::TitleLine(text) | Block::BylineLine(text) => {
                        push_line(&mut out, &center(text, width))
                    }
                    Block::Paragraph(paragraph) => {
                        self.push_paragraph(&mut out, paragraph, width);
                        out.push('\n');
                    }
                    Block::SceneBreak => {
                        push_line(&mut out, &center(&style.scene_break_glyph, width));
                        out.push('\n');
                    }
                    Block::EndMarker => push_line(&mut out, &center(&style.end_marker, width)),
                },
            }
        }

        out
    }

    fn push_paragraph(&self, out: &mut String, paragraph: &Paragraph, width: usize) {
        let indent = if paragraph.indented { "     " } else { "" };
        let text = format!("{indent}{}", marked_text(paragraph));

        if self.config.line_width == 0 {
            push_line(out, &text);
            return;
        }

        for line in text.split('\n') {
            for wrapped in wrap(line, width) {
                push_line(out, &wrapped);
            }
        }
    }
}

impl Exporter for TextExporter {
    fn export<W: Write + Seek>(&self, doc: &ManuscriptDocument, writer: &mut W) -> Result<()> {
        writer.write_all(self.render(doc).as_bytes())?;
        Ok(())
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count()) / 2;
    format!("{}{text}", " ".repeat(pad))
}

/// Paragraph text with emphasis shown as `_italic_` and `**bold**`.
fn marked_text(paragraph: &Paragraph) -> String {
    paragraph
        .segments
        .iter()
        .map(|s| match (s.italic, s.bold) {
            (true, true) => format!("**_{}_**", s.text),
            (false, true) => format!("**{}**", s.text),
            (true, false) => format!("_{}_", s.text),
            (false, false) => s.text.clone(),
        })
        .collect()
}

/// Greedy word wrap. Leading indentation is kept on the first line.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let indent_len = line.len() - line.trim_start().len();
    let mut lines = Vec::new();
    let mut current = line[..indent_len].to_string();
    let mut current_len = current.chars().count();
    let mut line_has_word = false;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        if line_has_word && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
            line_has_word = false;
        }
        if line_has_word {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
        line_has_word = true;
    }

    if line_has_word || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manuscript::{ManuscriptStyle, assemble};
    use crate::project::{Project, Scene};

    #[test]
    fn test_render_layout() {
        let project = Project::new("The Last Signal", "Ada Byron").with_word_count(1_000);
        let scenes = vec![
            Scene::new(1, "scene-001.md", "She *ran*.\n\n***\n\nShe **stopped**."),
            Scene::new(2, "scene-002.md", "Dawn."),
        ];
        let doc = assemble(&project, &scenes, &ManuscriptStyle::default());
        let text = TextExporter::new().render(&doc);

        let first = text.lines().next().unwrap();
        assert!(first.starts_with("Ada Byron"));
        assert!(first.ends_with("about 1,000 words"));
        assert_eq!(first.chars().count(), DEFAULT_WIDTH);

        assert!(text.contains("     She _ran_.\n"));
        assert!(text.contains("     She **stopped**.\n"));
        assert_eq!(text.matches('\u{0C}').count(), 1);
        assert!(text.contains(&format!("{}#\n", " ".repeat(29))));
        assert!(text.trim_end().ends_with("END"));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("     one two three", 12), vec!["     one two", "three"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }

    #[test]
    fn test_wrapped_export() {
        let project = Project::new("T", "A");
        let scenes = vec![Scene::new(1, "scene-001.md", "aaa bbb ccc ddd")];
        let doc = assemble(&project, &scenes, &ManuscriptStyle::default());
        let text = TextExporter::new()
            .with_config(TextConfig { line_width: 13 })
            .render(&doc);
        assert!(text.contains("     aaa bbb\nccc ddd\n"));
    }
}
