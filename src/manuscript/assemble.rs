//! Manuscript assembly: title page, scenes, end marker.

use std::path::Path;

use crate::error::Result;
use crate::markup::parse_inline;
use crate::project::{Project, Scene, SceneOrder, discover_scenes};
use crate::scene::{ParagraphUnit, ingest_scene, segment};

use super::{
    Block, Directive, Element, ManuscriptDocument, ManuscriptStyle, Paragraph, RunningHeader,
    author_last_name, compose_title_page, format_word_count, title_keywords,
};

/// Options for building a manuscript from a project directory.
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    pub scene_order: SceneOrder,
    /// Count words in the prose when the project gives no word count.
    pub count_words: bool,
    pub style: ManuscriptStyle,
}

/// Lays out a project and its scenes as a [`ManuscriptDocument`].
///
/// Assembly is a pure function of its inputs; the same project and scenes
/// always produce the same element sequence.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    style: ManuscriptStyle,
    count_words: bool,
}

impl Assembler {
    pub fn new(style: ManuscriptStyle) -> Self {
        Self {
            style,
            count_words: false,
        }
    }

    pub fn with_count_words(mut self, count_words: bool) -> Self {
        self.count_words = count_words;
        self
    }

    pub fn style(&self) -> &ManuscriptStyle {
        &self.style
    }

    /// Build the manuscript. `scenes` must already be in reading order.
    pub fn assemble(&self, project: &Project, scenes: &[Scene]) -> ManuscriptDocument {
        let bodies: Vec<Vec<ParagraphUnit>> = scenes.iter().map(scene_body).collect();

        let word_count = if self.count_words && project.word_count == 0 {
            let counted: u64 = bodies.iter().map(|units| count_words(units)).sum();
            tracing::debug!(words = counted, "counted words in prose");
            counted
        } else {
            project.word_count
        };
        let word_count = format_word_count(word_count);

        let mut elements = compose_title_page(project, &word_count, &self.style);

        for (i, units) in bodies.into_iter().enumerate() {
            if i > 0 {
                elements.push(Element::Directive(Directive::PageBreak));
            }
            for unit in units {
                let block = match unit {
                    ParagraphUnit::SceneBreak => Block::SceneBreak,
                    ParagraphUnit::Text(text) => Block::Paragraph(Paragraph::body(parse_inline(&text))),
                };
                elements.push(Element::Block(block));
            }
        }

        elements.push(Element::Block(Block::EndMarker));

        let header = RunningHeader {
            author_last_name: author_last_name(&project.author).to_string(),
            title_keywords: title_keywords(&project.title),
        };

        tracing::info!(
            title = %project.title,
            scenes = scenes.len(),
            elements = elements.len(),
            header = %header.prefix().trim_end(),
            "assembled manuscript"
        );

        ManuscriptDocument {
            title: project.title.clone(),
            author: project.author.clone(),
            header,
            word_count,
            scene_count: scenes.len(),
            elements,
            style: self.style.clone(),
        }
    }
}

/// Ingest and segment one scene.
fn scene_body(scene: &Scene) -> Vec<ParagraphUnit> {
    let ingested = ingest_scene(&scene.content);
    let units = segment(&ingested.prose);

    tracing::debug!(
        scene = %scene.name,
        ordinal = scene.ordinal,
        heading = ingested.heading.as_deref().unwrap_or(""),
        fields = ingested.fields.len(),
        paragraphs = units.iter().filter(|u| !u.is_scene_break()).count(),
        breaks = units.iter().filter(|u| u.is_scene_break()).count(),
        "ingested scene"
    );
    if ingested.prose.is_empty() {
        tracing::warn!(scene = %scene.name, "scene has no prose");
    }

    units
}

/// Words in a scene's paragraphs, ignoring emphasis markers and breaks.
pub fn count_words(units: &[ParagraphUnit]) -> u64 {
    units
        .iter()
        .filter_map(|unit| match unit {
            ParagraphUnit::Text(text) => Some(text),
            ParagraphUnit::SceneBreak => None,
        })
        .map(|text| {
            parse_inline(text)
                .iter()
                .map(|s| s.text.as_str())
                .collect::<String>()
                .split_whitespace()
                .count() as u64
        })
        .sum()
}

/// Lay out already-loaded scenes with the given style.
///
/// # Examples
///
/// ```
/// use folio::{Project, Scene, ManuscriptStyle, assemble};
///
/// let project = Project::new("The Last Signal", "Ada Byron").with_word_count(2_480);
/// let scenes = vec![
///     Scene::new(1, "scene-001.md", "# Scene 1\n---\nShe walked in."),
///     Scene::new(2, "scene-002.md", "He *left*."),
/// ];
/// let doc = assemble(&project, &scenes, &ManuscriptStyle::default());
///
/// assert_eq!(doc.page_breaks(), 1);
/// assert_eq!(doc.word_count, "about 2,500 words");
/// assert_eq!(doc.header.prefix(), "Byron / Last Signal / ");
/// ```
pub fn assemble(project: &Project, scenes: &[Scene], style: &ManuscriptStyle) -> ManuscriptDocument {
    Assembler::new(style.clone()).assemble(project, scenes)
}

/// Load a project directory and lay it out.
///
/// Fails if `project.json` is missing or malformed, or if a scene file
/// cannot be read. A missing scenes directory yields a manuscript with only
/// the title page and end marker.
pub fn build_manuscript<P: AsRef<Path>>(
    project_dir: P,
    options: &AssembleOptions,
) -> Result<ManuscriptDocument> {
    let project_dir = project_dir.as_ref();
    let project = Project::load(project_dir)?;
    let scenes = discover_scenes(project_dir, options.scene_order)?;

    Ok(Assembler::new(options.style.clone())
        .with_count_words(options.count_words)
        .assemble(&project, &scenes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::new("The Last Signal", "Ada Byron").with_word_count(4_321)
    }

    fn body(doc: &ManuscriptDocument) -> &[Element] {
        // heading + 12 spacers + title + byline + 2 spacers
        &doc.elements[17..]
    }

    #[test]
    fn test_no_scenes_gives_title_page_and_end_marker() {
        let doc = assemble(&project(), &[], &ManuscriptStyle::default());
        assert_eq!(doc.page_breaks(), 0);
        assert_eq!(doc.scene_count, 0);
        assert_eq!(body(&doc), &[Element::Block(Block::EndMarker)]);
    }

    #[test]
    fn test_page_break_between_scenes_only() {
        let scenes: Vec<Scene> = (1..=3)
            .map(|i| Scene::new(i, format!("scene-00{i}.md"), format!("Scene {i} text.")))
            .collect();
        let doc = assemble(&project(), &scenes, &ManuscriptStyle::default());

        assert_eq!(doc.page_breaks(), 2);
        let body = body(&doc);
        assert!(matches!(body[0], Element::Block(Block::Paragraph(_))));
        assert_eq!(body[1], Element::Directive(Directive::PageBreak));
        assert!(matches!(body[2], Element::Block(Block::Paragraph(_))));
        assert_eq!(body[3], Element::Directive(Directive::PageBreak));
        assert!(matches!(body[4], Element::Block(Block::Paragraph(_))));
        assert_eq!(body[5], Element::Block(Block::EndMarker));
    }

    #[test]
    fn test_empty_scene_still_gets_its_page() {
        let scenes = vec![
            Scene::new(1, "scene-001.md", "One."),
            Scene::new(2, "scene-002.md", "# Scene 2\n---\n"),
            Scene::new(3, "scene-003.md", "Three."),
        ];
        let doc = assemble(&project(), &scenes, &ManuscriptStyle::default());
        assert_eq!(doc.page_breaks(), 2);
        assert_eq!(doc.paragraphs().count(), 2);
    }

    #[test]
    fn test_scene_breaks_and_emphasis() {
        let scenes = vec![Scene::new(
            1,
            "scene-001.md",
            "# Scene 1\n**POV**: Alice\n---\nShe *ran*.\n\n* * *\n\n**Later**, she slept.",
        )];
        let doc = assemble(&project(), &scenes, &ManuscriptStyle::default());
        let body = body(&doc);

        assert_eq!(body.len(), 4);
        assert_eq!(body[1], Element::Block(Block::SceneBreak));
        assert_eq!(body[3], Element::Block(Block::EndMarker));

        let Element::Block(Block::Paragraph(first)) = &body[0] else {
            panic!("expected paragraph, got {:?}", body[0]);
        };
        assert!(first.indented);
        assert_eq!(first.text(), "She ran.");
        assert!(first.segments[1].italic);

        let Element::Block(Block::Paragraph(last)) = &body[2] else {
            panic!("expected paragraph, got {:?}", body[2]);
        };
        assert_eq!(last.text(), "Later, she slept.");
        assert!(last.segments[0].bold);
    }

    #[test]
    fn test_header_strings() {
        let doc = assemble(&project(), &[], &ManuscriptStyle::default());
        assert_eq!(doc.header.author_last_name, "Byron");
        assert_eq!(doc.header.title_keywords, "Last Signal");
        assert_eq!(doc.header.for_page(3), "Byron / Last Signal / 3");
        assert_eq!(doc.word_count, "about 4,300 words");
    }

    #[test]
    fn test_count_words_when_missing() {
        let project = Project::new("T", "A");
        let scenes = vec![
            Scene::new(1, "scene-001.md", "One *two* three.\n\n#\n\nFour."),
            Scene::new(2, "scene-002.md", "**Five** six"),
        ];
        let units: Vec<_> = scenes.iter().map(scene_body).collect();
        assert_eq!(units.iter().map(|u| count_words(u)).sum::<u64>(), 6);

        let doc = Assembler::default()
            .with_count_words(true)
            .assemble(&project, &scenes);
        assert_eq!(doc.word_count, "about 0 words");

        let long: String = "word ".repeat(260);
        let doc = Assembler::default()
            .with_count_words(true)
            .assemble(&project, &[Scene::new(1, "scene-001.md", long)]);
        assert_eq!(doc.word_count, "about 300 words");
    }

    #[test]
    fn test_declared_word_count_wins_over_counting() {
        let doc = Assembler::default()
            .with_count_words(true)
            .assemble(&project(), &[Scene::new(1, "scene-001.md", "Few words.")]);
        assert_eq!(doc.word_count, "about 4,300 words");
    }

    #[test]
    fn test_custom_spacers_shift_body() {
        let style = ManuscriptStyle::default().with_title_spacer_count(0);
        let doc = assemble(&project(), &[Scene::new(1, "scene-001.md", "Hi.")], &style);
        assert!(matches!(doc.elements[3], Element::Block(Block::Spacer)));
        assert!(matches!(doc.elements[5], Element::Block(Block::Paragraph(_))));
    }
}
