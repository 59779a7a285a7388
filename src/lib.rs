//! # folio
//!
//! Turns a directory of lightweight-markup scene files into a manuscript in
//! standard submission format.
//!
//! ## Features
//!
//! - Reads `project.json` and `scenes/scene-*.md` from a project directory
//! - Strips scene headings and metadata, splits prose into paragraphs
//! - Recognizes scene breaks and `*italic*` / `**bold**` emphasis
//! - Lays out a title page, running header, scene pages and end marker
//! - Writes DOCX, or a plain-text proof for quick review
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio::{AssembleOptions, build_manuscript};
//! use folio::export::export_to_path;
//!
//! let doc = build_manuscript("my-story", &AssembleOptions::default())?;
//! export_to_path(&doc, "manuscript.docx")?;
//! # Ok::<(), folio::Error>(())
//! ```
//!
//! ## Working with Manuscripts
//!
//! The [`ManuscriptDocument`] is a format-agnostic list of layout elements;
//! scenes can be supplied directly instead of read from disk:
//!
//! ```
//! use folio::{ManuscriptStyle, Project, Scene, assemble};
//!
//! let project = Project::new("Salt and Iron", "Ada Byron");
//! let scenes = vec![Scene::new(1, "scene-001.md", "The tide *turned*.")];
//! let doc = assemble(&project, &scenes, &ManuscriptStyle::default());
//!
//! assert_eq!(doc.header.for_page(2), "Byron / Salt Iron / 2");
//! assert_eq!(doc.paragraphs().count(), 1);
//! ```

pub mod error;
pub mod export;
pub mod manuscript;
pub mod markup;
pub mod project;
pub mod scene;
pub(crate) mod util;

pub use error::{Error, Result};
pub use export::{DocxExporter, Exporter, Format, TextExporter, export_to_path};
pub use manuscript::{
    AssembleOptions, Assembler, Block, Element, ManuscriptDocument, ManuscriptStyle, PaperSize,
    assemble, build_manuscript,
};
pub use markup::{StyledSegment, parse_inline};
pub use project::{Contact, Project, Scene, SceneOrder};
pub use scene::{ParagraphUnit, ingest, segment};
pub use util::normalize;
