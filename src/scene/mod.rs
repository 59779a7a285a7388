//! Scene file handling: metadata stripping and paragraph segmentation.
//!
//! A scene file is Markdown-ish prose with an optional header:
//!
//! ```text
//! # Scene 3
//! **POV**: Alice
//! **Location**: The lighthouse
//! ---
//! She walked in.
//!
//! * * *
//!
//! Hours later, the lamp went dark.
//! ```
//!
//! [`ingest`] drops the header and returns the prose; [`segment`] splits that
//! prose into paragraphs and scene breaks.

mod ingest;
mod segment;

pub use ingest::{
    HEADER_SEPARATOR, IngestedScene, SCENE_HEADING_PREFIX, ingest, ingest_scene,
};
pub use segment::{ParagraphUnit, SCENE_BREAK_MARKERS, segment};
