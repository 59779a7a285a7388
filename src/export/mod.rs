//! Output writers for a laid-out [`ManuscriptDocument`].
//!
//! Each writer walks the same element sequence; none of them makes layout
//! decisions of its own. [`DocxExporter`] produces the file editors expect,
//! [`TextExporter`] a proof for reading in a terminal. [`export_to_path`]
//! picks one from the output file's extension.
//!
//! # Example
//!
//! ```no_run
//! use folio::build_manuscript;
//! use folio::export::{DocxExporter, Exporter};
//! use std::fs::File;
//!
//! let doc = build_manuscript("my-story", &Default::default())?;
//! let mut file = File::create("manuscript.docx")?;
//! DocxExporter::new().export(&doc, &mut file)?;
//! # Ok::<(), folio::Error>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::manuscript::ManuscriptDocument;

mod docx;
mod text;

pub use docx::{DocxConfig, DocxExporter};
pub use text::{TextConfig, TextExporter};

/// A writer for one output format.
///
/// Format options live on the exporter value, set through its `with_config`.
pub trait Exporter {
    /// Write the whole manuscript. DOCX is a zip package and needs to seek,
    /// so tests pass a `Cursor<Vec<u8>>` where the CLI passes a file.
    fn export<W: Write + Seek>(&self, doc: &ManuscriptDocument, writer: &mut W) -> Result<()>;
}

/// Output formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Word document, the format editors expect.
    Docx,
    /// Plain-text proof of the layout.
    Text,
}

impl Format {
    /// Pick the format from a path's extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "docx" => Ok(Format::Docx),
            "txt" | "text" => Ok(Format::Text),
            _ => Err(Error::UnsupportedFormat(ext)),
        }
    }
}

/// Write a manuscript to disk in the format implied by the file extension.
pub fn export_to_path<P: AsRef<Path>>(doc: &ManuscriptDocument, path: P) -> Result<Format> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        Format::Docx => DocxExporter::new().export(doc, &mut writer)?,
        Format::Text => TextExporter::new().export(doc, &mut writer)?,
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), ?format, "wrote manuscript");
    Ok(format)
}
