//! Scene file discovery and ordering.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::util::{decode_text, unify_line_endings};

/// Directory holding scene files, relative to the project directory.
pub const SCENES_DIR: &str = "scenes";

const SCENE_PREFIX: &str = "scene-";
const SCENE_SUFFIX: &str = ".md";

/// One scene file, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// 1-based position in reading order.
    pub ordinal: usize,
    /// File name, e.g. `scene-001.md`.
    pub name: String,
    /// Raw file content with line endings unified to `\n`.
    pub content: String,
}

impl Scene {
    pub fn new(ordinal: usize, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            ordinal,
            name: name.into(),
            content: content.into(),
        }
    }
}

/// How scene file names map to reading order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneOrder {
    /// Plain string sort. `scene-10.md` comes before `scene-2.md` unless the
    /// numbers are zero-padded.
    #[default]
    Lexicographic,
    /// Sort by the number after `scene-`; names without one sort last.
    Numeric,
}

impl SceneOrder {
    /// Sort scene file names into reading order.
    pub fn sort(self, names: &mut [String]) {
        match self {
            SceneOrder::Lexicographic => names.sort(),
            SceneOrder::Numeric => names.sort_by(|a, b| {
                let na = scene_number(a).unwrap_or(u64::MAX);
                let nb = scene_number(b).unwrap_or(u64::MAX);
                na.cmp(&nb).then_with(|| a.cmp(b))
            }),
        }
    }
}

/// Whether a file name follows the `scene-*.md` convention.
pub fn is_scene_file(name: &str) -> bool {
    name.starts_with(SCENE_PREFIX) && name.ends_with(SCENE_SUFFIX)
}

/// The first run of digits after the `scene-` prefix.
///
/// ```
/// use folio::project::scene_number;
///
/// assert_eq!(scene_number("scene-010.md"), Some(10));
/// assert_eq!(scene_number("scene-2b.md"), Some(2));
/// assert_eq!(scene_number("scene-intro.md"), None);
/// ```
pub fn scene_number(name: &str) -> Option<u64> {
    let rest = name.strip_prefix(SCENE_PREFIX)?;
    let start = rest.find(|c: char| c.is_ascii_digit())?;
    let digits = &rest[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Read every scene file of a project in reading order.
///
/// A missing scenes directory is not an error: the manuscript simply has no
/// scenes. Each file is read whole and closed before the next is opened.
pub fn discover_scenes<P: AsRef<Path>>(project_dir: P, order: SceneOrder) -> Result<Vec<Scene>> {
    let dir = project_dir.as_ref().join(SCENES_DIR);

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "scenes directory not found; manuscript will have no scenes");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str().filter(|name| is_scene_file(name)) else {
            continue;
        };
        // Follows symlinks, so linked scene files are read like regular ones.
        match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_file() => names.push(name.to_string()),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(scene = %name, "skipping scene file whose link target is missing");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if names.is_empty() {
        tracing::warn!(dir = %dir.display(), "no scene-*.md files found");
    }

    warn_if_order_ambiguous(&names, order);
    order.sort(&mut names);

    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| -> Result<Scene> {
            let bytes = fs::read(dir.join(&name))?;
            let content = unify_line_endings(&decode_text(&bytes)).into_owned();
            tracing::debug!(scene = %name, ordinal = i + 1, bytes = bytes.len(), "read scene");
            Ok(Scene::new(i + 1, name, content))
        })
        .collect()
}

/// Lexicographic order silently misplaces unpadded numbers; say so.
fn warn_if_order_ambiguous(names: &[String], order: SceneOrder) {
    if order != SceneOrder::Lexicographic {
        return;
    }

    let mut lexical = names.to_vec();
    let mut numeric = names.to_vec();
    SceneOrder::Lexicographic.sort(&mut lexical);
    SceneOrder::Numeric.sort(&mut numeric);

    if lexical != numeric {
        tracing::warn!(
            "scene file names sort differently as text and as numbers; \
             zero-pad scene numbers or switch to numeric ordering"
        );
    }
}
