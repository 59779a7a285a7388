//! Scene header stripping.

use crate::util::normalize;

/// Lines starting with this are scene headings, not prose.
pub const SCENE_HEADING_PREFIX: &str = "# Scene";

/// A line holding exactly this ends the header.
pub const HEADER_SEPARATOR: &str = "---";

/// A scene file split into its header and its prose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestedScene {
    /// The `# Scene ...` heading, if one was seen.
    pub heading: Option<String>,
    /// `**Label**: value` fields in file order.
    pub fields: Vec<(String, String)>,
    /// Prose with surrounding whitespace trimmed.
    pub prose: String,
}

impl IngestedScene {
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .map(|(_, v)| v.as_str())
    }
}

/// Strip the metadata header from raw scene content and return the prose.
///
/// # Examples
///
/// ```
/// use folio::scene::ingest;
///
/// let raw = "# Scene 1\n**POV**: Alice\n---\nShe walked in.";
/// assert_eq!(ingest(raw), "She walked in.");
/// ```
pub fn ingest(raw: &str) -> String {
    ingest_scene(raw).prose
}

/// Like [`ingest`], but keeps the header fields that were skipped.
///
/// The header scan is a single forward pass over the normalized lines:
/// headings and `**Label**:` fields move the prose start past themselves,
/// blank lines are passed over, a `---` line ends the header on the spot,
/// and the first other line is where prose begins.
pub fn ingest_scene(raw: &str) -> IngestedScene {
    let content = normalize(raw);
    let lines: Vec<&str> = content.split('\n').collect();

    let mut scene = IngestedScene::default();
    let mut prose_start = 0;

    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();

        if line.starts_with(SCENE_HEADING_PREFIX) {
            scene.heading.get_or_insert_with(|| line.to_string());
            prose_start = i + 1;
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if let Some(field) = parse_field(line) {
            scene.fields.push(field);
            prose_start = i + 1;
            continue;
        }

        if line == HEADER_SEPARATOR {
            prose_start = i + 1;
            break;
        }

        prose_start = i;
        break;
    }

    scene.prose = lines[prose_start..].join("\n").trim().to_string();
    scene
}

/// Parse a `**Label**: value` metadata line.
fn parse_field(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix("**")?;
    let (label, value) = rest.split_once("**:")?;
    Some((label.trim().to_string(), value.trim().to_string()))
}
