//! Paragraph segmentation.

/// Paragraph bodies that mark a break inside a scene.
pub const SCENE_BREAK_MARKERS: [&str; 4] = ["***", "* * *", "# # #", "#"];

/// One paragraph-level unit of scene prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphUnit {
    /// A regular paragraph, trimmed, still carrying its inline markup.
    Text(String),
    /// A scene-break marker, whichever spelling was used.
    SceneBreak,
}

impl ParagraphUnit {
    pub fn is_scene_break(&self) -> bool {
        matches!(self, ParagraphUnit::SceneBreak)
    }
}

/// Split prose on blank lines into paragraphs and scene breaks.
///
/// Chunks are trimmed and empty ones dropped, so runs of three or more
/// newlines do not produce empty paragraphs.
///
/// # Examples
///
/// ```
/// use folio::scene::{ParagraphUnit, segment};
///
/// let units = segment("One.\n\n* * *\n\nTwo.");
/// assert_eq!(
///     units,
///     vec![
///         ParagraphUnit::Text("One.".into()),
///         ParagraphUnit::SceneBreak,
///         ParagraphUnit::Text("Two.".into()),
///     ]
/// );
/// ```
pub fn segment(prose: &str) -> Vec<ParagraphUnit> {
    prose
        .split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            if SCENE_BREAK_MARKERS.contains(&chunk) {
                ParagraphUnit::SceneBreak
            } else {
                ParagraphUnit::Text(chunk.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_marker_is_a_scene_break() {
        for marker in SCENE_BREAK_MARKERS {
            let units = segment(&format!("A.\n\n{marker}\n\nB."));
            assert_eq!(units[1], ParagraphUnit::SceneBreak, "marker {marker:?}");
        }
    }

    #[test]
    fn test_unknown_marker_is_text() {
        let units = segment("~~~");
        assert_eq!(units, vec![ParagraphUnit::Text("~~~".into())]);
    }

    #[test]
    fn test_extra_blank_lines_are_dropped() {
        let units = segment("A.\n\n\n\n\nB.");
        assert_eq!(
            units,
            vec![ParagraphUnit::Text("A.".into()), ParagraphUnit::Text("B.".into())]
        );
    }

    #[test]
    fn test_single_newline_stays_inside_paragraph() {
        let units = segment("Line one\nline two");
        assert_eq!(units, vec![ParagraphUnit::Text("Line one\nline two".into())]);
    }

    #[test]
    fn test_marker_with_surrounding_spaces() {
        let units = segment("A.\n\n  #  \n\nB.");
        assert!(units[1].is_scene_break());
    }

    #[test]
    fn test_empty_prose() {
        assert!(segment("").is_empty());
        assert!(segment("\n\n\n").is_empty());
    }
}
