//! Text cleanup shared by the scene reader and the ingestor.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

/// Code points that render as nothing but break word matching and emphasis
/// pairing when they sneak into prose.
pub const INVISIBLE_CHARS: [char; 6] = [
    '\u{200B}', // zero-width space
    '\u{200C}', // zero-width non-joiner
    '\u{200D}', // zero-width joiner
    '\u{00AD}', // soft hyphen
    '\u{FEFF}', // zero-width no-break space
    '\u{2060}', // word joiner
];

/// Strip invisible characters and compose the result to NFC.
///
/// Total over any input; the deletion happens before composition so that a
/// combining mark separated from its base by a joiner still composes.
///
/// # Examples
///
/// ```
/// use folio::normalize;
///
/// assert_eq!(normalize("zero\u{200B}width"), "zerowidth");
/// assert_eq!(normalize("cafe\u{0301}"), "caf\u{00E9}");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !INVISIBLE_CHARS.contains(c))
        .nfc()
        .collect()
}

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. Falls back to Windows-1252 (common for files saved by older editors)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Convert CRLF and lone CR line endings to LF.
pub fn unify_line_endings(text: &str) -> Cow<'_, str> {
    if memchr::memchr(b'\r', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}
