//! Integration tests: project directory in, manuscript out.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use folio::export::{DocxExporter, Exporter, TextExporter};
use folio::manuscript::{Block, Element};
use folio::{AssembleOptions, Error, SceneOrder, build_manuscript, export_to_path};
use tempfile::TempDir;

const PROJECT_JSON: &str = r#"{
    "projectName": "The Last Signal",
    "author": "Ada Byron",
    "penName": "A. B. Vale",
    "wordCount": 4321,
    "contact": {
        "address": ["12 Harbour Road", "Porthleven"],
        "email": "ada@example.com"
    }
}"#;

fn write_project(dir: &Path, json: &str, scenes: &[(&str, &str)]) {
    fs::write(dir.join("project.json"), json).unwrap();
    if scenes.is_empty() {
        return;
    }
    let scenes_dir = dir.join("scenes");
    fs::create_dir_all(&scenes_dir).unwrap();
    for (name, content) in scenes {
        fs::write(scenes_dir.join(name), content).unwrap();
    }
}

fn read_part(docx: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

fn export_docx(dir: &Path, options: &AssembleOptions) -> Vec<u8> {
    let doc = build_manuscript(dir, options).unwrap();
    let mut cursor = Cursor::new(Vec::new());
    DocxExporter::new().export(&doc, &mut cursor).unwrap();
    cursor.into_inner()
}

// ============================================================================
// DOCX output
// ============================================================================

#[test]
fn test_docx_contains_title_page_and_scenes() {
    let tmp = TempDir::new().unwrap();
    write_project(
        tmp.path(),
        PROJECT_JSON,
        &[
            (
                "scene-001.md",
                "# Scene 1\n**POV**: Mara\n---\nThe lamp *flickered*.\n\n***\n\nShe waited.",
            ),
            ("scene-002.md", "# Scene 2\n---\nMorning came & went."),
        ],
    );

    let docx = export_docx(tmp.path(), &AssembleOptions::default());
    let document = read_part(&docx, "word/document.xml");

    assert!(document.contains(">Ada Byron<"));
    assert!(document.contains(">about 4,300 words<"));
    assert!(document.contains(">12 Harbour Road<"));
    assert!(document.contains(">The Last Signal<"));
    assert!(document.contains(">by A. B. Vale<"));
    assert!(document.contains(">flickered<"));
    assert!(document.contains("<w:i/>"));
    assert!(document.contains(">Morning came &amp; went.<"));
    assert!(!document.contains("POV"));
    assert!(!document.contains("# Scene"));
    assert_eq!(document.matches("<w:br w:type=\"page\"/>").count(), 1);

    let waited = document.find(">She waited.<").unwrap();
    let morning = document.find(">Morning came").unwrap();
    let end = document.find(">END<").unwrap();
    assert!(waited < morning && morning < end);

    let header = read_part(&docx, "word/header1.xml");
    assert!(header.contains("Byron / Last Signal / "));
    assert!(header.contains("PAGE"));

    let first_page = read_part(&docx, "word/header2.xml");
    assert!(!first_page.contains("Byron"));

    let core = read_part(&docx, "docProps/core.xml");
    assert!(core.contains("<dc:title>The Last Signal</dc:title>"));
}

#[test]
fn test_missing_scenes_dir_gives_title_page_only() {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), PROJECT_JSON, &[]);

    let doc = build_manuscript(tmp.path(), &AssembleOptions::default()).unwrap();
    assert_eq!(doc.scene_count, 0);
    assert_eq!(doc.page_breaks(), 0);
    assert_eq!(doc.paragraphs().count(), 0);
    assert_eq!(doc.elements.last(), Some(&Element::Block(Block::EndMarker)));

    let docx = export_docx(tmp.path(), &AssembleOptions::default());
    assert!(read_part(&docx, "word/document.xml").contains(">END<"));
}

#[test]
fn test_missing_project_json_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = build_manuscript(tmp.path(), &AssembleOptions::default());
    assert!(matches!(result, Err(Error::MissingProject(_))));
}

#[test]
fn test_malformed_project_json_is_an_error() {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), "{ not json", &[]);
    let result = build_manuscript(tmp.path(), &AssembleOptions::default());
    assert!(matches!(result, Err(Error::Json(_))));
}

// ============================================================================
// Scene ordering
// ============================================================================

fn ordering_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_project(
        tmp.path(),
        r#"{"title": "Order", "author": "Test"}"#,
        &[
            ("scene-10.md", "Tenth."),
            ("scene-2.md", "Second."),
            ("scene-1.md", "First."),
            ("notes.md", "Not a scene."),
        ],
    );
    tmp
}

fn paragraph_texts(options: &AssembleOptions, dir: &Path) -> Vec<String> {
    build_manuscript(dir, options)
        .unwrap()
        .paragraphs()
        .map(|p| p.text())
        .collect()
}

#[test]
fn test_scenes_sorted_by_file_name_by_default() {
    let tmp = ordering_project();
    assert_eq!(
        paragraph_texts(&AssembleOptions::default(), tmp.path()),
        vec!["First.", "Tenth.", "Second."]
    );
}

#[test]
fn test_numeric_scene_order() {
    let tmp = ordering_project();
    let options = AssembleOptions {
        scene_order: SceneOrder::Numeric,
        ..Default::default()
    };
    assert_eq!(
        paragraph_texts(&options, tmp.path()),
        vec!["First.", "Second.", "Tenth."]
    );
}

#[test]
fn test_zero_padded_names_sort_naturally() {
    let tmp = TempDir::new().unwrap();
    write_project(
        tmp.path(),
        r#"{"title": "Order", "author": "Test"}"#,
        &[
            ("scene-010.md", "Ten."),
            ("scene-001.md", "One."),
            ("scene-002.md", "Two."),
        ],
    );
    assert_eq!(
        paragraph_texts(&AssembleOptions::default(), tmp.path()),
        vec!["One.", "Two.", "Ten."]
    );
}

// ============================================================================
// Input cleanup
// ============================================================================

#[test]
fn test_crlf_and_windows_1252_scenes() {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), r#"{"title": "T", "author": "A"}"#, &[]);
    let scenes_dir = tmp.path().join("scenes");
    fs::create_dir_all(&scenes_dir).unwrap();
    fs::write(scenes_dir.join("scene-001.md"), "# Scene 1\r\n---\r\nOne.\r\n\r\nTwo.").unwrap();
    // "caf\xe9" is Windows-1252 for "café"
    fs::write(scenes_dir.join("scene-002.md"), b"Caf\xe9 noir.".as_slice()).unwrap();

    assert_eq!(
        paragraph_texts(&AssembleOptions::default(), tmp.path()),
        vec!["One.", "Two.", "Caf\u{e9} noir."]
    );
}

#[test]
fn test_count_words_option() {
    let tmp = TempDir::new().unwrap();
    let prose = "word ".repeat(1_240);
    write_project(
        tmp.path(),
        r#"{"title": "T", "author": "A"}"#,
        &[("scene-001.md", prose.as_str())],
    );

    let default = build_manuscript(tmp.path(), &AssembleOptions::default()).unwrap();
    assert_eq!(default.word_count, "about 0 words");

    let options = AssembleOptions {
        count_words: true,
        ..Default::default()
    };
    let counted = build_manuscript(tmp.path(), &options).unwrap();
    assert_eq!(counted.word_count, "about 1,200 words");
}

// ============================================================================
// Exporting to disk
// ============================================================================

#[test]
fn test_export_to_path_picks_format_by_extension() {
    let tmp = TempDir::new().unwrap();
    write_project(
        tmp.path(),
        PROJECT_JSON,
        &[("scene-001.md", "One."), ("scene-002.md", "Two.")],
    );
    let doc = build_manuscript(tmp.path(), &AssembleOptions::default()).unwrap();

    let docx_path = tmp.path().join("manuscript.docx");
    export_to_path(&doc, &docx_path).unwrap();
    let bytes = fs::read(&docx_path).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let txt_path = tmp.path().join("proof.txt");
    export_to_path(&doc, &txt_path).unwrap();
    let proof = fs::read_to_string(&txt_path).unwrap();
    assert_eq!(proof, TextExporter::new().render(&doc));
    assert_eq!(proof.matches('\u{0C}').count(), 1);

    let pdf_path = tmp.path().join("manuscript.pdf");
    assert!(matches!(
        export_to_path(&doc, &pdf_path),
        Err(Error::UnsupportedFormat(_))
    ));
}
