//! DOCX exporter.
//!
//! Writes a minimal WordprocessingML package: one section with 1-inch
//! margins, a distinct (empty) first-page header, and a right-aligned
//! `Surname / Keywords / page` header everywhere else.

use std::io::{Seek, Write};

use quick_xml::escape::escape;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::manuscript::{
    Alignment, Block, Directive, Element, MARGIN_TWIPS, ManuscriptDocument, ManuscriptStyle,
    Paragraph, TWIPS_PER_INCH,
};

use super::Exporter;

/// Configuration for DOCX export.
#[derive(Debug, Clone, Default)]
pub struct DocxConfig {
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
}

/// DOCX format exporter.
///
/// # Example
///
/// ```
/// use folio::{Project, ManuscriptStyle, assemble};
/// use folio::export::{DocxExporter, Exporter};
/// use std::io::Cursor;
///
/// let doc = assemble(&Project::new("Title", "Author"), &[], &ManuscriptStyle::default());
/// let mut out = Cursor::new(Vec::new());
/// DocxExporter::new().export(&doc, &mut out)?;
/// assert!(out.into_inner().starts_with(b"PK"));
/// # Ok::<(), folio::Error>(())
/// ```
pub struct DocxExporter {
    config: DocxConfig,
}

impl DocxExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self {
            config: DocxConfig::default(),
        }
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: DocxConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for DocxExporter {
    fn export<W: Write + Seek>(&self, doc: &ManuscriptDocument, writer: &mut W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);

        let compression_level = self.config.compression_level.unwrap_or(6);
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level as i64));

        let parts: [(&str, String); 9] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
            ("docProps/core.xml", generate_core_properties(doc)),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
            ("word/document.xml", generate_document(doc)),
            ("word/styles.xml", generate_styles(&doc.style)),
            ("word/settings.xml", SETTINGS_XML.to_string()),
            ("word/header1.xml", generate_running_header(doc)),
            ("word/header2.xml", FIRST_PAGE_HEADER_XML.to_string()),
        ];

        for (name, content) in &parts {
            zip.start_file(*name, deflated)?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish()?;
        tracing::debug!(elements = doc.elements.len(), "wrote docx package");
        Ok(())
    }
}

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/settings.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml"/>
  <Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>
  <Override PartName="/word/header2.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" Target="settings.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
  <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header2.xml"/>
</Relationships>"#;

const SETTINGS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:defaultTabStop w:val="720"/>
  <w:characterSpacingControl w:val="doNotCompress"/>
</w:settings>"#;

const FIRST_PAGE_HEADER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:hdr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:p/></w:hdr>"#;

fn generate_core_properties(doc: &ManuscriptDocument) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );
    xml.push_str(&format!("<dc:title>{}</dc:title>", escape_text(&doc.title)));
    xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape_text(&doc.author)));
    xml.push_str("</cp:coreProperties>");
    xml
}

fn generate_styles(style: &ManuscriptStyle) -> String {
    let font = escape_text(&style.font_family);
    let size = style.font_half_points();

    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!("<w:styles xmlns:w=\"{W_NS}\">"));
    xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
    xml.push_str(&format!(
        "<w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:eastAsia=\"{font}\" w:cs=\"{font}\"/>"
    ));
    xml.push_str(&format!("<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>"));
    xml.push_str("</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>");
    xml.push_str(&format!(
        "<w:spacing w:before=\"0\" w:after=\"0\" w:line=\"{}\" w:lineRule=\"auto\"/>",
        style.line_spacing.line_240ths()
    ));
    xml.push_str("</w:pPr></w:pPrDefault></w:docDefaults>");
    xml.push_str(
        "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\"><w:name w:val=\"Normal\"/><w:qFormat/></w:style>",
    );
    xml.push_str(
        "<w:style w:type=\"paragraph\" w:styleId=\"Header\"><w:name w:val=\"header\"/><w:basedOn w:val=\"Normal\"/>\
         <w:pPr><w:spacing w:line=\"240\" w:lineRule=\"auto\"/></w:pPr></w:style>",
    );
    xml.push_str("</w:styles>");
    xml
}

fn generate_running_header(doc: &ManuscriptDocument) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!("<w:hdr xmlns:w=\"{W_NS}\">"));
    xml.push_str("<w:p><w:pPr><w:pStyle w:val=\"Header\"/><w:jc w:val=\"right\"/></w:pPr>");
    push_text_run(&mut xml, &doc.header.prefix(), false, false);
    xml.push_str("<w:r><w:fldChar w:fldCharType=\"begin\"/></w:r>");
    xml.push_str("<w:r><w:instrText xml:space=\"preserve\"> PAGE </w:instrText></w:r>");
    xml.push_str("<w:r><w:fldChar w:fldCharType=\"separate\"/></w:r>");
    xml.push_str("<w:r><w:t>2</w:t></w:r>");
    xml.push_str("<w:r><w:fldChar w:fldCharType=\"end\"/></w:r>");
    xml.push_str("</w:p></w:hdr>");
    xml
}

fn generate_document(doc: &ManuscriptDocument) -> String {
    let style = &doc.style;
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!(
        "<w:document xmlns:w=\"{W_NS}\" xmlns:r=\"{R_NS}\"><w:body>"
    ));

    for element in &doc.elements {
        match element {
            Element::Directive(Directive::PageBreak) => {
                xml.push_str("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>");
            }
            Element::Block(block) => push_block(&mut xml, block, style),
        }
    }

    let (width, height) = style.paper.dimensions();
    xml.push_str("<w:sectPr>");
    xml.push_str("<w:headerReference w:type=\"default\" r:id=\"rId3\"/>");
    xml.push_str("<w:headerReference w:type=\"first\" r:id=\"rId4\"/>");
    xml.push_str(&format!("<w:pgSz w:w=\"{width}\" w:h=\"{height}\"/>"));
    xml.push_str(&format!(
        "<w:pgMar w:top=\"{m}\" w:right=\"{m}\" w:bottom=\"{m}\" w:left=\"{m}\" w:header=\"{h}\" w:footer=\"{h}\" w:gutter=\"0\"/>",
        m = MARGIN_TWIPS,
        h = TWIPS_PER_INCH / 2,
    ));
    xml.push_str("<w:titlePg/>");
    xml.push_str("</w:sectPr></w:body></w:document>");
    xml
}

fn push_block(xml: &mut String, block: &Block, style: &ManuscriptStyle) {
    match block {
        Block::Heading { author, word_count } => {
            xml.push_str(&format!(
                "<w:p><w:pPr><w:tabs><w:tab w:val=\"right\" w:pos=\"{}\"/></w:tabs></w:pPr>",
                style.paper.text_width()
            ));
            push_text_run(xml, author, false, false);
            xml.push_str("<w:r><w:tab/></w:r>");
            push_text_run(xml, word_count, false, false);
            xml.push_str("</w:p>");
        }
        Block::ContactLine(line) => push_line(xml, line, Alignment::Left),
        Block::Spacer => xml.push_str("<w:p/>"),
        Block::TitleLine(text) | Block::BylineLine(text) => {
            push_line(xml, text, Alignment::Center)
        }
        Block::Paragraph(paragraph) => push_paragraph(xml, paragraph, style),
        Block::SceneBreak => push_line(xml, &style.scene_break_glyph, Alignment::Center),
        Block::EndMarker => push_line(xml, &style.end_marker, Alignment::Center),
    }
}

fn push_line(xml: &mut String, text: &str, alignment: Alignment) {
    xml.push_str("<w:p>");
    if alignment == Alignment::Center {
        xml.push_str("<w:pPr><w:jc w:val=\"center\"/></w:pPr>");
    }
    push_text_run(xml, text, false, false);
    xml.push_str("</w:p>");
}

fn push_paragraph(xml: &mut String, paragraph: &Paragraph, style: &ManuscriptStyle) {
    xml.push_str("<w:p><w:pPr>");
    if paragraph.indented {
        xml.push_str(&format!(
            "<w:ind w:firstLine=\"{}\"/>",
            style.first_line_indent_twips()
        ));
    }
    let jc = match paragraph.alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
    };
    xml.push_str(&format!("<w:jc w:val=\"{jc}\"/></w:pPr>"));

    for segment in &paragraph.segments {
        push_text_run(xml, &segment.text, segment.italic, segment.bold);
    }
    xml.push_str("</w:p>");
}

/// Append one run. Newlines become line breaks and tabs become tab stops.
fn push_text_run(xml: &mut String, text: &str, italic: bool, bold: bool) {
    if text.is_empty() {
        return;
    }

    xml.push_str("<w:r>");
    if italic || bold {
        xml.push_str("<w:rPr>");
        if bold {
            xml.push_str("<w:b/><w:bCs/>");
        }
        if italic {
            xml.push_str("<w:i/><w:iCs/>");
        }
        xml.push_str("</w:rPr>");
    }

    let mut chunk = String::new();
    for c in text.chars() {
        match c {
            '\n' | '\t' => {
                flush_text(xml, &mut chunk);
                xml.push_str(if c == '\n' { "<w:br/>" } else { "<w:tab/>" });
            }
            // Not representable in XML 1.0.
            c if c.is_control() => {}
            c => chunk.push(c),
        }
    }
    flush_text(xml, &mut chunk);
    xml.push_str("</w:r>");
}

fn flush_text(xml: &mut String, chunk: &mut String) {
    if chunk.is_empty() {
        return;
    }
    xml.push_str("<w:t xml:space=\"preserve\">");
    xml.push_str(&escape_text(chunk));
    xml.push_str("</w:t>");
    chunk.clear();
}

fn escape_text(s: &str) -> String {
    escape(s).into_owned()
}
