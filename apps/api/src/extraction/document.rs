//! Document text extraction — dispatches on file extension to a PDF or DOCX decoder.
//!
//! Unsupported extensions yield empty text, not an error. Decoder failures are
//! returned to the caller, which decides whether to skip the entry.

use std::any::Any;
use std::io::{Cursor, Read};
use std::panic;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use super::ExtractionError;

/// Main body part inside a DOCX package.
const DOCX_BODY_PART: &str = "word/document.xml";

const WORDML_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Closed set of formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentKind {
    /// Case-sensitive suffix match on the filename.
    pub fn from_filename(filename: &str) -> Self {
        if filename.ends_with(".pdf") {
            Self::Pdf
        } else if filename.ends_with(".docx") {
            Self::Docx
        } else {
            Self::Unsupported
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Extracts flat text from an in-memory document.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
    match DocumentKind::from_filename(filename) {
        DocumentKind::Pdf => pdf_text(bytes),
        DocumentKind::Docx => docx_text(bytes),
        DocumentKind::Unsupported => Ok(String::new()),
    }
}

/// Same as [`extract_text`] for an already-open stream; the stream is read to the end first.
pub fn extract_text_from_reader<R: Read>(
    mut reader: R,
    filename: &str,
) -> Result<String, ExtractionError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    extract_text(&bytes, filename)
}

/// Concatenates the text layer of every page in page order. No OCR.
fn pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs; that must stay an entry-level failure.
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(decoder_panic)?
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

    Ok(pages.concat())
}

fn decoder_panic(payload: Box<dyn Any + Send>) -> ExtractionError {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "decoder panicked".to_string());
    ExtractionError::PdfParsing(detail)
}

/// Concatenates the text of every body paragraph with no separator between paragraphs.
fn docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut package = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::DocxParsing(format!("not a DOCX package: {e}")))?;

    let mut xml = String::new();
    package
        .by_name(DOCX_BODY_PART)
        .map_err(|e| ExtractionError::DocxParsing(format!("{DOCX_BODY_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    body_paragraph_text(&xml)
}

/// WordprocessingML elements the text walk cares about, resolved by namespace
/// so any prefix bound to `WORDML_NS` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Body,
    Paragraph,
    Hyperlink,
    Run,
    Text,
    Tab,
    Break,
    Other,
}

impl Node {
    fn resolve(reader: &NsReader<&[u8]>, element: &BytesStart) -> Self {
        let (ns, local) = reader.resolve_element(element.name());
        if !matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == WORDML_NS) {
            return Self::Other;
        }
        match local.as_ref() {
            b"body" => Self::Body,
            b"p" => Self::Paragraph,
            b"hyperlink" => Self::Hyperlink,
            b"r" => Self::Run,
            b"t" => Self::Text,
            b"tab" => Self::Tab,
            b"br" | b"cr" => Self::Break,
            _ => Self::Other,
        }
    }
}

fn body_paragraph_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = NsReader::from_str(xml);
    let mut open: Vec<Node> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let node = Node::resolve(&reader, &e);
                push_run_control(&mut text, node, &open);
                open.push(node);
            }
            Ok(Event::Empty(e)) => {
                let node = Node::resolve(&reader, &e);
                push_run_control(&mut text, node, &open);
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Text(t)) => {
                if let [path @ .., Node::Text] = open.as_slice() {
                    if in_body_run(path) {
                        let unescaped = t.unescape().map_err(|e| {
                            ExtractionError::DocxParsing(format!("bad text escape: {e}"))
                        })?;
                        text.push_str(&unescaped);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::DocxParsing(format!(
                    "malformed {DOCX_BODY_PART} at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(text)
}

fn push_run_control(text: &mut String, node: Node, open: &[Node]) {
    if !in_body_run(open) {
        return;
    }
    match node {
        Node::Tab => text.push('\t'),
        Node::Break => text.push('\n'),
        _ => {}
    }
}

/// True when `open` ends in a run that belongs to a paragraph directly under
/// the body, either as a direct child or inside a direct-child hyperlink.
/// Runs wrapped in content controls, smart tags, revisions, tables or text
/// boxes do not qualify.
fn in_body_run(open: &[Node]) -> bool {
    let Some(body) = open.iter().position(|node| *node == Node::Body) else {
        return false;
    };
    matches!(
        &open[body + 1..],
        [Node::Paragraph, Node::Run] | [Node::Paragraph, Node::Hyperlink, Node::Run]
    )
}
