//! Text extraction: turn a PDF payload into plain text.
//!
//! ## Why spawn_blocking?
//!
//! Parsing a PDF is CPU-bound and can take hundreds of milliseconds on large
//! documents. `tokio::task::spawn_blocking` moves the work onto the blocking
//! thread pool so runtime worker threads never stall.
//!
//! ## The shared engine
//!
//! The normalisation tables (ligature folds, whitespace collapsing) are built
//! once per process and shared by every extraction. First use goes through a
//! memoized pending initialisation ([`tokio::sync::OnceCell`]), so concurrent
//! first calls share a single build instead of racing to construct duplicates.

use crate::error::BriefError;
use crate::pipeline::input::SourceDocument;
use lopdf::Document;
use regex::Regex;
use tokio::sync::OnceCell;
use tracing::debug;

/// Minimum trimmed character count for a document to count as text-bearing.
///
/// Below this the input is treated as a scanned or image-only PDF. A
/// heuristic, not OCR detection.
pub const MIN_TEXT_CHARS: usize = 50;

/// Ligature code points folded to their ASCII expansions.
///
/// PDF text streams frequently carry typographic ligatures; folding them
/// keeps word counts and downstream prompts stable.
const LIGATURE_FOLDS: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

static ENGINE: OnceCell<TextEngine> = OnceCell::const_new();

/// Process-wide normalisation engine, initialised at most once.
struct TextEngine {
    whitespace: Regex,
}

impl TextEngine {
    fn load() -> Self {
        Self {
            // Any whitespace run collapses to a single space within a page.
            whitespace: Regex::new(r"\s+").expect("whitespace pattern is valid"),
        }
    }

    /// Fold ligatures and collapse intra-page whitespace to single spaces.
    fn normalize_page(&self, raw: &str) -> String {
        let mut folded = String::with_capacity(raw.len());
        for ch in raw.chars() {
            match LIGATURE_FOLDS.iter().find(|(lig, _)| *lig == ch) {
                Some((_, expansion)) => folded.push_str(expansion),
                None => folded.push(ch),
            }
        }
        self.whitespace
            .replace_all(folded.trim(), " ")
            .into_owned()
    }
}

async fn engine() -> &'static TextEngine {
    ENGINE.get_or_init(|| async { TextEngine::load() }).await
}

/// Extract the document's visible text.
///
/// Page order is preserved: text items within a page are joined by single
/// spaces, pages are joined by newlines.
///
/// # Errors
/// * [`BriefError::ParseFailure`] — the payload did not parse as a PDF.
/// * [`BriefError::EmptyOrScannedDocument`] — parsing succeeded but the
///   trimmed text is shorter than [`MIN_TEXT_CHARS`] characters.
pub async fn extract_text(doc: &SourceDocument) -> Result<String, BriefError> {
    let engine = engine().await;
    let bytes = doc.bytes.clone();
    let title = doc.title.clone();

    let text = tokio::task::spawn_blocking(move || extract_text_blocking(engine, &title, &bytes))
        .await
        .map_err(|e| BriefError::Internal(format!("Extraction task panicked: {e}")))??;

    let chars = text.trim().chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(BriefError::EmptyOrScannedDocument { chars });
    }
    Ok(text)
}

/// Blocking implementation of text extraction.
fn extract_text_blocking(
    engine: &TextEngine,
    title: &str,
    bytes: &[u8],
) -> Result<String, BriefError> {
    let document = Document::load_mem(bytes).map_err(|e| BriefError::ParseFailure {
        name: title.to_string(),
        detail: e.to_string(),
    })?;

    // BTreeMap keys, so pages come out in document order.
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    debug!("PDF loaded: {} pages", page_numbers.len());

    let mut pages = Vec::with_capacity(page_numbers.len());
    for number in page_numbers {
        match document.extract_text(&[number]) {
            Ok(raw) => pages.push(engine.normalize_page(&raw)),
            Err(e) => {
                // A single unreadable page degrades to empty text rather than
                // failing the document; the length guard still applies.
                debug!("Page {number}: no text extracted ({e})");
                pages.push(String::new());
            }
        }
    }

    Ok(pages.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a minimal single-font PDF with one page per input string.
    fn fixture_pdf(pages_text: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages_text {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).expect("serialize fixture PDF");
        out
    }

    fn doc_from(pages_text: &[&str]) -> SourceDocument {
        SourceDocument::from_bytes("fixture.pdf", fixture_pdf(pages_text)).unwrap()
    }

    #[test]
    fn normalize_collapses_whitespace_and_folds_ligatures() {
        let engine = TextEngine::load();
        assert_eq!(
            engine.normalize_page("  an  e\u{FB03}cient \n workflow "),
            "an efficient workflow"
        );
    }

    #[tokio::test]
    async fn extracts_text_in_page_order() {
        let first = "This is the first page of the fixture document, with plenty of text.";
        let second = "And this is the second page, also carrying enough characters.";
        let doc = doc_from(&[first, second]);

        let text = extract_text(&doc).await.unwrap();
        let pages: Vec<&str> = text.split('\n').collect();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("first page"));
        assert!(pages[1].contains("second page"));
    }

    #[tokio::test]
    async fn short_document_is_rejected_as_scanned() {
        let doc = doc_from(&["tiny"]);
        let err = extract_text(&doc).await.unwrap_err();
        assert!(matches!(
            err,
            BriefError::EmptyOrScannedDocument { chars } if chars < MIN_TEXT_CHARS
        ));
    }

    #[tokio::test]
    async fn garbage_payload_is_a_parse_failure() {
        // Valid magic so intake accepts it, nothing else.
        let doc = SourceDocument::from_bytes("bad.pdf", b"%PDF-1.4 garbage".to_vec()).unwrap();
        let err = extract_text(&doc).await.unwrap_err();
        assert!(matches!(err, BriefError::ParseFailure { .. }));
    }
}
