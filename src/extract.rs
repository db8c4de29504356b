use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use lopdf::content::Content;
use lopdf::{Document, Object};
use tracing::warn;

/// Extract plain text per page, keyed by 1-based page number.
///
/// Layout is not reconstructed: text-showing operators are concatenated with
/// newlines at text-positioning boundaries, which is enough for the
/// line-oriented segmenter downstream. Any failure (unreadable file,
/// encrypted document) degrades to an empty map so the caller can skip the
/// document instead of aborting the collection.
pub fn extract_pages(path: &Path) -> BTreeMap<u32, String> {
    let doc = match Document::load(path) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("failed to load {}: {}", path.display(), e);
            return BTreeMap::new();
        }
    };
    if doc.is_encrypted() {
        warn!("{} is encrypted, skipping", path.display());
        return BTreeMap::new();
    }

    let mut pages = BTreeMap::new();
    for (page_number, page_id) in doc.get_pages() {
        let text = page_text(&doc, page_id).unwrap_or_default();
        pages.insert(page_number, text);
    }
    pages
}

fn page_text(doc: &Document, page_id: lopdf::ObjectId) -> Result<String> {
    let content_bytes = doc.get_page_content(page_id)?;
    let content = Content::decode(&content_bytes)?;

    let mut text = String::new();
    for operation in &content.operations {
        match operation.operator.as_str() {
            "Tj" | "TJ" | "'" | "\"" => {
                for operand in &operation.operands {
                    if let Some(s) = decode_text_object(operand) {
                        text.push_str(&s);
                        text.push(' ');
                    }
                }
            }
            // Text positioning starts a new visual line.
            "Td" | "TD" | "T*" => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }
    Ok(text)
}

fn decode_text_object(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => {
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                // Latin-1 / PDFDocEncoding approximation
                Some(bytes.iter().map(|&b| b as char).collect())
            }
        }
        Object::Array(items) => {
            // TJ arrays interleave strings with positioning numbers.
            let joined: String = items.iter().filter_map(decode_text_object).collect();
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}
