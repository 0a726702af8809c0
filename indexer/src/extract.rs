//! Visible-text extraction from corpus files.

use anyhow::{Context, Result};
use scraper::{Html, Node};
use std::fs;
use std::path::Path;

/// Decode as UTF-8, falling back to ISO-8859-1 (every byte is a code point).
pub fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// Text of a document body. HTML starts at the first `<!DOCTYPE`, `<html`
/// or `<`; without markup, everything after the header block is returned.
pub fn extract_text(content: &str) -> String {
    let html_start = content
        .find("<!DOCTYPE")
        .or_else(|| content.find("<html"))
        .or_else(|| content.find('<'));

    match html_start {
        Some(start) => html_text(&content[start..]),
        None => match content.find("\n\n") {
            Some(end) => content[end..].trim().to_string(),
            None => content.trim().to_string(),
        },
    }
}

/// Visible text of an HTML fragment, whitespace collapsed.
pub fn html_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();
    for node in doc.tree.root().descendants() {
        let Node::Text(text) = node.value() else { continue };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| matches!(e.name(), "script" | "style")))
            .unwrap_or(false);
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }
    words.join(" ")
}

pub fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(extract_text(&decode(bytes)))
}
