//! WikiWord linking for page content

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

// Constant pattern; a failure here is a bug, not a runtime condition
static WIKIWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]\w+[A-Z]+\w+)")
        .expect("Invalid regex pattern - this is a bug in the codebase")
});

/// A run of page text, optionally linked. Escaping is left to the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub text: String,
    pub link: Option<String>,
    /// Link points at the add-page form because the page does not exist yet
    pub missing: bool,
}

impl Chunk {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            link: None,
            missing: false,
        }
    }
}

/// Distinct WikiWords in order of first appearance
pub fn find_wikiwords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WIKIWORD
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// Split content into paragraphs on blank lines and link every WikiWord
pub fn render_paragraphs(text: &str, existing: &HashSet<String>) -> Vec<Vec<Chunk>> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| link_words(p, existing))
        .collect()
}

fn link_words(paragraph: &str, existing: &HashSet<String>) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut last = 0;

    for m in WIKIWORD.find_iter(paragraph) {
        if m.start() > last {
            chunks.push(Chunk::plain(&paragraph[last..m.start()]));
        }
        let word = m.as_str();
        let encoded = urlencoding::encode(word);
        let missing = !existing.contains(word);
        let link = if missing {
            format!("/add_page/{encoded}")
        } else {
            format!("/{encoded}")
        };
        chunks.push(Chunk {
            text: word.to_string(),
            link: Some(link),
            missing,
        });
        last = m.end();
    }

    if last < paragraph.len() {
        chunks.push(Chunk::plain(&paragraph[last..]));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_wikiwords() {
        let words = find_wikiwords("See FrontPage and BackPage, then FrontPage again. Not Words.");
        assert_eq!(words, vec!["FrontPage".to_string(), "BackPage".to_string()]);
    }

    #[test]
    fn test_plain_words_are_not_wikiwords() {
        assert!(find_wikiwords("Hello world, nothing CAPS here").is_empty());
    }

    #[test]
    fn test_links_existing_and_missing_pages() {
        let existing: HashSet<String> = ["FrontPage".to_string()].into_iter().collect();
        let paragraphs = render_paragraphs("Go to FrontPage or NewPage.", &existing);

        assert_eq!(paragraphs.len(), 1);
        let chunks = &paragraphs[0];
        assert_eq!(chunks[0], Chunk::plain("Go to "));
        assert_eq!(chunks[1].link.as_deref(), Some("/FrontPage"));
        assert!(!chunks[1].missing);
        assert_eq!(chunks[2], Chunk::plain(" or "));
        assert_eq!(chunks[3].link.as_deref(), Some("/add_page/NewPage"));
        assert!(chunks[3].missing);
        assert_eq!(chunks[4], Chunk::plain("."));
    }

    #[test]
    fn test_paragraph_split() {
        let paragraphs = render_paragraphs("first\r\n\r\nsecond\n\n\n\nthird", &HashSet::new());
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[2], vec![Chunk::plain("third")]);
    }
}
