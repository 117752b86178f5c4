use scraper::{Html, Selector};

/// Content container selector used by the generated documentation layout
///
/// Docusaurus-built sites share this container class; pages from older or
/// third-party generators may not have it, hence the body-text fallback.
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &["div.docItemCol_VOVn"];

/// Title and body text extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Page title, verbatim from `<title>`; empty string when absent
    pub title: String,

    /// Primary textual content of the page
    pub text: String,
}

/// Extracts title and body text from HTML
///
/// Body text comes from the first selector in `content_selectors` that
/// matches a non-empty region; when none match, the full visible text of
/// `<body>` is used instead, so pages without the recognized container still
/// produce non-empty text.
pub fn extract_content(html: &str, content_selectors: &[String]) -> ExtractedContent {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_default();

    let text = select_text(&document, content_selectors)
        .unwrap_or_else(|| body_text(&document));

    ExtractedContent { title, text }
}

/// Text of the first matching, non-empty content container
fn select_text(document: &Html, content_selectors: &[String]) -> Option<String> {
    for selector_str in content_selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            tracing::warn!("Invalid content selector '{}', skipping", selector_str);
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = collect_text(element.text());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn body_text(document: &Html) -> String {
    match Selector::parse("body") {
        Ok(sel) => document
            .select(&sel)
            .next()
            .map(|el| collect_text(el.text()))
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Joins text nodes with single spaces, collapsing surrounding whitespace
fn collect_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
