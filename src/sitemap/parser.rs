//! Event-based sitemap XML parsing
//!
//! The parser walks the document as a stream of XML events rather than
//! building a DOM, so arbitrarily large sitemaps never need full buffering
//! of the element tree. Each `<url>` block is reduced to a [`SitemapEntry`]
//! the moment its close tag is seen; the parser never looks ahead across
//! `<url>` boundaries.

use crate::sitemap::SitemapEntry;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Element the parser is currently reading text for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Loc,
    Lastmod,
}

/// Parses sitemap XML into entries
///
/// For each `<url>` element the first `<loc>` becomes the entry URL and the
/// first `<lastmod>`, if present, its modification date; other children are
/// ignored. A `<url>` block with no `<loc>` is dropped, not emitted.
///
/// # Arguments
///
/// * `xml` - The sitemap document text
///
/// # Returns
///
/// * `Ok(Vec<SitemapEntry>)` - Exactly one entry per well-formed `<url>` block
/// * `Err(String)` - The XML was malformed
pub fn parse_sitemap(xml: &str) -> Result<Vec<SitemapEntry>, String> {
    let mut reader = Reader::from_str(xml);
    let mut entries = Vec::new();

    let mut in_url = false;
    let mut field = Field::None;
    let mut url: Option<String> = None;
    let mut lastmod: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"url" => {
                    in_url = true;
                    url = None;
                    lastmod = None;
                }
                b"loc" if in_url => field = Field::Loc,
                b"lastmod" if in_url => field = Field::Lastmod,
                _ => field = Field::None,
            },
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| format!("bad character data: {err}"))?;
                store_field(field, &text, &mut url, &mut lastmod);
            }
            // Some generators wrap URLs in CDATA sections
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e);
                store_field(field, &text, &mut url, &mut lastmod);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"url" => {
                    in_url = false;
                    field = Field::None;
                    match url.take() {
                        Some(u) => entries.push(SitemapEntry {
                            url: u,
                            lastmod: lastmod.take(),
                        }),
                        None => {
                            lastmod = None;
                            tracing::debug!("Dropping <url> block with no <loc>");
                        }
                    }
                }
                b"loc" | b"lastmod" => field = Field::None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(entries)
}

/// Records character data into the entry field being read; first occurrence
/// wins, blank data is ignored
fn store_field(field: Field, text: &str, url: &mut Option<String>, lastmod: &mut Option<String>) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    match field {
        Field::Loc if url.is_none() => *url = Some(text.to_string()),
        Field::Lastmod if lastmod.is_none() => *lastmod = Some(text.to_string()),
        _ => {}
    }
}
