//! Netscape bookmark file codec.
//!
//! The dialect is HTML-ish rather than XML: `<DT>` and `<p>` are never
//! closed and attribute names come in any case. Decoding walks the tags in
//! document order instead of building a tree, so every `<A>` is found no
//! matter how deeply folders nest.

use crate::error::{Result, ThumbmarkError};
use crate::models::bookmark::Bookmark;
use crate::utils::{escape_html, now_unix, unescape_html};
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::OnceLock;

pub const DOCTYPE: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>";

/// One link read from (or written to) an interchange document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterchangeEntry {
    pub url: String,
    /// Seconds since the epoch; 0 when the source carried no usable date
    pub add_date: i64,
    pub title: Option<String>,
    /// Enclosing `<H3>` folder names, outermost first
    pub folders: Vec<String>,
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r#"<\s*(/?)\s*([A-Za-z][A-Za-z0-9]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
            .expect("valid regex")
    })
}

fn attr_regex() -> &'static Regex {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    ATTR.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("valid regex")
    })
}

fn comment_regex() -> &'static Regex {
    static COMMENT: OnceLock<Regex> = OnceLock::new();
    COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"))
}

/// Attribute map with lowercased names
fn parse_attributes(raw: &str) -> HashMap<String, String> {
    attr_regex()
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();
            (name, value.to_string())
        })
        .collect()
}

/// Visible text of a fragment: inner tags dropped, entities decoded
fn inner_text(fragment: &str) -> String {
    let stripped = tag_regex().replace_all(fragment, "");
    unescape_html(stripped.trim())
}

fn has_doctype(text: &str) -> bool {
    let head = text.trim_start_matches('\u{feff}').trim_start();
    head.get(..DOCTYPE.len())
        .map(|prefix| prefix.eq_ignore_ascii_case(DOCTYPE))
        .unwrap_or(false)
}

struct OpenAnchor {
    url: String,
    add_date: i64,
    text_start: usize,
}

/// Decode an interchange document into its link entries, in document order.
///
/// Anchors without a usable `HREF` are skipped. The document itself must
/// start with the Netscape doctype and contain a `<DL>` list.
pub fn decode(bytes: &[u8]) -> Result<Vec<InterchangeEntry>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ThumbmarkError::Format(format!("document is not valid UTF-8: {}", e)))?;

    if !has_doctype(text) {
        return Err(ThumbmarkError::Format(format!(
            "missing {} declaration",
            DOCTYPE
        )));
    }

    let cleaned = comment_regex().replace_all(text, "");
    let text: &str = &cleaned;

    let mut entries = Vec::new();
    // one slot per open <DL>; Some when the list belongs to a folder
    let mut lists: Vec<Option<String>> = Vec::new();
    let mut seen_list = false;
    let mut heading_start: Option<usize> = None;
    let mut pending_folder: Option<String> = None;
    let mut anchor: Option<OpenAnchor> = None;

    let folders =
        |lists: &[Option<String>]| -> Vec<String> { lists.iter().flatten().cloned().collect() };

    for caps in tag_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_uppercase();

        // an <A> left open runs until the next tag that starts a new item
        if let Some(open) = anchor.take() {
            if matches!(name.as_str(), "A" | "DT" | "DD" | "DL" | "H3") {
                let title = inner_text(&text[open.text_start..whole.start()]);
                entries.push(InterchangeEntry {
                    url: open.url,
                    add_date: open.add_date,
                    title: (!title.is_empty()).then_some(title),
                    folders: folders(&lists),
                });
            } else {
                anchor = Some(open);
            }
        }

        match (closing, name.as_str()) {
            (false, "DL") => {
                seen_list = true;
                lists.push(pending_folder.take());
            }
            (true, "DL") => {
                lists.pop();
            }
            (false, "H3") => {
                heading_start = Some(whole.end());
            }
            (true, "H3") => {
                if let Some(start) = heading_start.take() {
                    let folder = inner_text(&text[start..whole.start()]);
                    pending_folder = (!folder.is_empty()).then_some(folder);
                }
            }
            (false, "A") => {
                let attrs = parse_attributes(&caps[3]);
                let url = attrs
                    .get("href")
                    .map(|h| unescape_html(h.trim()))
                    .unwrap_or_default();

                if url.is_empty() {
                    log::debug!("Skipping anchor without HREF at byte {}", whole.start());
                    continue;
                }

                let add_date = attrs
                    .get("add_date")
                    .and_then(|d| d.trim().parse::<i64>().ok())
                    .unwrap_or(0);

                anchor = Some(OpenAnchor {
                    url,
                    add_date,
                    text_start: whole.end(),
                });
            }
            _ => {}
        }
    }

    if let Some(open) = anchor.take() {
        let title = inner_text(&text[open.text_start..]);
        entries.push(InterchangeEntry {
            url: open.url,
            add_date: open.add_date,
            title: (!title.is_empty()).then_some(title),
            folders: folders(&lists),
        });
    }

    if !seen_list {
        return Err(ThumbmarkError::Format(
            "no <DL> bookmark list found".to_string(),
        ));
    }

    Ok(entries)
}

/// Encode bookmarks, stamping every entry with the current time
pub fn encode(bookmarks: &[Bookmark]) -> Vec<u8> {
    encode_at(bookmarks, now_unix())
}

/// Encode bookmarks with `ADD_DATE` set to `add_date` for every entry
pub fn encode_at(bookmarks: &[Bookmark], add_date: i64) -> Vec<u8> {
    let mut out = String::with_capacity(256 + bookmarks.len() * 96);

    // writing into a String cannot fail
    let _ = writeln!(out, "{}", DOCTYPE);
    let _ = writeln!(out, "<!-- This is an automatically generated file.");
    let _ = writeln!(out, "     It will be read and overwritten.");
    let _ = writeln!(out, "     DO NOT EDIT! -->");
    let _ = writeln!(
        out,
        "<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">"
    );
    let _ = writeln!(out, "<TITLE>Bookmarks</TITLE>");
    let _ = writeln!(out, "<H1>Bookmarks</H1>");
    let _ = writeln!(out, "<DL><p>");

    for bookmark in bookmarks {
        let url = escape_html(&bookmark.url);
        let _ = writeln!(
            out,
            "    <DT><A HREF=\"{}\" ADD_DATE=\"{}\">{}</A>",
            url, add_date, url
        );
    }

    let _ = writeln!(out, "</DL><p>");
    out.into_bytes()
}
