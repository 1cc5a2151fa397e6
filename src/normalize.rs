// src/normalize.rs
//! Clean-up for free text coming back from the model.

use once_cell::sync::OnceCell;
use regex::Regex;

const MAX_CHARS: usize = 1500;

/// Decode entities, strip tags, fold quotes and whitespace, cap length.
/// Sentence punctuation is kept; summaries are shown verbatim.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[a-z][^>]*>").expect("tag regex"));
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Curly quotes to ASCII
    out = out
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace (incl. nbsp)
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("ws regex"));
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > MAX_CHARS {
        out = out.chars().take(MAX_CHARS).collect();
    }

    out
}
