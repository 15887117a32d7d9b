use std::sync::LazyLock;

use regex::Regex;

use super::chunks::label_value;

static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]\n]*\]\(\s*<?(https?://[^)\s>]+)>?\s*\)").unwrap());
static BARE_URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s)\]>]+").unwrap());

/// Booking link for an offer: markdown `[text](url)` target first, then the
/// first bare URL.
pub fn booking_link(chunk: &str) -> Option<String> {
    markdown_link(chunk).or_else(|| bare_url(chunk))
}

/// URL carried by an explicit `Link:` field.
pub fn labeled_link(chunk: &str) -> Option<String> {
    label_value(chunk, "Link:").and_then(|value| bare_url(&value))
}

pub fn markdown_link(chunk: &str) -> Option<String> {
    MARKDOWN_LINK_RE.captures(chunk).map(|c| c[1].to_string())
}

pub fn bare_url(chunk: &str) -> Option<String> {
    BARE_URL_RE
        .find(chunk)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', '!']).to_string())
}

/// Host of a URL without the `www.` prefix, for "Book on …" labels.
pub fn link_domain(url: &str) -> String {
    url.split("//")
        .nth(1)
        .unwrap_or(url)
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .trim_start_matches("www.")
        .to_string()
}
