use std::sync::LazyLock;

use regex::Regex;

use crate::parser::sanitize::sanitize;

static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+\.\s+").unwrap());

/// Inline separators the backend uses between fields on one line.
const INLINE_SEPARATORS: &[&str] = &["...", "…"];

/// Split a block of offers on leading `N. ` markers. Text ahead of the first
/// marker is kept as its own chunk; blank chunks are dropped. Markers count
/// only at the start of a line, so offers run together on one line stay one
/// chunk.
pub fn split_offers(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut cursor = 0;

    for m in ORDINAL_RE.find_iter(text) {
        chunks.push(&text[cursor..m.start()]);
        cursor = m.end();
    }
    chunks.push(&text[cursor..]);

    chunks
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Value of a `Label:` field: the rest of its line, cut at an inline `...`
/// separator and sanitized. The label must start a word.
pub fn label_value(chunk: &str, label: &str) -> Option<String> {
    let mut from = 0;

    while let Some(pos) = chunk[from..].find(label) {
        let start = from + pos;
        from = start + label.len();

        let at_word_start = chunk[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        if !at_word_start {
            continue;
        }

        let rest = &chunk[from..];
        let mut value = rest.split('\n').next().unwrap_or("");
        for sep in INLINE_SEPARATORS {
            if let Some(cut) = value.find(sep) {
                value = &value[..cut];
            }
        }
        let value = sanitize(value);
        return if value.is_empty() { None } else { Some(value) };
    }

    None
}

/// First of `labels` that resolves in `chunk`.
pub fn first_label(chunk: &str, labels: &[&str]) -> Option<String> {
    labels.iter().find_map(|label| label_value(chunk, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_numbered_offers() {
        let chunks = split_offers("1. Delta - $200\n   Duration: 5h\n2. United - $180\n3. Air France - $640");
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].starts_with("Delta"));
        assert!(chunks[0].contains("Duration: 5h"));
        assert_eq!(chunks[2], "Air France - $640");
    }

    #[test]
    fn keeps_unnumbered_text_as_chunk() {
        assert_eq!(split_offers("Hilton (4 stars) - 150 USD"), vec!["Hilton (4 stars) - 150 USD"]);
        assert_eq!(split_offers("intro line\n1. first"), vec!["intro line", "first"]);
    }

    #[test]
    fn drops_blank_chunks() {
        assert_eq!(split_offers("1. \n2. Delta"), vec!["Delta"]);
        assert!(split_offers("").is_empty());
        assert!(split_offers("  \n ").is_empty());
    }

    #[test]
    fn marker_only_at_line_start() {
        // "$1. 5" mid-line is not an ordinal marker.
        assert_eq!(split_offers("1. Cheap - $1. 5 stops").len(), 1);
    }

    #[test]
    fn offers_on_one_line_stay_together() {
        assert_eq!(
            split_offers("1. Delta – $200 2. United – $150"),
            vec!["Delta – $200 2. United – $150"]
        );
    }

    #[test]
    fn label_value_to_end_of_line() {
        let chunk = "Airline: Delta\nPrice: $450";
        assert_eq!(label_value(chunk, "Airline:").as_deref(), Some("Delta"));
        assert_eq!(label_value(chunk, "Price:").as_deref(), Some("$450"));
        assert_eq!(label_value(chunk, "Time:"), None);
    }

    #[test]
    fn label_value_cut_at_separator() {
        let chunk = "Delta – $200 ... Duration: 5h ... Departs: 10:00 … Arrives: 15:00";
        assert_eq!(label_value(chunk, "Duration:").as_deref(), Some("5h"));
        assert_eq!(label_value(chunk, "Departs:").as_deref(), Some("10:00"));
        assert_eq!(label_value(chunk, "Arrives:").as_deref(), Some("15:00"));
    }

    #[test]
    fn label_value_requires_word_start() {
        assert_eq!(label_value("GoTo: nowhere\nTo: Paris", "To:").as_deref(), Some("Paris"));
        assert_eq!(label_value("GoTo: nowhere", "To:"), None);
    }

    #[test]
    fn empty_label_value_is_none() {
        assert_eq!(label_value("Price:   \nAirline: KLM", "Price:"), None);
        assert_eq!(label_value("Price: **  **", "Price:"), None);
    }
}
