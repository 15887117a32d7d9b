use serde::Serialize;

use super::sanitize::sanitize;

/// Canonical header keywords, checked in order against the lowercased line.
const HEADER_KEYWORDS: &[(&str, SectionKind)] = &[
    ("flight options", SectionKind::Flight),
    ("flights:", SectionKind::Flight),
    ("hotel options", SectionKind::Hotel),
    ("hotels:", SectionKind::Hotel),
    ("itinerary", SectionKind::Itinerary),
    ("weather", SectionKind::Weather),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Text,
    Flight,
    Hotel,
    Itinerary,
    Weather,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    /// Header line that opened the section; `None` for the leading run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub lines: Vec<String>,
}

impl Section {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Scanner state threaded through the fold. Each step consumes the previous
/// state and returns the next one.
struct Scan {
    done: Vec<Section>,
    kind: SectionKind,
    title: Option<String>,
    lines: Vec<String>,
}

impl Scan {
    fn start() -> Self {
        Self {
            done: Vec::new(),
            kind: SectionKind::Text,
            title: None,
            lines: Vec::new(),
        }
    }

    fn step(self, line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return self;
        }
        match detect_header(line) {
            Some(kind) => Self {
                done: self.flush(),
                kind,
                title: Some(sanitize(line)),
                lines: Vec::new(),
            },
            None => {
                let Self { done, kind, title, mut lines } = self;
                lines.push(line.to_string());
                Self { done, kind, title, lines }
            }
        }
    }

    /// Completed sections plus the accumulator, when it holds anything.
    fn flush(self) -> Vec<Section> {
        let Self { mut done, kind, title, lines } = self;
        if !lines.is_empty() {
            done.push(Section { kind, title, lines });
        }
        done
    }
}

/// Partition a raw reply into typed sections, in source order.
pub fn segment(raw: &str) -> Vec<Section> {
    raw.lines().fold(Scan::start(), Scan::step).flush()
}

/// Classify a line as a section header: any line containing a canonical
/// keyword, whatever else it says.
pub fn detect_header(line: &str) -> Option<SectionKind> {
    let lower = line.to_lowercase();
    HEADER_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, kind)| *kind)
}

// ── Tests ──
