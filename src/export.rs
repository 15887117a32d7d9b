use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::parser::sanitize::sanitize;
use crate::parser::sections::SectionKind;
use crate::parser::ParsedResponse;

static DESTINATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bto ([A-Za-z ]+)").unwrap());
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*days?\b").unwrap());

const DEFAULT_DESTINATION: &str = "Your Trip";
const DEFAULT_DURATION: &str = "N/A";
const PERIOD_WORDS: &[&str] = &["Morning", "Afternoon", "Evening"];

/// Destination and trip length guessed from the traveller's own message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripHints {
    pub destination: Option<String>,
    pub duration: Option<String>,
}

impl TripHints {
    pub fn from_message(message: &str) -> Self {
        let destination = DESTINATION_RE
            .captures(message)
            .map(|c| c[1].trim().to_string())
            .filter(|d| !d.is_empty());
        let duration = DURATION_RE.captures(message).map(|c| c[1].to_string());
        Self { destination, duration }
    }

    /// Keep hints already known; fill the gaps from a later message.
    pub fn merge(self, later: TripHints) -> Self {
        Self {
            destination: self.destination.or(later.destination),
            duration: self.duration.or(later.duration),
        }
    }
}

/// Body of the PDF download request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    pub itinerary: String,
    pub destination: String,
    pub duration: String,
}

impl ExportRequest {
    /// `None` when the reply carried no itinerary to export.
    pub fn new(parsed: &ParsedResponse, hints: &TripHints) -> Option<Self> {
        let itinerary = itinerary_text(parsed);
        if itinerary.is_empty() {
            return None;
        }
        Some(Self {
            itinerary,
            destination: hints
                .destination
                .clone()
                .unwrap_or_else(|| DEFAULT_DESTINATION.to_string()),
            duration: hints
                .duration
                .clone()
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        })
    }
}

/// Itinerary sections joined back into one text block, for the PDF export.
pub fn itinerary_text(parsed: &ParsedResponse) -> String {
    let joined = parsed
        .sections
        .iter()
        .filter(|s| s.kind == SectionKind::Itinerary)
        .map(|s| s.text())
        .collect::<Vec<_>>()
        .join("\n\n");
    sanitize(&joined)
}

pub fn export_filename(destination: Option<&str>, date: NaiveDate) -> String {
    let slug = destination
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("trip");
    format!("itinerary_{}_{}.pdf", slug, date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    DayHeading,
    PeriodHeading,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportLine {
    pub style: LineStyle,
    pub text: String,
}

/// Lines of an itinerary block as the PDF writer sees them: ASCII only,
/// blanks skipped, each tagged with the style it is drawn in.
pub fn layout_lines(itinerary: &str) -> Vec<ExportLine> {
    itinerary
        .lines()
        .map(|line| line.chars().filter(char::is_ascii).collect::<String>())
        .filter(|line| !line.trim().is_empty())
        .map(|text| {
            let style = if text.contains("Day") {
                LineStyle::DayHeading
            } else if PERIOD_WORDS.iter().any(|w| text.contains(w)) {
                LineStyle::PeriodHeading
            } else {
                LineStyle::Body
            };
            ExportLine { style, text }
        })
        .collect()
}
