use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::parser::sanitize::sanitize;
use crate::parser::sections::Section;

// "Day N" anywhere at a word start. At the start of a line the marker also
// takes any emoji, bullet or emphasis prefix.
static DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)(?:^[^\p{L}\p{N}\n]*)?\bday[ \t]*(\d+)").unwrap());
static PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[-•]\s*)?[*#]*\s*\b(morning|afternoon|evening)\b\**\s*:").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    Morning,
    Afternoon,
    Evening,
}

struct PeriodLabel {
    period: Period,
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
}

impl ItineraryDay {
    pub fn has_schedule(&self) -> bool {
        !(self.morning.is_empty() && self.afternoon.is_empty() && self.evening.is_empty())
    }
}

struct DayChunk<'a> {
    number: Option<u32>,
    title: Option<String>,
    body: &'a str,
}

/// One entry per `Day N` chunk, in source order. Day numbers are taken as
/// written; they may repeat or skip.
pub fn extract(section: &Section) -> Vec<ItineraryDay> {
    let text = section.text();
    split_days(&text)
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let labels = period_labels(chunk.body);
            ItineraryDay {
                day_number: chunk.number.unwrap_or(i as u32 + 1),
                title: chunk.title,
                morning: period_span(
                    chunk.body,
                    &labels,
                    Period::Morning,
                    &[Period::Afternoon, Period::Evening],
                ),
                afternoon: period_span(chunk.body, &labels, Period::Afternoon, &[Period::Evening]),
                evening: period_span(chunk.body, &labels, Period::Evening, &[]),
            }
        })
        .collect()
}

/// Text ahead of the first marker counts as a day only when it carries a
/// period label; otherwise it is introductory prose.
fn split_days(text: &str) -> Vec<DayChunk<'_>> {
    let markers: Vec<_> = DAY_RE.captures_iter(text).collect();
    let mut chunks = Vec::with_capacity(markers.len() + 1);

    let first_start = markers
        .first()
        .and_then(|c| c.get(0))
        .map_or(text.len(), |m| m.start());
    let preamble = &text[..first_start];
    if PERIOD_RE.is_match(preamble) {
        chunks.push(DayChunk {
            number: None,
            title: None,
            body: preamble,
        });
    }

    for (i, caps) in markers.iter().enumerate() {
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        let title_end = text[number.end()..end]
            .find('\n')
            .map_or(end, |at| number.end() + at);
        chunks.push(DayChunk {
            number: number.as_str().parse().ok(),
            title: day_title(&text[number.end()..title_end]),
            body: &text[whole.start()..end],
        });
    }

    chunks
}

/// "Day 1: Arrival in Paris" → "Arrival in Paris". Inline period labels end
/// the title.
fn day_title(rest: &str) -> Option<String> {
    let rest = PERIOD_RE.find(rest).map_or(rest, |m| &rest[..m.start()]);
    let rest = rest.trim_start_matches(|c: char| matches!(c, ':' | '-' | '–' | '*') || c.is_whitespace());
    let title = sanitize(rest.trim_end_matches(|c: char| matches!(c, '-' | '–') || c.is_whitespace()));
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn period_labels(chunk: &str) -> Vec<PeriodLabel> {
    PERIOD_RE
        .captures_iter(chunk)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let period = match caps[1].to_ascii_lowercase().as_str() {
                "morning" => Period::Morning,
                "afternoon" => Period::Afternoon,
                _ => Period::Evening,
            };
            Some(PeriodLabel {
                period,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Span after the first `want` label up to the next label in `stops`, or the
/// end of the chunk.
fn period_span(chunk: &str, labels: &[PeriodLabel], want: Period, stops: &[Period]) -> String {
    let Some(open) = labels.iter().position(|l| l.period == want) else {
        return String::new();
    };
    let start = labels[open].end;
    let end = labels[open + 1..]
        .iter()
        .find(|l| stops.contains(&l.period))
        .map_or(chunk.len(), |l| l.start);
    sanitize(&chunk[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sections::{segment, SectionKind};

    fn itinerary_section(body: &str) -> Section {
        Section {
            kind: SectionKind::Itinerary,
            title: None,
            lines: body.lines().map(|l| l.trim().to_string()).filter(|l| !l.is_empty()).collect(),
        }
    }

    #[test]
    fn two_days_with_periods() {
        let section = itinerary_section(
            "Day 1: Arrival\nMorning: **Eiffel Tower**\nAfternoon: Louvre\nEvening: Seine *cruise*\nDay 2\nMorning: Montmartre\nAfternoon: Orsay\nEvening: Bistro dinner",
        );
        let days = extract(&section);
        assert_eq!(days.len(), 2);
        assert_eq!(
            days[0],
            ItineraryDay {
                day_number: 1,
                title: Some("Arrival".into()),
                morning: "Eiffel Tower".into(),
                afternoon: "Louvre".into(),
                evening: "Seine cruise".into(),
            }
        );
        assert_eq!(days[1].day_number, 2);
        assert_eq!(days[1].title, None);
        assert_eq!(days[1].morning, "Montmartre");
        assert_eq!(days[1].evening, "Bistro dinner");
    }

    #[test]
    fn decorated_markers_and_labels() {
        let section = itinerary_section(
            "🗓️ **Day 1: Paris**\n- **Morning:** Croissants at a café\n  Walk the Marais\n- **Afternoon:** Musée d'Orsay\n- **Evening:** Dinner in Saint-Germain",
        );
        let days = extract(&section);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].title.as_deref(), Some("Paris"));
        assert_eq!(days[0].morning, "Croissants at a café\nWalk the Marais");
        assert_eq!(days[0].afternoon, "Musée d'Orsay");
        assert_eq!(days[0].evening, "Dinner in Saint-Germain");
    }

    #[test]
    fn one_line_periods() {
        let days = extract(&itinerary_section("Day 4 - Morning: hike Afternoon: picnic Evening: stars"));
        assert_eq!(days[0].day_number, 4);
        assert_eq!(days[0].title, None);
        assert_eq!(days[0].morning, "hike");
        assert_eq!(days[0].afternoon, "picnic");
        assert_eq!(days[0].evening, "stars");
    }

    #[test]
    fn inline_days_on_one_line() {
        let days = extract(&itinerary_section(
            "Day 1 Morning: Louvre Afternoon: Orsay Evening: Seine Day 2 Morning: Montmartre Afternoon: Marais Evening: Opera",
        ));
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day_number, 1);
        assert_eq!(days[0].evening, "Seine");
        assert_eq!(days[1].day_number, 2);
        assert_eq!(days[1].title, None);
        assert_eq!(days[1].morning, "Montmartre");
        assert_eq!(days[1].evening, "Opera");
    }

    #[test]
    fn inline_marker_ends_title() {
        let days = extract(&itinerary_section("Day 1: Arrival Day 2: Louvre\nMorning: museum"));
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].title.as_deref(), Some("Arrival"));
        assert_eq!(days[1].title.as_deref(), Some("Louvre"));
        assert_eq!(days[1].morning, "museum");
    }

    #[test]
    fn day_inside_a_word_is_not_a_marker() {
        let days = extract(&itinerary_section("Day 1\nMorning: Holiday 5 market\nSunday 2 brunch"));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].morning, "Holiday 5 market\nSunday 2 brunch");
    }

    #[test]
    fn morning_stops_at_evening_when_afternoon_missing() {
        let days = extract(&itinerary_section("Day 1\nMorning: beach\nEvening: tapas"));
        assert_eq!(days[0].morning, "beach");
        assert_eq!(days[0].afternoon, "");
        assert_eq!(days[0].evening, "tapas");
    }

    #[test]
    fn day_without_labels_is_kept() {
        let days = extract(&itinerary_section("Day 1: Travel day\nFly in and rest.\nDay 2: Explore"));
        assert_eq!(days.len(), 2);
        assert!(!days[0].has_schedule());
        assert_eq!(days[0].title.as_deref(), Some("Travel day"));
        assert_eq!(days[1].day_number, 2);
    }

    #[test]
    fn numbers_taken_as_written() {
        let days = extract(&itinerary_section("Day 3\nMorning: a\nDay 3\nMorning: b\nDay 1\nMorning: c"));
        let numbers: Vec<u32> = days.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, vec![3, 3, 1]);
    }

    #[test]
    fn unmarked_schedule_uses_position() {
        let days = extract(&itinerary_section("Morning: museum\nAfternoon: park"));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day_number, 1);
        assert_eq!(days[0].afternoon, "park");
    }

    #[test]
    fn preamble_prose_is_not_a_day() {
        let days = extract(&itinerary_section("A relaxed 2-day plan.\nDay 1\nMorning: x\nDay 2\nMorning: y"));
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day_number, 1);
        assert_eq!(days[1].morning, "y");
    }

    #[test]
    fn preamble_with_labels_shifts_positions() {
        let days = extract(&itinerary_section("Morning: arrive\nDay 7\nEvening: party"));
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day_number, 1);
        assert_eq!(days[0].morning, "arrive");
        assert_eq!(days[1].day_number, 7);
    }

    #[test]
    fn huge_day_number_falls_back_to_position() {
        let days = extract(&itinerary_section("Day 99999999999\nMorning: x"));
        assert_eq!(days[0].day_number, 1);
    }

    #[test]
    fn no_days_in_plain_prose() {
        assert!(extract(&itinerary_section("Enjoy your trip!")).is_empty());
    }

    #[test]
    fn fixture_itinerary() {
        let raw = std::fs::read_to_string("tests/fixtures/full_plan.txt").unwrap();
        let section = segment(&raw)
            .into_iter()
            .find(|s| s.kind == SectionKind::Itinerary)
            .unwrap();
        let days = extract(&section);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].title.as_deref(), Some("Arrival in Paris"));
        assert!(days.iter().all(|d| d.has_schedule()));
        assert!(days.iter().all(|d| !d.morning.contains('*')));
    }
}
