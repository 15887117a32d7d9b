use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::chunks::{label_value, split_offers};
use super::links::booking_link;
use super::or_sentinel;
use crate::parser::sanitize::sanitize;
use crate::parser::sections::Section;

// "<airline> – $<price>" on the first line of an offer.
static DASH_FORM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+[-–]\s+\$\s*(\d[\d.,]*)").unwrap());
static RANGE_SEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+[-–]\s+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub airline: String,
    pub price: String,
    pub duration: String,
    pub departure: String,
    pub arrival: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
}

/// One record per numbered offer, in source order.
pub fn extract(section: &Section) -> Vec<FlightRecord> {
    split_offers(&section.text())
        .into_iter()
        .map(parse_offer)
        .collect()
}

fn parse_offer(chunk: &str) -> FlightRecord {
    let first_line = chunk.lines().next().unwrap_or("");
    let dash = DASH_FORM_RE.captures(first_line);

    let airline = label_value(chunk, "Airline:").or_else(|| {
        dash.as_ref()
            .map(|c| sanitize(&c[1]))
            .filter(|name| !name.is_empty())
    });
    let price = label_value(chunk, "Price:").or_else(|| {
        dash.as_ref()
            .map(|c| c[2].trim_end_matches(['.', ',']).to_string())
    });

    let (time_from, time_to) = label_value(chunk, "Time:")
        .map(|time| split_range(&time))
        .unwrap_or((None, None));

    let departure = match (label_value(chunk, "From:"), time_from) {
        (Some(place), Some(time)) => Some(format!("{place} {time}")),
        (Some(place), None) => Some(place),
        (None, time) => label_value(chunk, "Departs:").or(time),
    };
    let arrival = match (label_value(chunk, "To:"), time_to) {
        (Some(place), Some(time)) => Some(format!("{place} {time}")),
        (Some(place), None) => Some(place),
        (None, time) => label_value(chunk, "Arrives:").or(time),
    };

    FlightRecord {
        airline: or_sentinel(airline),
        price: or_sentinel(price),
        duration: or_sentinel(label_value(chunk, "Duration:")),
        departure: or_sentinel(departure),
        arrival: or_sentinel(arrival),
        booking_link: booking_link(chunk),
    }
}

/// Split "t1 - t2"; a value without a separator is all departure.
fn split_range(time: &str) -> (Option<String>, Option<String>) {
    let mut parts = RANGE_SEP_RE.splitn(time, 2).map(str::trim).filter(|p| !p.is_empty());
    let from = parts.next().map(str::to_string);
    let to = parts.next().map(str::to_string);
    (from, to)
}
