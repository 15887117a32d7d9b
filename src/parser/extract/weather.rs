use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::chunks::label_value;
use super::or_sentinel;
use crate::parser::sections::Section;

// "Weather Forecast for Paris on 2025-08-28:"
static FORECAST_FOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfor\s+([^\n]+?)\s+on\s+([^\s:]+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub location: String,
    pub date: String,
    pub description: String,
    pub max_temp: String,
    pub min_temp: String,
    pub precipitation: String,
}

/// A weather section carries a single forecast; its header names the place
/// and date.
pub fn extract(section: &Section) -> Vec<WeatherReport> {
    let text = section.text();
    let place = section
        .title
        .as_deref()
        .and_then(|title| FORECAST_FOR_RE.captures(title))
        .or_else(|| FORECAST_FOR_RE.captures(&text))
        .map(|c| (c[1].to_string(), c[2].trim_end_matches('.').to_string()));
    let (location, date) = match place {
        Some((location, date)) => (Some(location), Some(date)),
        None => (None, None),
    };

    vec![WeatherReport {
        location: or_sentinel(location),
        date: or_sentinel(date),
        description: or_sentinel(label_value(&text, "Description:")),
        max_temp: or_sentinel(label_value(&text, "Max Temperature:")),
        min_temp: or_sentinel(label_value(&text, "Min Temperature:")),
        precipitation: or_sentinel(label_value(&text, "Precipitation:")),
    }]
}
