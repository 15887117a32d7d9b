use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::chunks::{first_label, label_value, split_offers};
use super::links::{booking_link, labeled_link};
use super::or_sentinel;
use crate::parser::sanitize::sanitize;
use crate::parser::sections::Section;

static STARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*(\d+(?:\.\d+)?)\s*-?\s*stars?\s*\)").unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());
// "- 150 USD"
static PRICE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-–]\s*(\d[\d.,]*)\s+([A-Z]{3})\b").unwrap());
// "$150", "150 EUR", "€ 1,200.00"
static PRICE_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([$€£¥])?\s*(\d[\d.,]*)\s*([A-Z]{3})?\b").unwrap());

/// Highest star count a record carries; larger ratings are capped.
pub const MAX_STARS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecord {
    pub name: String,
    pub stars: u32,
    pub price: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
}

/// One record per numbered offer, in source order.
pub fn extract(section: &Section) -> Vec<HotelRecord> {
    split_offers(&section.text())
        .into_iter()
        .map(parse_offer)
        .collect()
}

fn parse_offer(chunk: &str) -> HotelRecord {
    let stars_caps = STARS_RE.captures(chunk);

    let name = stars_caps
        .as_ref()
        .and_then(|c| {
            let before = &chunk[..c.get(0).map_or(0, |m| m.start())];
            let name = sanitize(before.lines().last().unwrap_or(""));
            if name.is_empty() {
                None
            } else {
                Some(name)
            }
        })
        .or_else(|| first_label(chunk, &["Hotel:", "Name:"]));

    let stars = stars_caps
        .as_ref()
        .map(|c| c[1].to_string())
        .or_else(|| {
            label_value(chunk, "Rating:")
                .and_then(|r| NUMBER_RE.find(&r).map(|m| m.as_str().to_string()))
        })
        .map_or(0, |rating| floor_rating(&rating));

    let (price, currency) = label_value(chunk, "Price:")
        .map(|value| split_price(&value))
        .or_else(|| {
            PRICE_SUFFIX_RE
                .captures(chunk)
                .map(|c| (Some(trim_amount(&c[1])), Some(c[2].to_string())))
        })
        .unwrap_or((None, None));

    let amenities = label_value(chunk, "Amenities:")
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    HotelRecord {
        name: or_sentinel(name),
        stars,
        price: or_sentinel(price),
        currency: or_sentinel(currency),
        booking_link: labeled_link(chunk).or_else(|| booking_link(chunk)),
        location: label_value(chunk, "Location:"),
        amenities,
    }
}

/// Star count is the rating floored, capped at `MAX_STARS`.
fn floor_rating(rating: &str) -> u32 {
    rating
        .parse::<f64>()
        .map_or(0, |r| (r.floor() as u32).min(MAX_STARS))
}

/// Amount and currency from a labeled price. Without digits the whole value
/// is kept as the price.
fn split_price(value: &str) -> (Option<String>, Option<String>) {
    match PRICE_VALUE_RE.captures(value) {
        Some(c) => {
            let currency = c
                .get(3)
                .or_else(|| c.get(1))
                .map(|m| m.as_str().to_string());
            (Some(trim_amount(&c[2])), currency)
        }
        None => (Some(value.to_string()), None),
    }
}

fn trim_amount(amount: &str) -> String {
    amount.trim_end_matches(['.', ',']).to_string()
}
