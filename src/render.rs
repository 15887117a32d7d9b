use crate::parser::extract::hotels::MAX_STARS;
use crate::parser::extract::links::link_domain;
use crate::parser::extract::{FlightRecord, HotelRecord, ItineraryDay, StructuredBlock, WeatherReport};
use crate::parser::ParsedResponse;

const STAR: &str = "⭐";
const DEFAULT_ICON: &str = "📍";

/// Activity icons, first match wins. Keywords are matched on the lowercased
/// activity text.
const ACTIVITY_ICONS: &[(&[&str], &str)] = &[
    (&["breakfast", "lunch", "dinner"], "🍽️"),
    (&["museum", "gallery"], "🏛️"),
    (&["park", "garden"], "🌳"),
    (&["shopping"], "🛍️"),
    (&["beach"], "🏖️"),
    (&["night", "evening"], "🌙"),
    (&["morning"], "🌅"),
    (&["tour"], "🚶"),
    (&["airport", "flight"], "✈️"),
];

pub fn star_glyphs(stars: u32) -> String {
    STAR.repeat(stars.min(MAX_STARS) as usize)
}

pub fn activity_icon(activity: &str) -> &'static str {
    let lower = activity.to_lowercase();
    ACTIVITY_ICONS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(DEFAULT_ICON, |(_, icon)| *icon)
}

/// Split a period span into its activities: one per sentence or `;` clause.
pub fn activities(period: &str) -> Vec<&str> {
    period
        .split(';')
        .flat_map(|clause| clause.split(". "))
        .map(|a| a.trim().trim_end_matches('.').trim())
        .filter(|a| !a.is_empty())
        .collect()
}

fn flight_card(f: &FlightRecord) -> Vec<String> {
    let mut out = vec![
        format!("✈️  {}  {}", f.airline, f.price),
        format!("    {} → {}  ({})", f.departure, f.arrival, f.duration),
    ];
    if let Some(link) = &f.booking_link {
        out.push(format!("    Book on {}: {}", link_domain(link), link));
    }
    out
}

fn hotel_card(h: &HotelRecord) -> Vec<String> {
    let mut out = vec![format!("🏨 {} {}", h.name, star_glyphs(h.stars))];
    out.push(format!("    {} {}", h.price, h.currency));
    if let Some(location) = &h.location {
        out.push(format!("    {}", location));
    }
    if !h.amenities.is_empty() {
        out.push(format!("    {}", h.amenities.join(" · ")));
    }
    if let Some(link) = &h.booking_link {
        out.push(format!("    Book on {}: {}", link_domain(link), link));
    }
    out
}

fn day_card(d: &ItineraryDay) -> Vec<String> {
    let mut out = vec![match &d.title {
        Some(title) => format!("Day {}: {}", d.day_number, title),
        None => format!("Day {}", d.day_number),
    }];
    for (label, span) in [("Morning", &d.morning), ("Afternoon", &d.afternoon), ("Evening", &d.evening)] {
        let items = activities(span);
        if items.is_empty() {
            continue;
        }
        out.push(format!("  {}", label));
        out.extend(items.iter().map(|a| format!("    {} {}", activity_icon(a), a)));
    }
    out
}

fn weather_card(w: &WeatherReport) -> Vec<String> {
    vec![
        format!("🌤️  {} on {}", w.location, w.date),
        format!("    {}", w.description),
        format!(
            "    max {}  min {}  precipitation {}",
            w.max_temp, w.min_temp, w.precipitation
        ),
    ]
}

/// Terminal rendering of one block, one card per record.
pub fn render_block(block: &StructuredBlock) -> String {
    let lines: Vec<String> = match block {
        StructuredBlock::Text { paragraphs } => paragraphs.clone(),
        StructuredBlock::Flights(records) => records.iter().flat_map(flight_card).collect(),
        StructuredBlock::Hotels(records) => records.iter().flat_map(hotel_card).collect(),
        StructuredBlock::Itinerary(days) => days.iter().flat_map(day_card).collect(),
        StructuredBlock::Weather(reports) => reports.iter().flat_map(weather_card).collect(),
    };
    lines.join("\n")
}

pub fn render_response(parsed: &ParsedResponse) -> String {
    parsed
        .blocks
        .iter()
        .map(render_block)
        .filter(|b| !b.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
