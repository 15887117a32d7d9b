pub mod chunks;
pub mod flights;
pub mod hotels;
pub mod itinerary;
pub mod links;
pub mod weather;

use serde::Serialize;

use super::sanitize::sanitize;
use super::sections::{Section, SectionKind};

pub use flights::FlightRecord;
pub use hotels::HotelRecord;
pub use itinerary::ItineraryDay;
pub use weather::WeatherReport;

/// Placeholder for a field that was looked for and not found.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "lowercase")]
pub enum StructuredBlock {
    Text { paragraphs: Vec<String> },
    Flights(Vec<FlightRecord>),
    Hotels(Vec<HotelRecord>),
    Itinerary(Vec<ItineraryDay>),
    Weather(Vec<WeatherReport>),
}

type Extractor = fn(&Section) -> StructuredBlock;

/// Section kind → extractor. Kinds without an entry render as text.
const EXTRACTORS: &[(SectionKind, Extractor)] = &[
    (SectionKind::Flight, flight_block),
    (SectionKind::Hotel, hotel_block),
    (SectionKind::Itinerary, itinerary_block),
    (SectionKind::Weather, weather_block),
];

fn flight_block(section: &Section) -> StructuredBlock {
    StructuredBlock::Flights(flights::extract(section))
}

fn hotel_block(section: &Section) -> StructuredBlock {
    StructuredBlock::Hotels(hotels::extract(section))
}

fn itinerary_block(section: &Section) -> StructuredBlock {
    StructuredBlock::Itinerary(itinerary::extract(section))
}

fn weather_block(section: &Section) -> StructuredBlock {
    StructuredBlock::Weather(weather::extract(section))
}

fn text_block(section: &Section) -> StructuredBlock {
    let paragraphs = section
        .lines
        .iter()
        .map(|line| sanitize(line))
        .filter(|p| !p.is_empty())
        .collect();
    StructuredBlock::Text { paragraphs }
}

/// Structure one section with the extractor registered for its kind.
pub fn structure(section: &Section) -> StructuredBlock {
    EXTRACTORS
        .iter()
        .find(|(kind, _)| *kind == section.kind)
        .map_or_else(|| text_block(section), |(_, extractor)| extractor(section))
}

pub fn extract_all(sections: &[Section]) -> Vec<StructuredBlock> {
    sections.iter().map(structure).collect()
}

pub(crate) fn or_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sections::segment;

    fn parse(fixture: &str) -> Vec<Section> {
        let raw = std::fs::read_to_string(format!("tests/fixtures/{}.txt", fixture)).unwrap();
        segment(&raw)
    }

    #[test]
    fn every_kind_dispatches_to_its_block() {
        let blocks = extract_all(&parse("full_plan"));
        let tags: Vec<&str> = blocks
            .iter()
            .map(|b| match b {
                StructuredBlock::Text { .. } => "text",
                StructuredBlock::Flights(_) => "flights",
                StructuredBlock::Hotels(_) => "hotels",
                StructuredBlock::Itinerary(_) => "itinerary",
                StructuredBlock::Weather(_) => "weather",
            })
            .collect();
        assert_eq!(tags, vec!["itinerary", "weather", "weather", "flights", "hotels"]);
    }

    #[test]
    fn text_section_keeps_paragraphs() {
        let sections = parse("greeting");
        assert_eq!(sections.len(), 1);
        match structure(&sections[0]) {
            StructuredBlock::Text { paragraphs } => {
                assert_eq!(paragraphs.len(), 2);
                assert!(paragraphs.iter().all(|p| !p.contains('*')));
            }
            other => panic!("expected text block, got {:?}", other),
        }
    }

    #[test]
    fn labeled_flight_cards() {
        let sections = parse("labeled_offers");
        let flights: Vec<_> = sections
            .iter()
            .filter(|s| s.kind == SectionKind::Flight)
            .flat_map(flights::extract)
            .collect();
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].airline, "Lufthansa");
        assert_eq!(flights[0].departure, "Frankfurt 08:15");
        assert_eq!(flights[1].arrival, NOT_AVAILABLE);
    }

    #[test]
    fn labeled_hotel_cards() {
        let sections = parse("labeled_offers");
        let hotels: Vec<_> = sections
            .iter()
            .filter(|s| s.kind == SectionKind::Hotel)
            .flat_map(hotels::extract)
            .collect();
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0].name, "Hotel Adlon Kempinski");
        assert_eq!(hotels[0].stars, 5);
        assert_eq!(hotels[1].location.as_deref(), Some("Mitte"));
    }

    #[test]
    fn block_json_shape() {
        let block = StructuredBlock::Hotels(vec![]);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["kind"], "hotels");
        assert!(json["records"].as_array().unwrap().is_empty());
    }
}
