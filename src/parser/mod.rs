pub mod extract;
pub mod sanitize;
pub mod sections;

use serde::{Deserialize, Serialize};
use tracing::debug;

use extract::{FlightRecord, HotelRecord, ItineraryDay, StructuredBlock, WeatherReport};
use sections::{Section, SectionKind};

/// Message shown in place of a reply when the backend could not be reached.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// JSON envelope returned by the chat backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedResponse {
    pub sections: Vec<Section>,
    pub blocks: Vec<StructuredBlock>,
}

impl ParsedResponse {
    /// Synthetic reply substituted by callers when the transport fails.
    pub fn transport_error() -> Self {
        let section = Section {
            kind: SectionKind::Text,
            title: None,
            lines: vec![TRANSPORT_ERROR_MESSAGE.to_string()],
        };
        let blocks = vec![extract::structure(&section)];
        Self {
            sections: vec![section],
            blocks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn flights(&self) -> impl Iterator<Item = &FlightRecord> {
        self.blocks.iter().flat_map(|b| match b {
            StructuredBlock::Flights(records) => records.as_slice(),
            _ => &[][..],
        })
    }

    pub fn hotels(&self) -> impl Iterator<Item = &HotelRecord> {
        self.blocks.iter().flat_map(|b| match b {
            StructuredBlock::Hotels(records) => records.as_slice(),
            _ => &[][..],
        })
    }

    pub fn days(&self) -> impl Iterator<Item = &ItineraryDay> {
        self.blocks.iter().flat_map(|b| match b {
            StructuredBlock::Itinerary(days) => days.as_slice(),
            _ => &[][..],
        })
    }

    pub fn weather(&self) -> impl Iterator<Item = &WeatherReport> {
        self.blocks.iter().flat_map(|b| match b {
            StructuredBlock::Weather(reports) => reports.as_slice(),
            _ => &[][..],
        })
    }
}

/// Two-pass pipeline: raw reply → sections → structured blocks.
pub fn process_response(raw: &str) -> ParsedResponse {
    let sections = sections::segment(raw);
    let blocks = extract::extract_all(&sections);
    debug!(
        sections = sections.len(),
        blocks = blocks.len(),
        "structured chat reply"
    );
    ParsedResponse { sections, blocks }
}
