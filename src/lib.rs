pub mod export;
pub mod parser;
pub mod render;

pub use parser::extract::{FlightRecord, HotelRecord, ItineraryDay, StructuredBlock, WeatherReport};
pub use parser::sections::{Section, SectionKind};
pub use parser::{process_response, ChatReply, ParsedResponse};
