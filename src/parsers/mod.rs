//! Text-to-value parsers for listing fields.
//!
//! Every parser is total: malformed input leaves the field unset.

pub mod amount;
pub mod title;

pub use amount::{parse_mileage, parse_price, PriceParts};
pub use title::{parse_title, TitleParts};
