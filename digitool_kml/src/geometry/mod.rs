//! Geometry model and its conversion to and from KML geometry elements.

mod converter;
mod types;

pub use converter::*;
pub use types::*;
