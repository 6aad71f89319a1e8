//! A minimal, serialization-agnostic XML tree.
//!
//! The writer builds an [`XmlElement`] tree and renders it in one pass; the reader parses a
//! document into the same tree before interpreting it. Element names are compared by their local
//! part, so `kml:Placemark` and `Placemark` are treated alike.

mod element;
mod parse;
mod render;

pub use element::*;
pub use parse::*;
pub use render::*;
