use super::KmlColor;
use crate::{LayerType, xml::XmlElement};

/// Document-level style shared by all placemarks of one category.
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultStyle {
	pub id: &'static str,
	pub line: KmlColor,
	pub poly: KmlColor,
	pub width: f64,
	pub fill: bool,
}

impl DefaultStyle {
	/// The default style of a known category.
	pub fn for_layer(layer_type: &LayerType) -> Option<DefaultStyle> {
		let (line, poly) = match layer_type {
			LayerType::FlightGeography => (
				KmlColor::new(0xff, 0x00, 0x00, 0xff),
				KmlColor::new(0x4d, 0x00, 0x00, 0xff),
			),
			LayerType::AssembliesHorizon => (
				KmlColor::new(0xff, 0x00, 0xff, 0x00),
				KmlColor::new(0x4d, 0x00, 0xff, 0x00),
			),
			LayerType::AdjacentArea => (
				KmlColor::new(0xff, 0xff, 0xa5, 0x00),
				KmlColor::new(0x4d, 0xff, 0xa5, 0x00),
			),
			LayerType::Unknown(_) => return None,
		};
		Some(DefaultStyle {
			id: layer_type.style_id()?,
			line,
			poly,
			width: 2.0,
			fill: true,
		})
	}

	pub fn all() -> Vec<DefaultStyle> {
		LayerType::KNOWN.iter().filter_map(DefaultStyle::for_layer).collect()
	}

	pub fn to_element(&self) -> XmlElement {
		let mut poly_style =
			XmlElement::new("PolyStyle").with_child(XmlElement::new_text("color", &self.poly.to_string()));
		if !self.fill {
			poly_style.push(XmlElement::new_text("fill", "0"));
		}
		XmlElement::new("Style")
			.with_attribute("id", self.id)
			.with_child(
				XmlElement::new("LineStyle")
					.with_child(XmlElement::new_text("color", &self.line.to_string()))
					.with_child(XmlElement::new_text("width", &self.width.to_string())),
			)
			.with_child(poly_style)
	}
}

/// Appends the default style of every known category to a KML `Document`, skipping styles whose
/// id is already defined there. Returns the number of styles added.
pub fn ensure_default_styles(document: &mut XmlElement) -> usize {
	let mut added = 0;
	for style in DefaultStyle::all() {
		let exists = document
			.children_named("Style")
			.any(|existing| existing.attribute("id") == Some(style.id));
		if !exists {
			document.push(style.to_element());
			added += 1;
		}
	}
	added
}
