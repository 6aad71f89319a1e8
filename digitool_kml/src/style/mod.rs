//! Style resolution between the internal style record, simplestyle properties and native KML
//! `Style` elements.

mod color;
mod defaults;

pub use color::*;
pub use defaults::*;

use crate::xml::XmlElement;
use serde::{Deserialize, Serialize};

/// Leaflet-like path style of a feature.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub weight: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub opacity: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fill_color: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fill_opacity: Option<f64>,
}

/// The simplestyle property set.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SimpleStyle {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stroke: Option<String>,
	#[serde(default, rename = "stroke-width", skip_serializing_if = "Option::is_none")]
	pub stroke_width: Option<f64>,
	#[serde(default, rename = "stroke-opacity", skip_serializing_if = "Option::is_none")]
	pub stroke_opacity: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fill: Option<String>,
	#[serde(default, rename = "fill-opacity", skip_serializing_if = "Option::is_none")]
	pub fill_opacity: Option<f64>,
}

impl SimpleStyle {
	pub fn is_empty(&self) -> bool {
		*self == SimpleStyle::default()
	}
}

/// Maps a style record to simplestyle properties. The fill colour falls back to the stroke colour.
pub fn to_document_style(style: &Style) -> SimpleStyle {
	SimpleStyle {
		stroke: style.color.clone(),
		stroke_width: style.weight,
		stroke_opacity: style.opacity,
		fill: style.fill_color.clone().or_else(|| style.color.clone()),
		fill_opacity: style.fill_opacity,
	}
}

/// Maps simplestyle properties back to a style record.
pub fn to_native_style(properties: &SimpleStyle) -> Style {
	Style {
		color: properties.stroke.clone(),
		weight: properties.stroke_width,
		opacity: properties.stroke_opacity,
		fill_color: properties.fill.clone(),
		fill_opacity: properties.fill_opacity,
	}
}

impl Style {
	pub fn is_empty(&self) -> bool {
		*self == Style::default()
	}

	/// Builds an inline KML `Style`. Colour tokens that cannot be expressed in KML are skipped.
	pub fn to_kml_element(&self) -> XmlElement {
		let mut line_style = XmlElement::new("LineStyle");
		if let Some(color) = kml_color(self.color.as_deref(), self.opacity) {
			line_style.push(XmlElement::new_text("color", &color.to_string()));
		}
		if let Some(weight) = self.weight {
			line_style.push(XmlElement::new_text("width", &weight.to_string()));
		}

		let mut poly_style = XmlElement::new("PolyStyle");
		let fill_color = self.fill_color.as_deref().or(self.color.as_deref());
		if let Some(color) = kml_color(fill_color, self.fill_opacity) {
			poly_style.push(XmlElement::new_text("color", &color.to_string()));
		}
		if self.fill_opacity == Some(0.0) {
			poly_style.push(XmlElement::new_text("fill", "0"));
		}

		let mut style = XmlElement::new("Style");
		if !line_style.children.is_empty() {
			style.push(line_style);
		}
		if !poly_style.children.is_empty() {
			style.push(poly_style);
		}
		style
	}

	/// Reads an inline KML `Style`. Returns `None` if it carries nothing this record can hold.
	pub fn from_kml_element(element: &XmlElement) -> Option<Style> {
		let mut style = Style::default();

		if let Some(line_style) = element.child("LineStyle") {
			if let Some((color, opacity)) = line_style.child_text("color").and_then(|c| css_color(&c)) {
				style.color = Some(color);
				style.opacity = Some(opacity);
			}
			style.weight = line_style.child_text("width").and_then(|w| w.parse().ok());
		}

		if let Some(poly_style) = element.child("PolyStyle") {
			if let Some((color, opacity)) = poly_style.child_text("color").and_then(|c| css_color(&c)) {
				style.fill_color = Some(color);
				style.fill_opacity = Some(opacity);
			}
			if poly_style.child_text("fill").as_deref() == Some("0") {
				style.fill_opacity = Some(0.0);
			}
		}

		if style.is_empty() { None } else { Some(style) }
	}
}

fn kml_color(token: Option<&str>, opacity: Option<f64>) -> Option<KmlColor> {
	let token = token?;
	match KmlColor::from_css(token, opacity) {
		Ok(color) => Some(color),
		Err(error) => {
			log::warn!("skipping color: {error}");
			None
		}
	}
}

fn css_color(text: &str) -> Option<(String, f64)> {
	match KmlColor::parse_str(text) {
		Ok(color) => Some(color.to_css()),
		Err(error) => {
			log::warn!("ignoring style color: {error}");
			None
		}
	}
}
