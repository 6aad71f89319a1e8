//! Assembles a KML document from features.
//!
//! The document is built as an [`XmlElement`] tree and rendered in one pass. Style definitions
//! are appended before any placemark so that every `styleUrl` resolves within the document.

use crate::{
	Feature, GeometryConverter, Include, LayerFolder, LayerType,
	meta::{Meta, Provenance, write_meta, write_provenance},
	style::ensure_default_styles,
	xml::{XmlElement, render_xml},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
	pub include: Include,
	/// Write a feature's inline `style` as a placemark `Style`. When false, the inline style is left
	/// out and the category default `styleUrl` is used instead. A feature's own `styleUrl` is always
	/// kept.
	pub preserve_styles: bool,
	/// Write placemarks directly into the `Document` instead of category folders.
	pub flatten: bool,
	pub document_name: Option<String>,
}

impl Default for ExportOptions {
	fn default() -> Self {
		Self {
			include: Include::All,
			preserve_styles: true,
			flatten: false,
			document_name: None,
		}
	}
}

/// Caller-owned state embedded into every exported placemark: the last-used input parameters
/// and the last-computed results.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportContext {
	pub params: Option<Value>,
	pub results: Option<Value>,
	pub grb_version: Option<String>,
	pub app_version: String,
}

impl Default for ExportContext {
	fn default() -> Self {
		Self {
			params: None,
			results: None,
			grb_version: None,
			app_version: env!("CARGO_PKG_VERSION").to_string(),
		}
	}
}

impl ExportContext {
	/// Metadata written for a feature: context values take precedence over the feature's own.
	fn meta_for(&self, layer_type: &LayerType, meta: &Meta) -> Meta {
		Meta {
			layer_type: Some(layer_type.clone()),
			grb_version: self.grb_version.clone().or_else(|| meta.grb_version.clone()),
			params: self.params.clone().or_else(|| meta.params.clone()),
			results: self.results.clone().or_else(|| meta.results.clone()),
		}
	}
}

/// Exports features as KML text.
///
/// Features without a known category, or outside of `options.include`, are left out.
pub fn export_kml<C: GeometryConverter>(
	features: &[Feature<C::Geometry>],
	options: &ExportOptions,
	context: &ExportContext,
	converter: &C,
) -> Result<String> {
	let root = build_kml(features, options, context, converter)?;
	render_xml(&root)
}

/// Builds the KML tree without rendering it.
pub fn build_kml<C: GeometryConverter>(
	features: &[Feature<C::Geometry>],
	options: &ExportOptions,
	context: &ExportContext,
	converter: &C,
) -> Result<XmlElement> {
	let mut document = XmlElement::new("Document");
	if let Some(name) = &options.document_name {
		document.push(XmlElement::new_text("name", name));
	}
	ensure_default_styles(&mut document);

	let provenance = Provenance::new(&context.app_version);
	let mut fg_placemarks = Vec::new();
	let mut buffer_placemarks = Vec::new();

	for (index, feature) in features.iter().enumerate() {
		let Some((layer_type, folder)) = feature.layer_type().and_then(|t| Some((t, t.folder()?))) else {
			log::warn!(
				"skipping feature {index} ({:?}): no resolvable layer type",
				feature.name.as_deref().unwrap_or_default()
			);
			continue;
		};
		if !options.include.accepts(layer_type) {
			log::trace!("skipping feature {index}: {layer_type} is not included in '{}'", options.include);
			continue;
		}

		let placemark =
			build_placemark(feature, layer_type, options, context, &provenance, converter).with_context(|| {
				format!(
					"failed to export feature {index} ({:?})",
					feature.name.as_deref().unwrap_or_default()
				)
			})?;

		match folder {
			LayerFolder::FlightGeometry => fg_placemarks.push(placemark),
			LayerFolder::Buffers => buffer_placemarks.push(placemark),
		}
	}

	let count = fg_placemarks.len() + buffer_placemarks.len();
	if options.flatten {
		for placemark in fg_placemarks.into_iter().chain(buffer_placemarks) {
			document.push(placemark);
		}
	} else {
		for folder in options.include.folders() {
			let placemarks = match folder {
				LayerFolder::FlightGeometry => std::mem::take(&mut fg_placemarks),
				LayerFolder::Buffers => std::mem::take(&mut buffer_placemarks),
			};
			let mut element = XmlElement::new("Folder").with_child(XmlElement::new_text("name", folder.name()));
			for placemark in placemarks {
				element.push(placemark);
			}
			document.push(element);
		}
	}
	log::debug!(
		"exported {count} of {} features (include: {}, flatten: {})",
		features.len(),
		options.include,
		options.flatten
	);

	Ok(XmlElement::new("kml")
		.with_attribute("xmlns", KML_NAMESPACE)
		.with_child(document))
}

fn build_placemark<C: GeometryConverter>(
	feature: &Feature<C::Geometry>,
	layer_type: &LayerType,
	options: &ExportOptions,
	context: &ExportContext,
	provenance: &Provenance,
	converter: &C,
) -> Result<XmlElement> {
	let mut placemark = XmlElement::new("Placemark");
	if let Some(name) = &feature.name {
		placemark.push(XmlElement::new_text("name", name));
	}

	// caller styling is never overwritten; only unstyled placemarks get the category default
	let style = feature
		.style
		.as_ref()
		.filter(|s| options.preserve_styles && !s.is_empty());
	let style_url = match (&feature.style_url, style) {
		(Some(style_url), _) => Some(style_url.clone()),
		(None, Some(_)) => None,
		(None, None) => layer_type.style_url(),
	};
	if let Some(style_url) = style_url {
		placemark.push(XmlElement::new_text("styleUrl", &style_url));
	}
	if let Some(style) = style {
		placemark.push(style.to_kml_element());
	}

	write_meta(&mut placemark, &context.meta_for(layer_type, &feature.meta));
	write_provenance(&mut placemark, provenance);

	if let Some(geometry) = &feature.geometry {
		placemark.push(converter.geometry_to_kml(geometry)?);
	}
	Ok(placemark)
}
