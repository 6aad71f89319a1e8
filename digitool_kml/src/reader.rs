//! Parses KML documents into features.
//!
//! Every `Placemark` ends up in exactly one of two lists: [`KmlImport::features`] when its
//! category is known (from metadata, else from the classifier), [`KmlImport::unknowns`] otherwise.

use crate::{
	Feature, GeometryConverter, LayerType, Style, classify,
	meta::read_meta,
	xml::{XmlElement, parse_xml},
};
use anyhow::{Context, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct KmlImport<G> {
	pub features: Vec<Feature<G>>,
	pub unknowns: Vec<Feature<G>>,
}

impl<G> KmlImport<G> {
	pub fn len(&self) -> usize {
		self.features.len() + self.unknowns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty() && self.unknowns.is_empty()
	}
}

/// Imports KML text. Text that is not well-formed XML is an error; nothing is returned in that case.
pub fn import_kml<C: GeometryConverter>(text: &str, converter: &C) -> Result<KmlImport<C::Geometry>> {
	let root = parse_xml(text).context("failed to parse KML document")?;
	import_kml_tree(&root, converter)
}

/// Imports an already parsed document.
pub fn import_kml_tree<C: GeometryConverter>(root: &XmlElement, converter: &C) -> Result<KmlImport<C::Geometry>> {
	let mut placemarks = Vec::new();
	collect_placemarks(root, None, &mut placemarks);

	let mut import = KmlImport {
		features: Vec::new(),
		unknowns: Vec::new(),
	};

	for (index, (placemark, folder)) in placemarks.into_iter().enumerate() {
		let feature = read_placemark(placemark, folder.as_deref(), converter).with_context(|| {
			format!(
				"failed to import placemark {index} ({:?})",
				placemark.child_text("name").unwrap_or_default()
			)
		})?;
		if feature.resolved_layer_type().is_some() {
			import.features.push(feature);
		} else {
			import.unknowns.push(feature);
		}
	}

	log::debug!(
		"imported {} placemarks: {} classified, {} unknown",
		import.len(),
		import.features.len(),
		import.unknowns.len()
	);
	Ok(import)
}

/// Collects placemarks in document order together with the name of their nearest enclosing folder.
fn collect_placemarks<'a>(
	element: &'a XmlElement,
	folder: Option<&str>,
	out: &mut Vec<(&'a XmlElement, Option<String>)>,
) {
	for child in element.elements() {
		if child.is("Placemark") {
			out.push((child, folder.map(str::to_string)));
		} else if child.is("Folder") {
			collect_placemarks(child, child.child_text("name").as_deref(), out);
		} else {
			collect_placemarks(child, folder, out);
		}
	}
}

fn read_placemark<C: GeometryConverter>(
	placemark: &XmlElement,
	folder: Option<&str>,
	converter: &C,
) -> Result<Feature<C::Geometry>> {
	let name = placemark.child_text("name");
	let folder = folder.map(str::trim).filter(|f| !f.is_empty());
	let mut meta = read_meta(placemark);

	if meta.layer_type.is_none() {
		meta.layer_type = classify(name.as_deref().unwrap_or_default(), folder.unwrap_or_default());
		log::trace!(
			"classified {:?} in folder {:?} as {:?}",
			name.as_deref().unwrap_or_default(),
			folder.unwrap_or_default(),
			meta.layer_type.as_ref().map(LayerType::as_str)
		);
	} else if let Some(LayerType::Unknown(tag)) = &meta.layer_type {
		log::warn!("placemark {name:?} has an unrecognized layer type '{tag}'");
	}

	Ok(Feature {
		style_url: placemark.child_text("styleUrl"),
		style: placemark.child("Style").and_then(Style::from_kml_element),
		geometry: converter.kml_to_geometry(placemark)?,
		folder: folder.map(str::to_string),
		name,
		meta,
	})
}
