use crate::{Geometry, LayerType, Meta, Style};

/// The unit of export and import.
///
/// The geometry type is whatever the caller's [`crate::GeometryConverter`] produces and consumes;
/// it defaults to the crate's own [`Geometry`].
#[derive(Clone, Debug, PartialEq)]
pub struct Feature<G = Geometry> {
	pub name: Option<String>,
	pub geometry: Option<G>,
	pub style_url: Option<String>,
	pub style: Option<Style>,
	pub meta: Meta,
	/// Name of the nearest enclosing `Folder`, filled in on import.
	pub folder: Option<String>,
}

impl<G> Default for Feature<G> {
	fn default() -> Self {
		Self {
			name: None,
			geometry: None,
			style_url: None,
			style: None,
			meta: Meta::default(),
			folder: None,
		}
	}
}

impl<G> Feature<G> {
	pub fn new(geometry: G) -> Self {
		Self {
			geometry: Some(geometry),
			..Self::default()
		}
	}

	pub fn with_name(mut self, name: &str) -> Self {
		self.name = Some(name.to_string());
		self
	}

	pub fn with_layer_type(mut self, layer_type: LayerType) -> Self {
		self.meta.layer_type = Some(layer_type);
		self
	}

	pub fn with_style_url(mut self, style_url: &str) -> Self {
		self.style_url = Some(style_url.to_string());
		self
	}

	pub fn with_style(mut self, style: Style) -> Self {
		self.style = Some(style);
		self
	}

	pub fn with_meta(mut self, meta: Meta) -> Self {
		self.meta = meta;
		self
	}

	pub fn layer_type(&self) -> Option<&LayerType> {
		self.meta.layer_type.as_ref()
	}

	/// The layer type if it is one of the known categories.
	pub fn resolved_layer_type(&self) -> Option<&LayerType> {
		self.meta.layer_type.as_ref().filter(|t| t.is_resolved())
	}
}
