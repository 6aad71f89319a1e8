//! Application metadata carried in a placemark's `ExtendedData` block.
//!
//! Every value is stored as `<Data name="digitool:…"><value>…</value></Data>`. Structured payloads
//! (`params`, `results`) are JSON text; when that text does not parse on import the raw string is
//! kept instead, so corrupted metadata never aborts an import.

use crate::{LayerType, xml::XmlElement};
use serde_json::Value;

pub const KEY_LAYER_TYPE: &str = "digitool:layerType";
pub const KEY_GRB_VERSION: &str = "digitool:grbVersion";
pub const KEY_PARAMS: &str = "digitool:params";
pub const KEY_RESULTS: &str = "digitool:results";
pub const KEY_APP: &str = "digitool:app";
pub const KEY_VERSION: &str = "digitool:version";

pub const APP_NAME: &str = "Digitool";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Meta {
	pub layer_type: Option<LayerType>,
	pub grb_version: Option<String>,
	/// Last-used input parameters.
	pub params: Option<Value>,
	/// Last-computed result metrics.
	pub results: Option<Value>,
}

/// Non-functional export provenance, written on export and ignored on import.
#[derive(Clone, Debug, PartialEq)]
pub struct Provenance {
	pub app: String,
	pub version: String,
}

impl Provenance {
	/// Provenance of this application in the given version, e.g. `"0.7.0"` becomes `"v0.7.0"`.
	pub fn new(version: &str) -> Self {
		Self {
			app: APP_NAME.to_string(),
			version: format!("v{}", version.trim_start_matches('v')),
		}
	}
}

/// Writes the metadata into the placemark. Keys that already exist are updated in place.
pub fn write_meta(placemark: &mut XmlElement, meta: &Meta) {
	if let Some(layer_type) = &meta.layer_type {
		set_data(placemark, KEY_LAYER_TYPE, layer_type.as_str());
	}
	if let Some(grb_version) = &meta.grb_version {
		set_data(placemark, KEY_GRB_VERSION, grb_version);
	}
	if let Some(params) = &meta.params {
		set_data(placemark, KEY_PARAMS, &params.to_string());
	}
	if let Some(results) = &meta.results {
		set_data(placemark, KEY_RESULTS, &results.to_string());
	}
}

pub fn write_provenance(placemark: &mut XmlElement, provenance: &Provenance) {
	set_data(placemark, KEY_APP, &provenance.app);
	set_data(placemark, KEY_VERSION, &provenance.version);
}

/// Reads the metadata of a placemark. Missing keys read as `None`.
pub fn read_meta(placemark: &XmlElement) -> Meta {
	Meta {
		layer_type: get_data(placemark, KEY_LAYER_TYPE).map(|tag| LayerType::parse_str(&tag)),
		grb_version: get_data(placemark, KEY_GRB_VERSION),
		params: get_data(placemark, KEY_PARAMS).map(|raw| parse_payload(KEY_PARAMS, raw)),
		results: get_data(placemark, KEY_RESULTS).map(|raw| parse_payload(KEY_RESULTS, raw)),
	}
}

fn parse_payload(key: &str, raw: String) -> Value {
	match serde_json::from_str(&raw) {
		Ok(value) => value,
		Err(error) => {
			log::warn!("keeping '{key}' as raw text, it is not valid JSON: {error}");
			Value::String(raw)
		}
	}
}

/// Returns the trimmed value of `Data[name=key]`, `None` if absent or empty.
pub fn get_data(placemark: &XmlElement, key: &str) -> Option<String> {
	placemark
		.child("ExtendedData")?
		.children_named("Data")
		.find(|data| data.attribute("name") == Some(key))?
		.child_text("value")
}

fn set_data(placemark: &mut XmlElement, key: &str, value: &str) {
	let extended_data = match placemark.child_mut("ExtendedData") {
		Some(extended_data) => extended_data,
		None => placemark.push_and_get(XmlElement::new("ExtendedData")),
	};

	let existing = extended_data
		.elements_mut()
		.find(|data| data.is("Data") && data.attribute("name") == Some(key));
	let data = match existing {
		Some(data) => data,
		None => extended_data.push_and_get(XmlElement::new("Data").with_attribute("name", key)),
	};

	match data.child_mut("value") {
		Some(value_element) => value_element.set_text(value),
		None => data.push(XmlElement::new_text("value", value)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::xml::parse_xml;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	fn example_meta() -> Meta {
		Meta {
			layer_type: Some(LayerType::FlightGeography),
			grb_version: Some("2.1".to_string()),
			params: Some(json!({"hfg": 120, "cd": 1.2})),
			results: Some(json!({"grb": 45.0})),
		}
	}

	#[test]
	fn write_then_read() {
		let mut placemark = XmlElement::new("Placemark");
		write_meta(&mut placemark, &example_meta());
		assert_eq!(read_meta(&placemark), example_meta());
		assert_eq!(get_data(&placemark, KEY_LAYER_TYPE).as_deref(), Some("FG"));
		assert_eq!(get_data(&placemark, KEY_PARAMS).as_deref(), Some(r#"{"cd":1.2,"hfg":120}"#));
	}

	#[test]
	fn writing_twice_replaces_values() {
		let mut placemark = XmlElement::new("Placemark");
		write_meta(&mut placemark, &example_meta());
		let mut meta = example_meta();
		meta.layer_type = Some(LayerType::AdjacentArea);
		write_meta(&mut placemark, &meta);

		let extended_data: Vec<_> = placemark.children_named("ExtendedData").collect();
		assert_eq!(extended_data.len(), 1);
		let names: Vec<_> = extended_data[0]
			.children_named("Data")
			.filter_map(|d| d.attribute("name"))
			.collect();
		assert_eq!(names, [KEY_LAYER_TYPE, KEY_GRB_VERSION, KEY_PARAMS, KEY_RESULTS]);
		assert_eq!(read_meta(&placemark).layer_type, Some(LayerType::AdjacentArea));
	}

	#[test]
	fn absent_keys_read_as_none() {
		assert_eq!(read_meta(&XmlElement::new("Placemark")), Meta::default());
	}

	#[test]
	fn malformed_json_falls_back_to_raw_text() -> anyhow::Result<()> {
		let placemark = parse_xml(
			r#"<Placemark><ExtendedData>
				<Data name="digitool:params"><value>not-json</value></Data>
				<Data name="digitool:results"><value>{"grb": </value></Data>
			</ExtendedData></Placemark>"#,
		)?;
		let meta = read_meta(&placemark);
		assert_eq!(meta.params, Some(Value::String("not-json".to_string())));
		assert_eq!(meta.results, Some(Value::String("{\"grb\":".to_string())));
		assert_eq!(meta.layer_type, None);
		Ok(())
	}

	#[test]
	fn foreign_data_is_left_alone() -> anyhow::Result<()> {
		let mut placemark = parse_xml(
			r#"<Placemark><ExtendedData><Data name="owner"><value>ops</value></Data></ExtendedData></Placemark>"#,
		)?;
		write_meta(&mut placemark, &example_meta());
		assert_eq!(get_data(&placemark, "owner").as_deref(), Some("ops"));
		assert_eq!(read_meta(&placemark), example_meta());
		Ok(())
	}

	#[test]
	fn provenance_is_written() {
		let mut placemark = XmlElement::new("Placemark");
		write_provenance(&mut placemark, &Provenance::new("0.7.0"));
		assert_eq!(get_data(&placemark, KEY_APP).as_deref(), Some("Digitool"));
		assert_eq!(get_data(&placemark, KEY_VERSION).as_deref(), Some("v0.7.0"));
		assert_eq!(Provenance::new("v1.2").version, "v1.2");
	}
}
