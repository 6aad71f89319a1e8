use super::*;
use crate::{Coordinates, Feature, Geometry, style::to_document_style};
use serde_json::{Map, Value, json};

/// Builds a `FeatureCollection`.
pub fn features_to_geojson(features: &[Feature]) -> Value {
	json!({
		"type": "FeatureCollection",
		"features": features.iter().map(feature_to_geojson).collect::<Vec<_>>(),
	})
}

pub fn feature_to_geojson(feature: &Feature) -> Value {
	let mut properties = Map::new();
	let mut insert = |key: &str, value: Option<Value>| {
		if let Some(value) = value {
			properties.insert(key.to_string(), value);
		}
	};

	insert(PROPERTY_NAME, feature.name.clone().map(Value::String));
	insert(PROPERTY_FOLDER, feature.folder.clone().map(Value::String));
	insert(
		PROPERTY_LAYER_TYPE,
		feature.meta.layer_type.as_ref().map(|t| Value::String(t.as_str().to_string())),
	);
	insert(PROPERTY_GRB_VERSION, feature.meta.grb_version.clone().map(Value::String));
	insert(PROPERTY_PARAMS, feature.meta.params.clone());
	insert(PROPERTY_RESULTS, feature.meta.results.clone());
	insert(PROPERTY_STYLE_URL, feature.style_url.clone().map(Value::String));

	if let Some(style) = &feature.style {
		if let Ok(Value::Object(simple)) = serde_json::to_value(to_document_style(style)) {
			properties.extend(simple);
		}
	}

	json!({
		"type": "Feature",
		"geometry": feature.geometry.as_ref().map(geometry_to_geojson),
		"properties": properties,
	})
}

pub fn geometry_to_geojson(geometry: &Geometry) -> Value {
	fn position(c: &Coordinates) -> Value {
		json!([c.x(), c.y()])
	}
	fn line(l: &[Coordinates]) -> Value {
		Value::Array(l.iter().map(position).collect())
	}
	fn polygon(p: &[Vec<Coordinates>]) -> Value {
		Value::Array(p.iter().map(|l| line(l)).collect())
	}

	let coordinates = match geometry {
		Geometry::Point(c) => position(c),
		Geometry::LineString(l) => line(l),
		Geometry::Polygon(p) => polygon(p),
		Geometry::MultiPoint(m) => line(m),
		Geometry::MultiLineString(m) => Value::Array(m.iter().map(|l| line(l)).collect()),
		Geometry::MultiPolygon(m) => Value::Array(m.iter().map(|p| polygon(p)).collect()),
	};
	json!({"type": geometry.get_type_name(), "coordinates": coordinates})
}
