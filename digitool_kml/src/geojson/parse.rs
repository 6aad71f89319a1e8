use super::*;
use crate::{
	Coordinates, Feature, Geometry, LayerType, LineCoordinates, Meta, PolygonCoordinates, Style,
	style::{SimpleStyle, to_native_style},
};
use anyhow::{Context, Result, anyhow, bail, ensure};
use serde_json::{Map, Value};
use std::io::Read;

pub fn read_geojson(mut reader: impl Read) -> Result<Vec<Feature>> {
	let mut buffer = String::new();
	reader.read_to_string(&mut buffer)?;
	parse_geojson(&buffer)
}

/// Parses a `FeatureCollection`. A single `Feature` is accepted as a collection of one.
pub fn parse_geojson(json: &str) -> Result<Vec<Feature>> {
	let value: Value = serde_json::from_str(json).context("invalid JSON")?;
	match object_type(&value)? {
		"FeatureCollection" => {
			let features = value
				.get("features")
				.and_then(Value::as_array)
				.ok_or_else(|| anyhow!("FeatureCollection must have a 'features' array"))?;
			features
				.iter()
				.enumerate()
				.map(|(index, feature)| parse_geojson_feature(feature).with_context(|| format!("feature {index}")))
				.collect()
		}
		"Feature" => Ok(vec![parse_geojson_feature(&value)?]),
		other => bail!("expected a FeatureCollection or Feature, found '{other}'"),
	}
}

fn object_type(value: &Value) -> Result<&str> {
	value
		.get("type")
		.and_then(Value::as_str)
		.ok_or_else(|| anyhow!("GeoJSON object must have a type"))
}

pub fn parse_geojson_feature(value: &Value) -> Result<Feature> {
	ensure!(object_type(value)? == "Feature", "type must be 'Feature'");

	let geometry = match value.get("geometry") {
		None | Some(Value::Null) => None,
		Some(geometry) => {
			let geometry = parse_geojson_geometry(geometry)?;
			geometry.verify()?;
			Some(geometry)
		}
	};

	let empty = Map::new();
	let properties = match value.get("properties") {
		None | Some(Value::Null) => &empty,
		Some(Value::Object(map)) => map,
		Some(_) => bail!("'properties' must be an object"),
	};

	Ok(Feature {
		name: string_property(properties, PROPERTY_NAME),
		geometry,
		style_url: string_property(properties, PROPERTY_STYLE_URL),
		style: parse_style(properties)?,
		meta: parse_meta(properties),
		folder: string_property(properties, PROPERTY_FOLDER),
	})
}

fn string_property(properties: &Map<String, Value>, key: &str) -> Option<String> {
	match properties.get(key)? {
		Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

/// An explicit `style` object takes precedence over simplestyle properties.
fn parse_style(properties: &Map<String, Value>) -> Result<Option<Style>> {
	if let Some(style) = properties.get(PROPERTY_STYLE).filter(|s| !s.is_null()) {
		let style: Style = serde_json::from_value(style.clone()).context("invalid 'style' property")?;
		return Ok(Some(style));
	}
	let simple: SimpleStyle =
		serde_json::from_value(Value::Object(properties.clone())).context("invalid simplestyle properties")?;
	Ok(if simple.is_empty() { None } else { Some(to_native_style(&simple)) })
}

/// Metadata is read from a nested `meta` object if present, otherwise from the top-level properties.
fn parse_meta(properties: &Map<String, Value>) -> Meta {
	let source = match properties.get(PROPERTY_META) {
		Some(Value::Object(meta)) => meta,
		_ => properties,
	};
	Meta {
		layer_type: string_property(source, PROPERTY_LAYER_TYPE).map(|tag| LayerType::parse_str(&tag)),
		grb_version: string_property(source, PROPERTY_GRB_VERSION),
		params: source.get(PROPERTY_PARAMS).filter(|v| !v.is_null()).cloned(),
		results: source.get(PROPERTY_RESULTS).filter(|v| !v.is_null()).cloned(),
	}
}

pub fn parse_geojson_geometry(value: &Value) -> Result<Geometry> {
	let geometry_type = object_type(value)?;
	let coordinates = value
		.get("coordinates")
		.ok_or_else(|| anyhow!("{geometry_type} must have coordinates"))?;

	Ok(match geometry_type {
		"Point" => Geometry::Point(parse_position(coordinates)?),
		"LineString" => Geometry::LineString(parse_line(coordinates)?),
		"Polygon" => Geometry::Polygon(parse_polygon(coordinates)?),
		"MultiPoint" => Geometry::MultiPoint(parse_line(coordinates)?),
		"MultiLineString" => Geometry::MultiLineString(parse_array(coordinates, parse_line)?),
		"MultiPolygon" => Geometry::MultiPolygon(parse_array(coordinates, parse_polygon)?),
		other => bail!("unknown geometry type '{other}'"),
	})
}

fn parse_array<T>(value: &Value, parse: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
	value
		.as_array()
		.ok_or_else(|| anyhow!("expected an array of coordinates"))?
		.iter()
		.map(parse)
		.collect()
}

/// Reads `[lon, lat]` or `[lon, lat, alt]`. Altitude is dropped.
fn parse_position(value: &Value) -> Result<Coordinates> {
	let values = parse_array(value, |v| v.as_f64().ok_or_else(|| anyhow!("coordinate must be a number")))?;
	ensure!(
		values.len() == 2 || values.len() == 3,
		"position must have two or three values, found {}",
		values.len()
	);
	Ok(Coordinates::new(values[0], values[1]))
}

fn parse_line(value: &Value) -> Result<LineCoordinates> {
	parse_array(value, parse_position)
}

fn parse_polygon(value: &Value) -> Result<PolygonCoordinates> {
	parse_array(value, parse_line)
}
