use super::{Coordinates, Geometry, LineCoordinates, PolygonCoordinates};
use crate::xml::{XmlElement, parse_xml, render_fragment};
use anyhow::{Context, Result};
use kml::{
	Kml, KmlWriter,
	types::{Coord, Geometry as KmlGeometry, LineString, LinearRing, MultiGeometry, Point, Polygon},
};
use lazy_static::lazy_static;
use regex::Regex;

/// Conversion between a caller's geometry representation and KML geometry elements.
///
/// The writer and reader call into a converter for every placemark; they never interpret
/// geometry themselves.
pub trait GeometryConverter {
	type Geometry;

	/// Builds a KML geometry element (`Point`, `LineString`, `Polygon` or `MultiGeometry`).
	fn geometry_to_kml(&self, geometry: &Self::Geometry) -> Result<XmlElement>;

	/// Reads the geometry of a `Placemark` element. `Ok(None)` means the placemark has no geometry.
	fn kml_to_geometry(&self, placemark: &XmlElement) -> Result<Option<Self::Geometry>>;
}

const GEOMETRY_ELEMENTS: [&str; 5] = ["Point", "LineString", "LinearRing", "Polygon", "MultiGeometry"];

lazy_static! {
	static ref COMMA_SPACING: Regex = Regex::new(r"\s*,\s*").unwrap();
}

/// Converter for the crate's own [`Geometry`], backed by the `kml` crate.
///
/// Geometry that cannot be represented is read as `None` with a warning, so a single odd
/// placemark never aborts an import.
#[derive(Clone, Copy, Debug, Default)]
pub struct KmlGeometryConverter;

impl GeometryConverter for KmlGeometryConverter {
	type Geometry = Geometry;

	fn geometry_to_kml(&self, geometry: &Geometry) -> Result<XmlElement> {
		let kml = match to_kml_geometry(geometry) {
			KmlGeometry::Point(p) => Kml::Point(p),
			KmlGeometry::LineString(l) => Kml::LineString(l),
			KmlGeometry::Polygon(p) => Kml::Polygon(p),
			KmlGeometry::MultiGeometry(m) => Kml::MultiGeometry(m),
			other => anyhow::bail!("unexpected KML geometry {other:?}"),
		};
		let mut buffer = Vec::new();
		KmlWriter::from_writer(&mut buffer)
			.write(&kml)
			.with_context(|| format!("failed to write {}", geometry.get_type_name()))?;
		parse_xml(std::str::from_utf8(&buffer)?)
	}

	fn kml_to_geometry(&self, placemark: &XmlElement) -> Result<Option<Geometry>> {
		let Some(element) = placemark.elements().find(|e| GEOMETRY_ELEMENTS.contains(&e.local_name())) else {
			return Ok(None);
		};

		let mut element = element.clone();
		normalize_coordinates(&mut element);
		let text = render_fragment(&element)?;

		match text.parse::<Kml<f64>>() {
			Ok(kml) => Ok(from_kml(kml)),
			Err(error) => {
				log::warn!("dropping unreadable <{}>: {error}", element.local_name());
				Ok(None)
			}
		}
	}
}

/// Collapses whitespace around commas, so `8.5, 47.3` reads like `8.5,47.3`.
fn normalize_coordinates(element: &mut XmlElement) {
	for child in element.elements_mut() {
		if child.is("coordinates") {
			let text = COMMA_SPACING.replace_all(&child.text(), ",").into_owned();
			child.set_text(&text);
		} else {
			normalize_coordinates(child);
		}
	}
}

fn to_coord(c: &Coordinates) -> Coord<f64> {
	Coord::new(c.x(), c.y(), None)
}

fn to_coords(line: &[Coordinates]) -> Vec<Coord<f64>> {
	line.iter().map(to_coord).collect()
}

fn to_kml_polygon(polygon: &[LineCoordinates]) -> Polygon<f64> {
	let mut rings = polygon.iter().map(|ring| LinearRing::from(to_coords(ring)));
	let outer = rings.next().unwrap_or_else(|| LinearRing::from(Vec::new()));
	Polygon::new(outer, rings.collect())
}

fn to_kml_geometry(geometry: &Geometry) -> KmlGeometry<f64> {
	let point = |c: &Coordinates| KmlGeometry::Point(Point::new(c.x(), c.y(), None));
	let line = |l: &LineCoordinates| KmlGeometry::LineString(LineString::from(to_coords(l)));
	let polygon = |p: &PolygonCoordinates| KmlGeometry::Polygon(to_kml_polygon(p));
	match geometry {
		Geometry::Point(c) => point(c),
		Geometry::LineString(l) => line(l),
		Geometry::Polygon(p) => polygon(p),
		Geometry::MultiPoint(m) => KmlGeometry::MultiGeometry(MultiGeometry::new(m.iter().map(point).collect())),
		Geometry::MultiLineString(m) => KmlGeometry::MultiGeometry(MultiGeometry::new(m.iter().map(line).collect())),
		Geometry::MultiPolygon(m) => KmlGeometry::MultiGeometry(MultiGeometry::new(m.iter().map(polygon).collect())),
	}
}

fn from_coords(coords: &[Coord<f64>]) -> LineCoordinates {
	coords.iter().map(|c| Coordinates::new(c.x, c.y)).collect()
}

fn from_kml_polygon(polygon: &Polygon<f64>) -> PolygonCoordinates {
	std::iter::once(&polygon.outer)
		.chain(&polygon.inner)
		.map(|ring| from_coords(&ring.coords))
		.collect()
}

fn from_kml(kml: Kml<f64>) -> Option<Geometry> {
	let geometry = match kml {
		Kml::Point(p) => KmlGeometry::Point(p),
		Kml::LineString(l) => KmlGeometry::LineString(l),
		Kml::LinearRing(r) => KmlGeometry::LinearRing(r),
		Kml::Polygon(p) => KmlGeometry::Polygon(p),
		Kml::MultiGeometry(m) => KmlGeometry::MultiGeometry(m),
		_ => {
			log::warn!("dropping geometry of an unsupported kind");
			return None;
		}
	};
	from_kml_geometry(&geometry)
}

#[derive(Default)]
struct Parts {
	points: LineCoordinates,
	lines: Vec<LineCoordinates>,
	polygons: Vec<PolygonCoordinates>,
	skipped: usize,
}

impl Parts {
	fn collect(&mut self, geometry: &KmlGeometry<f64>) {
		match geometry {
			KmlGeometry::Point(p) => self.points.push(Coordinates::new(p.coord.x, p.coord.y)),
			KmlGeometry::LineString(l) => self.lines.push(from_coords(&l.coords)),
			KmlGeometry::LinearRing(r) => self.polygons.push(vec![from_coords(&r.coords)]),
			KmlGeometry::Polygon(p) => self.polygons.push(from_kml_polygon(p)),
			KmlGeometry::MultiGeometry(m) => m.geometries.iter().for_each(|g| self.collect(g)),
			_ => self.skipped += 1,
		}
	}
}

fn from_kml_geometry(geometry: &KmlGeometry<f64>) -> Option<Geometry> {
	match geometry {
		KmlGeometry::Point(p) => return Some(Geometry::Point(Coordinates::new(p.coord.x, p.coord.y))),
		KmlGeometry::LineString(l) => return Some(Geometry::LineString(from_coords(&l.coords))),
		KmlGeometry::LinearRing(r) => return Some(Geometry::Polygon(vec![from_coords(&r.coords)])),
		KmlGeometry::Polygon(p) => return Some(Geometry::Polygon(from_kml_polygon(p))),
		_ => {}
	}

	let mut parts = Parts::default();
	parts.collect(geometry);
	let Parts {
		points,
		lines,
		polygons,
		skipped,
	} = parts;

	// a mixed MultiGeometry keeps its highest-dimensional parts
	let (kept, dropped, geometry) = if !polygons.is_empty() {
		(polygons.len(), points.len() + lines.len(), Geometry::MultiPolygon(polygons))
	} else if !lines.is_empty() {
		(lines.len(), points.len(), Geometry::MultiLineString(lines))
	} else if !points.is_empty() {
		(points.len(), 0, Geometry::MultiPoint(points))
	} else {
		log::warn!("dropping empty <MultiGeometry>");
		return None;
	};
	if dropped + skipped > 0 {
		log::warn!(
			"<MultiGeometry> mixes geometry kinds: kept {kept} {} parts, dropped {}",
			geometry.get_type_name(),
			dropped + skipped
		);
	}
	Some(geometry)
}
