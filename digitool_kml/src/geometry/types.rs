use anyhow::{Result, ensure};
use std::fmt::Debug;

#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates([f64; 2]);

impl Coordinates {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self([x, y])
	}

	#[must_use]
	pub fn x(&self) -> f64 {
		self.0[0]
	}

	#[must_use]
	pub fn y(&self) -> f64 {
		self.0[1]
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates(value)
	}
}

impl From<&[f64; 2]> for Coordinates {
	fn from(value: &[f64; 2]) -> Self {
		Coordinates(*value)
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates([value.0, value.1])
	}
}

impl From<Coordinates> for [f64; 2] {
	fn from(value: Coordinates) -> Self {
		value.0
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

pub type LineCoordinates = Vec<Coordinates>;
pub type PolygonCoordinates = Vec<LineCoordinates>;

/// Geometry of a drawn or computed feature, in WGS84 longitude/latitude.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(Coordinates),
	LineString(LineCoordinates),
	Polygon(PolygonCoordinates),
	MultiPoint(LineCoordinates),
	MultiLineString(Vec<LineCoordinates>),
	MultiPolygon(Vec<PolygonCoordinates>),
}

fn line(value: Vec<[f64; 2]>) -> LineCoordinates {
	value.into_iter().map(Coordinates::from).collect()
}

fn polygon(value: Vec<Vec<[f64; 2]>>) -> PolygonCoordinates {
	value.into_iter().map(line).collect()
}

impl Geometry {
	pub fn new_point(value: [f64; 2]) -> Self {
		Self::Point(Coordinates::from(value))
	}
	pub fn new_line_string(value: Vec<[f64; 2]>) -> Self {
		Self::LineString(line(value))
	}
	pub fn new_polygon(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::Polygon(polygon(value))
	}
	pub fn new_multi_point(value: Vec<[f64; 2]>) -> Self {
		Self::MultiPoint(line(value))
	}
	pub fn new_multi_line_string(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::MultiLineString(value.into_iter().map(line).collect())
	}
	pub fn new_multi_polygon(value: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
		Self::MultiPolygon(value.into_iter().map(polygon).collect())
	}

	pub fn get_type_name(&self) -> &str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::LineString(_) => "LineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::MultiPolygon(_) => "MultiPolygon",
		}
	}

	/// Checks that lines have at least two positions and polygon rings are closed.
	pub fn verify(&self) -> Result<()> {
		match self {
			Geometry::Point(_) => Ok(()),
			Geometry::LineString(l) => verify_line(l),
			Geometry::Polygon(p) => verify_polygon(p),
			Geometry::MultiPoint(_) => Ok(()),
			Geometry::MultiLineString(m) => m.iter().try_for_each(|l| verify_line(l)),
			Geometry::MultiPolygon(m) => m.iter().try_for_each(|p| verify_polygon(p)),
		}
	}

	pub fn new_example() -> Self {
		Self::new_polygon(vec![vec![
			[8.54, 47.37],
			[8.55, 47.37],
			[8.55, 47.38],
			[8.54, 47.38],
			[8.54, 47.37],
		]])
	}
}

fn verify_line(line: &[Coordinates]) -> Result<()> {
	ensure!(line.len() >= 2, "LineString must have at least two positions");
	Ok(())
}

fn verify_polygon(polygon: &[LineCoordinates]) -> Result<()> {
	ensure!(!polygon.is_empty(), "Polygon must have at least one ring");
	for ring in polygon {
		ensure!(ring.len() >= 4, "Ring must have at least four positions");
		ensure!(ring.first() == ring.last(), "Ring must be closed");
	}
	Ok(())
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let (type_name, inner): (&str, &dyn Debug) = match self {
			Geometry::Point(g) => ("Point", g),
			Geometry::LineString(g) => ("LineString", g),
			Geometry::Polygon(g) => ("Polygon", g),
			Geometry::MultiPoint(g) => ("MultiPoint", g),
			Geometry::MultiLineString(g) => ("MultiLineString", g),
			Geometry::MultiPolygon(g) => ("MultiPolygon", g),
		};
		f.debug_tuple(type_name).field(inner).finish()
	}
}
