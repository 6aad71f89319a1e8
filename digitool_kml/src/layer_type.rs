//! Semantic categories of exported and imported features.
//!
//! A [`LayerType`] decides which folder a placemark is routed into, which default style it
//! references and whether an export scope ([`Include`]) keeps it. Tags read from foreign
//! documents that match none of the known categories are preserved verbatim in
//! [`LayerType::Unknown`] and treated as unresolved.

#[cfg(feature = "cli")]
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerType {
	/// Flight geography, the user-drawn operation footprint.
	FlightGeography,
	AssembliesHorizon,
	AdjacentArea,
	/// A tag outside the known categories, kept as written.
	Unknown(String),
}

/// Top-level folder a resolved placemark belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerFolder {
	FlightGeometry,
	Buffers,
}

impl LayerFolder {
	pub fn name(&self) -> &'static str {
		match self {
			LayerFolder::FlightGeometry => "Flight Geometry (FG)",
			LayerFolder::Buffers => "Buffers",
		}
	}
}

impl LayerType {
	pub const KNOWN: [LayerType; 3] = [
		LayerType::FlightGeography,
		LayerType::AssembliesHorizon,
		LayerType::AdjacentArea,
	];

	/// Parses a metadata tag. Matching is exact, as tags are written by this crate.
	pub fn parse_str(value: &str) -> Self {
		match value.trim() {
			"FG" => LayerType::FlightGeography,
			"AssembliesHorizon" => LayerType::AssembliesHorizon,
			"AdjacentArea" => LayerType::AdjacentArea,
			other => LayerType::Unknown(other.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			LayerType::FlightGeography => "FG",
			LayerType::AssembliesHorizon => "AssembliesHorizon",
			LayerType::AdjacentArea => "AdjacentArea",
			LayerType::Unknown(tag) => tag,
		}
	}

	/// `true` for the three known categories.
	pub fn is_resolved(&self) -> bool {
		!matches!(self, LayerType::Unknown(_))
	}

	pub fn folder(&self) -> Option<LayerFolder> {
		match self {
			LayerType::FlightGeography => Some(LayerFolder::FlightGeometry),
			LayerType::AssembliesHorizon | LayerType::AdjacentArea => Some(LayerFolder::Buffers),
			LayerType::Unknown(_) => None,
		}
	}

	/// Id of the document-level default style, without the leading `#`.
	pub fn style_id(&self) -> Option<&'static str> {
		match self {
			LayerType::FlightGeography => Some("FGPolygon"),
			LayerType::AssembliesHorizon => Some("AssembliesHorizon"),
			LayerType::AdjacentArea => Some("AdjacentArea"),
			LayerType::Unknown(_) => None,
		}
	}

	/// `styleUrl` referencing the default style, e.g. `#FGPolygon`.
	pub fn style_url(&self) -> Option<String> {
		self.style_id().map(|id| format!("#{id}"))
	}
}

impl Display for LayerType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for LayerType {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for LayerType {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = String::deserialize(deserializer)?;
		Ok(LayerType::parse_str(&value))
	}
}

/// Export scope: which categories are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Include {
	/// Flight geography and buffers.
	#[default]
	All,
	/// Only flight geography.
	Fg,
	/// Only the computed buffers.
	Buffers,
}

impl Include {
	pub fn accepts(&self, layer_type: &LayerType) -> bool {
		match (self, layer_type) {
			(_, LayerType::Unknown(_)) => false,
			(Include::All, _) => true,
			(Include::Fg, LayerType::FlightGeography) => true,
			(Include::Fg, _) => false,
			(Include::Buffers, LayerType::AssembliesHorizon | LayerType::AdjacentArea) => true,
			(Include::Buffers, LayerType::FlightGeography) => false,
		}
	}

	/// Folders present in a non-flattened document for this scope, in document order.
	pub fn folders(&self) -> &'static [LayerFolder] {
		match self {
			Include::All => &[LayerFolder::FlightGeometry, LayerFolder::Buffers],
			Include::Fg => &[LayerFolder::FlightGeometry],
			Include::Buffers => &[LayerFolder::Buffers],
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Include::All => "all",
			Include::Fg => "fg",
			Include::Buffers => "buffers",
		}
	}
}

impl Display for Include {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
