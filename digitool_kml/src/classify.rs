//! Heuristic recovery of a placemark's category from its name and folder name.
//!
//! Rules are plain data evaluated top-down; the first matching rule wins. Matching is
//! case-insensitive and tolerant to the amount of whitespace between words.

use crate::LayerType;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// Which texts a rule looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchScope {
	Name,
	NameOrFolder,
}

pub struct ClassificationRule {
	pub layer_type: LayerType,
	pub scope: MatchScope,
	pub pattern: &'static str,
}

/// Classification rules in evaluation order.
pub fn classification_rules() -> [ClassificationRule; 3] {
	[
		ClassificationRule {
			layer_type: LayerType::FlightGeography,
			scope: MatchScope::NameOrFolder,
			pattern: r"\bfg\b|\bflight\s*geo(?:graph|metry)",
		},
		ClassificationRule {
			layer_type: LayerType::AssembliesHorizon,
			scope: MatchScope::Name,
			pattern: r"assemblies\s*horizon",
		},
		ClassificationRule {
			layer_type: LayerType::AdjacentArea,
			scope: MatchScope::Name,
			pattern: r"adjacent\s*area",
		},
	]
}

lazy_static! {
	static ref COMPILED_RULES: Vec<(Regex, ClassificationRule)> = classification_rules()
		.into_iter()
		.map(|rule| {
			let regex = RegexBuilder::new(rule.pattern)
				.case_insensitive(true)
				.build()
				.unwrap_or_else(|e| panic!("invalid classification pattern '{}': {e}", rule.pattern));
			(regex, rule)
		})
		.collect();
}

/// Returns the category suggested by `name` and `folder`, or `None` if no rule matches.
pub fn classify(name: &str, folder: &str) -> Option<LayerType> {
	COMPILED_RULES
		.iter()
		.find(|(regex, rule)| {
			regex.is_match(name) || (rule.scope == MatchScope::NameOrFolder && regex.is_match(folder))
		})
		.map(|(_, rule)| rule.layer_type.clone())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Assemblies Horizon Buffer", "Buffers", Some(LayerType::AssembliesHorizon))]
	#[case("ASSEMBLIES HORIZON", "", Some(LayerType::AssembliesHorizon))]
	#[case("assemblies   horizon", "x", Some(LayerType::AssembliesHorizon))]
	#[case("AssembliesHorizon", "", Some(LayerType::AssembliesHorizon))]
	#[case("Adjacent Area", "Buffers", Some(LayerType::AdjacentArea))]
	#[case("adjacent\tarea 2", "", Some(LayerType::AdjacentArea))]
	#[case("FG", "", Some(LayerType::FlightGeography))]
	#[case("Polygon 1", "Flight Geometry (FG)", Some(LayerType::FlightGeography))]
	#[case("Flight Geography 1", "", Some(LayerType::FlightGeography))]
	#[case("flight geometry", "", Some(LayerType::FlightGeography))]
	#[case("fg-north", "", Some(LayerType::FlightGeography))]
	#[case("Random Shape", "Untitled", None)]
	#[case("Area 7", "Misc", None)]
	#[case("Config", "", None)]
	#[case("", "", None)]
	fn classification_vectors(#[case] name: &str, #[case] folder: &str, #[case] expected: Option<LayerType>) {
		assert_eq!(classify(name, folder), expected, "classify({name:?}, {folder:?})");
	}

	#[test]
	fn flight_geography_wins_over_later_rules() {
		assert_eq!(classify("Adjacent Area", "Flight Geometry (FG)"), Some(LayerType::FlightGeography));
		assert_eq!(classify("FG assemblies horizon", ""), Some(LayerType::FlightGeography));
	}

	#[test]
	fn buffer_rules_ignore_the_folder() {
		assert_eq!(classify("Polygon 3", "Adjacent Area"), None);
		assert_eq!(classify("Polygon 3", "Assemblies Horizon"), None);
	}

	#[test]
	fn rules_are_ordered_and_compile() {
		let rules = classification_rules();
		assert_eq!(rules[0].layer_type, LayerType::FlightGeography);
		assert_eq!(COMPILED_RULES.len(), rules.len());
	}
}
