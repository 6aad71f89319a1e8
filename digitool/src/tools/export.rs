use crate::config::ContextConfig;
use anyhow::{Context, Result};
use digitool_kml::{
	ExportContext, ExportOptions, Feature, Include, KmlGeometryConverter, build_kml, classify, geojson::read_geojson,
	xml::render_xml,
};
use std::{fs::File, io::BufReader, path::Path};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// GeoJSON files with drawn features and computed buffers, merged in the given order
	#[arg(required = true, num_args = 1..)]
	input_files: Vec<String>,

	/// KML file to write, prints to stdout if omitted
	#[arg(long, short, value_name = "FILE")]
	output: Option<String>,

	/// which layer types to export
	#[arg(long, short, value_enum, default_value_t = Include::All, display_order = 1)]
	include: Include,

	/// drop inline styles and use the default style of the layer type instead; own styleUrls are kept
	#[arg(long, display_order = 2)]
	no_preserve_styles: bool,

	/// write all placemarks directly into the document instead of per-category folders
	#[arg(long, display_order = 2)]
	flatten: bool,

	/// name of the KML document
	#[arg(long, value_name = "NAME", display_order = 2)]
	name: Option<String>,

	/// YAML file with the last-used params and results to embed into every placemark
	#[arg(long, value_name = "FILE", display_order = 3)]
	context: Option<String>,

	/// derive the layer type of untagged features from their name and folder
	#[arg(long, display_order = 3)]
	classify: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mut features = Vec::new();
	for input_file in &arguments.input_files {
		let file = File::open(input_file).with_context(|| format!("failed to open {input_file:?}"))?;
		let mut read =
			read_geojson(BufReader::new(file)).with_context(|| format!("failed to read {input_file:?}"))?;
		log::debug!("read {} features from {input_file:?}", read.len());
		features.append(&mut read);
	}

	if arguments.classify {
		classify_untagged(&mut features);
	}

	let context = match &arguments.context {
		Some(path) => ContextConfig::from_path(Path::new(path))?.into_context(),
		None => ExportContext::default(),
	};
	let options = ExportOptions {
		include: arguments.include,
		preserve_styles: !arguments.no_preserve_styles,
		flatten: arguments.flatten,
		document_name: arguments.name.clone(),
	};

	let root = build_kml(&features, &options, &context, &KmlGeometryConverter)?;
	let exported = root.count_descendants("Placemark");
	let kml = render_xml(&root)?;

	match &arguments.output {
		Some(output_file) => {
			std::fs::write(output_file, kml).with_context(|| format!("failed to write {output_file:?}"))?;
			eprintln!("exported {exported} of {} features to {output_file:?}", features.len());
		}
		None => print!("{kml}"),
	}

	Ok(())
}

fn classify_untagged(features: &mut [Feature]) {
	for feature in features.iter_mut().filter(|f| f.meta.layer_type.is_none()) {
		feature.meta.layer_type = classify(
			feature.name.as_deref().unwrap_or_default(),
			feature.folder.as_deref().unwrap_or_default(),
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use digitool_kml::{Geometry, LayerType};
	use pretty_assertions::assert_eq;
	use tempfile::tempdir;

	#[test]
	fn writes_kml_file() -> Result<()> {
		let dir = tempdir()?;
		let output = dir.path().join("out.kml");
		run_command(vec![
			"digitool",
			"export",
			"-q",
			"../testdata/flight_geography.geojson",
			"-o",
			output.to_str().unwrap(),
		])?;
		let kml = std::fs::read_to_string(&output)?;
		assert!(kml.contains("<name>Flight Geometry (FG)</name>"));
		assert!(kml.contains("<name>Flight Geography 1</name>"));
		Ok(())
	}

	#[test]
	fn missing_input_is_an_error() {
		let error = run_command(vec!["digitool", "export", "-q", "../testdata/missing.geojson"]).unwrap_err();
		assert!(error.to_string().contains("missing.geojson"), "{error}");
	}

	#[test]
	fn classify_only_touches_untagged_features() {
		let mut features = vec![
			Feature::new(Geometry::new_example()).with_name("Adjacent Area"),
			Feature::new(Geometry::new_example())
				.with_name("Adjacent Area")
				.with_layer_type(LayerType::FlightGeography),
			Feature::new(Geometry::new_example()).with_name("Launch site"),
		];
		classify_untagged(&mut features);
		let types: Vec<_> = features.iter().map(|f| f.meta.layer_type.clone()).collect();
		assert_eq!(
			types,
			[Some(LayerType::AdjacentArea), Some(LayerType::FlightGeography), None]
		);
	}
}
