use anyhow::{Context, Result};
use digitool_kml::{KmlGeometryConverter, geojson::features_to_geojson, import_kml};
use std::path::Path;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// KML file to import
	#[arg()]
	input_file: String,

	/// GeoJSON file for the classified features, prints to stdout if omitted
	#[arg(long, short, value_name = "FILE")]
	output: Option<String>,

	/// GeoJSON file for placemarks that could not be classified
	#[arg(long, short, value_name = "FILE")]
	unknowns: Option<String>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let text = std::fs::read_to_string(&arguments.input_file)
		.with_context(|| format!("failed to read {:?}", arguments.input_file))?;
	let import = import_kml(&text, &KmlGeometryConverter)?;

	eprintln!(
		"imported {} features, {} unknown",
		import.features.len(),
		import.unknowns.len()
	);

	write_geojson(arguments.output.as_deref(), &import.features)?;

	match &arguments.unknowns {
		Some(path) => write_geojson(Some(path.as_str()), &import.unknowns)?,
		None if !import.unknowns.is_empty() => {
			eprintln!(
				"dropped {} unknown placemarks, use --unknowns to keep them",
				import.unknowns.len()
			);
		}
		None => {}
	}

	Ok(())
}

fn write_geojson(path: Option<&str>, features: &[digitool_kml::Feature]) -> Result<()> {
	let json = serde_json::to_string_pretty(&features_to_geojson(features))?;
	match path {
		Some(path) => std::fs::write(Path::new(path), json).with_context(|| format!("failed to write {path:?}")),
		None => {
			println!("{json}");
			Ok(())
		}
	}
}
