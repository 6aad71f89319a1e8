//! Integration tests for export → import cycles through rendered KML text.

use anyhow::Result;
use digitool_kml::{geojson::read_geojson, meta::get_data, xml::parse_xml, *};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use std::{fs::File, path::PathBuf};

fn get_testdata(filename: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR"))
		.parent()
		.unwrap()
		.join("testdata")
		.join(filename)
}

fn flight_geography() -> Feature {
	let mut feature = Feature::new(Geometry::new_example())
		.with_name("Flight Geography 1")
		.with_layer_type(LayerType::FlightGeography);
	feature.meta.params = Some(json!({"hfg": 120, "cd": 1.2}));
	feature.meta.results = Some(json!({"grb": 45.0}));
	feature
}

fn adjacent_area() -> Feature {
	Feature::new(Geometry::new_example())
		.with_name("Adjacent Area")
		.with_layer_type(LayerType::AdjacentArea)
}

fn export(features: &[Feature], options: &ExportOptions) -> String {
	export_kml(features, options, &ExportContext::default(), &KmlGeometryConverter).unwrap()
}

fn folder_names(kml: &str) -> Vec<String> {
	let root = parse_xml(kml).unwrap();
	root.child("Document")
		.unwrap()
		.children_named("Folder")
		.filter_map(|f| f.child_text("name"))
		.collect()
}

#[test]
fn minimal_flight_geography_round_trip() -> Result<()> {
	let kml = export(&[flight_geography()], &ExportOptions::default());

	let root = parse_xml(&kml)?;
	let document = root.child("Document").unwrap();
	let folder = document.children_named("Folder").next().unwrap();
	assert_eq!(folder.child_text("name").as_deref(), Some("Flight Geometry (FG)"));
	let placemarks: Vec<_> = folder.children_named("Placemark").collect();
	assert_eq!(placemarks.len(), 1);
	let placemark = placemarks[0];
	assert_eq!(placemark.child_text("name").as_deref(), Some("Flight Geography 1"));
	assert_eq!(placemark.child_text("styleUrl").as_deref(), Some("#FGPolygon"));
	assert_eq!(get_data(placemark, "digitool:layerType").as_deref(), Some("FG"));
	let params: serde_json::Value = serde_json::from_str(&get_data(placemark, "digitool:params").unwrap())?;
	assert_eq!(params, json!({"hfg": 120, "cd": 1.2}));

	let imported = import_kml(&kml, &KmlGeometryConverter)?;
	assert_eq!(imported.features.len(), 1);
	assert!(imported.unknowns.is_empty());
	let feature = &imported.features[0];
	assert_eq!(feature.layer_type(), Some(&LayerType::FlightGeography));
	assert_eq!(feature.name.as_deref(), Some("Flight Geography 1"));
	assert_eq!(feature.meta.params.as_ref().unwrap()["hfg"], 120);
	assert_eq!(feature.meta.results, Some(json!({"grb": 45.0})));
	assert_eq!(feature.geometry, Some(Geometry::new_example()));
	assert_eq!(feature.folder.as_deref(), Some("Flight Geometry (FG)"));
	Ok(())
}

#[rstest]
#[case(LayerType::FlightGeography, "Adjacent Area")]
#[case(LayerType::AssembliesHorizon, "FG")]
#[case(LayerType::AdjacentArea, "Assemblies Horizon")]
fn explicit_layer_type_survives_misleading_names(#[case] layer_type: LayerType, #[case] name: &str) -> Result<()> {
	let feature = Feature::new(Geometry::new_example())
		.with_name(name)
		.with_layer_type(layer_type.clone());
	let kml = export(&[feature], &ExportOptions::default());
	let imported = import_kml(&kml, &KmlGeometryConverter)?;
	assert_eq!(imported.features.len(), 1);
	assert_eq!(imported.features[0].layer_type(), Some(&layer_type));
	Ok(())
}

#[test]
fn include_buffers_filters_flight_geography() {
	let options = ExportOptions {
		include: Include::Buffers,
		..ExportOptions::default()
	};
	let kml = export(&[flight_geography(), adjacent_area()], &options);

	assert_eq!(folder_names(&kml), ["Buffers"]);
	assert_eq!(kml.matches("<Placemark>").count(), 1);
	assert!(kml.contains("<name>Adjacent Area</name>"));
	assert!(!kml.contains("Flight Geometry (FG)"));
}

#[test]
fn flattened_documents_import_by_metadata() -> Result<()> {
	let options = ExportOptions {
		flatten: true,
		..ExportOptions::default()
	};
	let kml = export(&[flight_geography(), adjacent_area()], &options);
	assert!(folder_names(&kml).is_empty());

	let imported = import_kml(&kml, &KmlGeometryConverter)?;
	let types: Vec<_> = imported.features.iter().filter_map(Feature::layer_type).collect();
	assert_eq!(types, [&LayerType::FlightGeography, &LayerType::AdjacentArea]);
	Ok(())
}

#[test]
fn hand_written_document() -> Result<()> {
	let text = std::fs::read_to_string(get_testdata("hand_written.kml"))?;
	let imported = import_kml(&text, &KmlGeometryConverter)?;

	assert_eq!(imported.len(), 4);
	let names: Vec<_> = imported.features.iter().filter_map(|f| f.name.as_deref()).collect();
	assert_eq!(names, ["Polygon 1", "adjacent area (north)", "Tagged"]);

	assert_eq!(imported.unknowns.len(), 1);
	let unknown = &imported.unknowns[0];
	assert_eq!(unknown.name.as_deref(), Some("Area 7"));
	assert_eq!(unknown.folder.as_deref(), Some("Misc"));

	let tagged = &imported.features[2];
	assert_eq!(tagged.layer_type(), Some(&LayerType::AssembliesHorizon));
	assert_eq!(tagged.meta.params, Some(json!("not-json")));
	assert_eq!(tagged.geometry, Some(Geometry::new_point([8.545, 47.375])));
	Ok(())
}

#[test]
fn reexported_documents_stay_self_contained() -> Result<()> {
	let text = std::fs::read_to_string(get_testdata("hand_written.kml"))?;
	let imported = import_kml(&text, &KmlGeometryConverter)?;
	let kml = export(&imported.features, &ExportOptions::default());

	let root = parse_xml(&kml)?;
	let document = root.child("Document").unwrap();
	let ids: Vec<_> = document.children_named("Style").filter_map(|s| s.attribute("id")).collect();
	assert_eq!(ids, ["FGPolygon", "AssembliesHorizon", "AdjacentArea"]);

	let reimported = import_kml(&kml, &KmlGeometryConverter)?;
	assert_eq!(reimported.features.len(), 3);
	assert!(reimported.unknowns.is_empty());
	Ok(())
}

#[test]
fn caller_style_url_is_kept() -> Result<()> {
	let feature = adjacent_area().with_style_url("#custom");
	let kml = export(&[feature], &ExportOptions::default());
	let imported = import_kml(&kml, &KmlGeometryConverter)?;
	assert_eq!(imported.features[0].style_url.as_deref(), Some("#custom"));
	Ok(())
}

#[test]
fn inline_style_survives() -> Result<()> {
	let style = Style {
		color: Some("#ff0000".to_string()),
		weight: Some(3.0),
		opacity: Some(1.0),
		fill_color: Some("#00ff00".to_string()),
		fill_opacity: Some(0.3),
	};
	let feature = adjacent_area().with_style(style.clone());
	let kml = export(&[feature], &ExportOptions::default());
	let imported = import_kml(&kml, &KmlGeometryConverter)?;

	let feature = &imported.features[0];
	assert_eq!(feature.style_url, None);
	assert_eq!(feature.style, Some(style));
	Ok(())
}

#[rstest]
#[case(true)]
#[case(false)]
fn caller_style_url_is_kept_whatever_preserve_styles_says(#[case] preserve_styles: bool) -> Result<()> {
	let options = ExportOptions {
		preserve_styles,
		..ExportOptions::default()
	};
	let kml = export(&[adjacent_area().with_style_url("#custom")], &options);
	assert!(!kml.contains("<styleUrl>#AdjacentArea</styleUrl>"), "{kml}");

	let imported = import_kml(&kml, &KmlGeometryConverter)?;
	assert_eq!(imported.features[0].style_url.as_deref(), Some("#custom"));
	Ok(())
}

#[test]
fn context_values_are_embedded() -> Result<()> {
	let context = ExportContext {
		params: Some(json!({"hfg": 150})),
		grb_version: Some("2.5".to_string()),
		..ExportContext::default()
	};
	let kml = export_kml(
		&[flight_geography()],
		&ExportOptions::default(),
		&context,
		&KmlGeometryConverter,
	)?;
	let imported = import_kml(&kml, &KmlGeometryConverter)?;

	let meta = &imported.features[0].meta;
	assert_eq!(meta.params, Some(json!({"hfg": 150})));
	assert_eq!(meta.results, Some(json!({"grb": 45.0})));
	assert_eq!(meta.grb_version.as_deref(), Some("2.5"));
	Ok(())
}

#[test]
fn geojson_input_exports_by_category() -> Result<()> {
	let mut features = read_geojson(File::open(get_testdata("flight_geography.geojson"))?)?;
	features.extend(read_geojson(File::open(get_testdata("buffers.geojson"))?)?);
	assert_eq!(features.len(), 4);

	// untagged features are classified before export, as the importer would
	for feature in &mut features {
		if feature.meta.layer_type.is_none() {
			feature.meta.layer_type = classify(feature.name.as_deref().unwrap_or_default(), "");
		}
	}

	let kml = export(&features, &ExportOptions::default());
	let imported = import_kml(&kml, &KmlGeometryConverter)?;
	let names: Vec<_> = imported.features.iter().filter_map(|f| f.name.as_deref()).collect();
	assert_eq!(names, ["Flight Geography 1", "Assemblies Horizon", "Adjacent Area"]);
	assert_eq!(imported.features[2].style_url.as_deref(), Some("#custom"));
	Ok(())
}
