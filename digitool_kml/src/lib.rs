//! KML codec for Digitool flight geography (FG) and ground risk buffers.
//!
//! The crate converts between the internal [`Feature`] model and KML documents. Application
//! metadata (layer type, GRB version, input parameters and computed results) is carried in each
//! placemark's `ExtendedData` block so that it survives an export/import round trip. Placemarks
//! without metadata are classified heuristically from their name and folder.
//!
//! ```
//! use digitool_kml::{
//! 	ExportContext, ExportOptions, Feature, Geometry, KmlGeometryConverter, LayerType, export_kml, import_kml,
//! };
//!
//! let ring = vec![[8.0, 47.0], [8.1, 47.0], [8.1, 47.1], [8.0, 47.0]];
//! let feature = Feature::new(Geometry::new_polygon(vec![ring]))
//! 	.with_name("Flight Geography 1")
//! 	.with_layer_type(LayerType::FlightGeography);
//!
//! let options = ExportOptions::default();
//! let kml = export_kml(&[feature], &options, &ExportContext::default(), &KmlGeometryConverter).unwrap();
//! let imported = import_kml(&kml, &KmlGeometryConverter).unwrap();
//! assert_eq!(imported.features.len(), 1);
//! assert!(imported.unknowns.is_empty());
//! ```

mod classify;
mod feature;
pub mod geojson;
mod geometry;
mod layer_type;
pub mod meta;
mod reader;
pub mod style;
pub mod xml;
mod writer;

pub use classify::*;
pub use feature::*;
pub use geometry::*;
pub use layer_type::*;
pub use meta::Meta;
pub use reader::*;
pub use style::Style;
pub use writer::*;
