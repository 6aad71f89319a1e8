//! GeoJSON interchange for features.
//!
//! Features are read from and written to GeoJSON `FeatureCollection`s. Styles travel as
//! simplestyle properties (`stroke`, `stroke-width`, `fill`, …); application metadata travels as
//! the `layerType`, `grbVersion`, `params` and `results` properties.

mod parse;
mod write;

pub use parse::*;
pub use write::*;

pub(crate) const PROPERTY_NAME: &str = "name";
pub(crate) const PROPERTY_STYLE_URL: &str = "styleUrl";
pub(crate) const PROPERTY_STYLE: &str = "style";
pub(crate) const PROPERTY_META: &str = "meta";
pub(crate) const PROPERTY_FOLDER: &str = "folder";
pub(crate) const PROPERTY_LAYER_TYPE: &str = "layerType";
pub(crate) const PROPERTY_GRB_VERSION: &str = "grbVersion";
pub(crate) const PROPERTY_PARAMS: &str = "params";
pub(crate) const PROPERTY_RESULTS: &str = "results";
