//! YAML file holding the last-used inputs and results embedded into exported placemarks.
//!
//! ```yaml
//! grbVersion: "2.5"
//! params:
//!   hfg: 120
//! results:
//!   grb: 45.0
//! ```

use anyhow::{Context, Result};
use digitool_kml::ExportContext;
use serde::Deserialize;
use serde_json::Value;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ContextConfig {
	/// Last-used input parameters
	#[serde(default)]
	pub params: Option<Value>,

	/// Last-computed result metrics
	#[serde(default)]
	pub results: Option<Value>,

	/// Version of the ground risk buffer model
	#[serde(default)]
	pub grb_version: Option<String>,
}

impl ContextConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("failed to open context file {path:?}"))?;
		Self::from_reader(BufReader::new(file)).with_context(|| format!("failed to parse context file {path:?}"))
	}

	pub fn into_context(self) -> ExportContext {
		ExportContext {
			params: self.params,
			results: self.results,
			grb_version: self.grb_version,
			app_version: env!("CARGO_PKG_VERSION").to_string(),
		}
	}
}
