use anyhow::{Result, bail, ensure};
use std::fmt::Display;

/// A KML colour literal. KML writes colours as eight hex digits in alpha, blue, green, red order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KmlColor {
	pub a: u8,
	pub b: u8,
	pub g: u8,
	pub r: u8,
}

impl KmlColor {
	pub const fn new(a: u8, b: u8, g: u8, r: u8) -> Self {
		Self { a, b, g, r }
	}

	/// Parses `aabbggrr`. A leading `#` is tolerated.
	pub fn parse_str(value: &str) -> Result<Self> {
		let hex = value.trim().trim_start_matches('#');
		ensure!(
			hex.len() == 8 && hex.bytes().all(|c| c.is_ascii_hexdigit()),
			"KML color must be 8 hex digits (aabbggrr), but got '{value}'"
		);
		let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
		Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?))
	}

	/// Builds a colour from a CSS hex token (`#rgb`, `#rrggbb` or `#rrggbbaa`) and an opacity in `0..=1`.
	///
	/// The opacity replaces any alpha given in the token.
	pub fn from_css(token: &str, opacity: Option<f64>) -> Result<Self> {
		let (r, g, b, a) = parse_css_hex(token)?;
		let a = match opacity {
			Some(opacity) => opacity_to_alpha(opacity),
			None => a,
		};
		Ok(Self::new(a, b, g, r))
	}

	/// Returns the CSS token `#rrggbb` and the opacity.
	pub fn to_css(&self) -> (String, f64) {
		(
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
			alpha_to_opacity(self.a),
		)
	}

	pub fn opacity(&self) -> f64 {
		alpha_to_opacity(self.a)
	}
}

impl Display for KmlColor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:02x}{:02x}{:02x}{:02x}", self.a, self.b, self.g, self.r)
	}
}

fn parse_css_hex(token: &str) -> Result<(u8, u8, u8, u8)> {
	let hex = token.trim();
	let Some(hex) = hex.strip_prefix('#') else {
		bail!("unsupported color token '{token}', expected '#rrggbb'")
	};
	ensure!(
		hex.bytes().all(|c| c.is_ascii_hexdigit()),
		"color token '{token}' contains non-hex characters"
	);
	let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
	let single = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|v| v * 17);
	Ok(match hex.len() {
		3 => (single(0)?, single(1)?, single(2)?, 255),
		6 => (pair(0)?, pair(2)?, pair(4)?, 255),
		8 => (pair(0)?, pair(2)?, pair(4)?, pair(6)?),
		_ => bail!("color token '{token}' must have 3, 6 or 8 hex digits"),
	})
}

fn opacity_to_alpha(opacity: f64) -> u8 {
	(opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn alpha_to_opacity(alpha: u8) -> f64 {
	// two decimals are enough to round-trip every alpha byte
	(f64::from(alpha) / 255.0 * 100.0).round() / 100.0
}
