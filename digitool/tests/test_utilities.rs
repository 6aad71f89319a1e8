#![allow(unused)]

use assert_cmd::{Command, cargo};
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

#[cfg(windows)]
pub const BINARY_NAME: &str = "digitool.exe";
#[cfg(not(windows))]
pub const BINARY_NAME: &str = "digitool";

macro_rules! assert_contains {
	($haystack:expr, $needle:expr) => {
		assert!(
			$haystack.contains($needle),
			"expected {:?} to contain {:?}",
			$haystack,
			$needle
		)
	};
}

/// Helper to get a testdata file path.
pub fn get_testdata(filename: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR"))
		.parent()
		.unwrap()
		.join("testdata")
		.join(filename)
}

/// Helper to get a temp output file path.
pub fn get_temp_output(filename: &str) -> (TempDir, PathBuf) {
	let dir = tempdir().expect("failed to create temp dir");
	let path = dir.path().join(filename);
	(dir, path)
}

/// Helper to create a Command for the digitool binary.
pub fn digitool_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

pub struct Output {
	pub success: bool,
	pub code: i32,
	pub stdout: String,
	pub stderr: String,
}

/// Runs digitool with space-separated arguments and captures its output.
pub fn digitool_output(args: &str) -> Output {
	let args: Vec<&str> = args.split(' ').filter(|a| !a.is_empty()).collect();
	run_digitool(&args)
}

pub fn run_digitool(args: &[&str]) -> Output {
	let output = digitool_cmd().args(args).output().expect("failed to run digitool");
	Output {
		success: output.status.success(),
		code: output.status.code().unwrap_or(-1),
		stdout: String::from_utf8(output.stdout).unwrap(),
		stderr: String::from_utf8(output.stderr).unwrap(),
	}
}

pub fn path_str(path: &Path) -> &str {
	path.to_str().unwrap()
}
