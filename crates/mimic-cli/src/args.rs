// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;
use mimic_core::{FieldKind, MimicOptions};

/// Path value standing for stdin/stdout.
pub const STDIO: &str = "-";

/// Inject ephemeral container with mirrored environment, volumes, etc!
#[derive(Parser, Debug)]
#[command(name = "k8s-ephemeral-mimic", version)]
pub struct Args {
	/// Filesystem path to input pod specification in JSON format (default: stdin)
	#[arg(short, long, value_name = "/path/to/pod.json", default_value = STDIO)]
	pub input: PathBuf,

	/// Filesystem path to output pod specification patch in JSON format (default: stdout)
	#[arg(short, long, value_name = "/path/to/patch.json", default_value = STDIO)]
	pub output: PathBuf,

	/// Name of container to mimic (required if pod contains multiple containers)
	#[arg(short, long, value_name = "container-name", env = "MIMIC_CONTAINER")]
	pub container: Option<String>,

	/// Image to use in ephemeral container
	#[arg(
		short = 'I',
		long,
		value_name = "example.com/image_name:latest",
		env = "MIMIC_IMAGE"
	)]
	pub image: String,

	/// Additional environment variable to be set in container (may be used multiple times)
	#[arg(short, long = "env", value_name = "FOO=BAR")]
	pub env: Vec<String>,

	/// Exclude key from mirror of source container specification (may be used multiple times)
	#[arg(short = 'E', long, value_enum)]
	pub exclude: Vec<FieldKind>,

	/// Enable verbose debug logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Args {
	/// Build the immutable pipeline configuration.
	pub fn options(&self) -> MimicOptions {
		MimicOptions {
			container: self.container.clone(),
			image: self.image.clone(),
			env: self.env.clone(),
			exclude: self.exclude.iter().copied().collect::<BTreeSet<_>>(),
		}
	}
}

/// `true` when `path` means stdin/stdout.
pub fn is_stdio(path: &std::path::Path) -> bool {
	path.as_os_str() == STDIO
}
