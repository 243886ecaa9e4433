// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! k8s-ephemeral-mimic binary.

mod args;

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use args::{is_stdio, Args};

fn main() -> ExitCode {
	let args = Args::parse();
	init_tracing(args.verbose);
	debug!(?args, "parsed arguments");

	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{e:#}");
			ExitCode::FAILURE
		}
	}
}

/// Logs go to stderr; stdout is reserved for the patch document.
fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "info" };
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
		)
		.with_writer(io::stderr)
		.without_time()
		.with_target(false)
		.init();
}

fn run(args: &Args) -> anyhow::Result<()> {
	let options = args.options();

	debug!("reading input pod specification");
	let pod = if is_stdio(&args.input) {
		mimic_core::read_pod(io::stdin().lock())?
	} else {
		let file = File::open(&args.input)
			.with_context(|| format!("failed to open input file {}", args.input.display()))?;
		mimic_core::read_pod(BufReader::new(file))?
	};

	let patch = mimic_core::derive_patch(&pod, &options)?;

	debug!("writing pod specification patch to output");
	if is_stdio(&args.output) {
		mimic_core::write_patch(io::stdout().lock(), &patch)?;
	} else {
		let file = File::create(&args.output)
			.with_context(|| format!("failed to create output file {}", args.output.display()))?;
		mimic_core::write_patch(BufWriter::new(file), &patch)?;
	}

	Ok(())
}
