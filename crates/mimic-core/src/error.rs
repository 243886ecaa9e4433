// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for patch derivation.

use thiserror::Error;

/// Result type alias for mimic operations.
pub type MimicResult<T> = Result<T, MimicError>;

/// Errors that can occur while deriving an ephemeral container patch.
///
/// Every variant is terminal: the pipeline never recovers from one locally.
#[derive(Error, Debug)]
pub enum MimicError {
	/// Input stream is not valid JSON
	#[error("Failed to parse input pod specification as JSON: {0}")]
	InputParse(#[source] serde_json::Error),

	/// Parsed input does not have the shape of a v1 Pod
	#[error("Invalid pod specification: {0}")]
	Schema(String),

	/// Options are insufficient for the given pod
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// Target container does not exist in the pod
	#[error("Could not find container matching target name in input pod specification: {name}")]
	ContainerNotFound { name: String },

	/// Environment override is not of the form `NAME=VALUE`
	#[error("Environment variable is malformed: {raw}")]
	MalformedEnv { raw: String },

	/// Patch could not be serialized or written
	#[error("Failed to write JSON patch data: {0}")]
	OutputWrite(String),
}

impl MimicError {
	/// Create a schema error
	pub fn schema(msg: impl Into<String>) -> Self {
		Self::Schema(msg.into())
	}

	/// Create a configuration error
	pub fn configuration(msg: impl Into<String>) -> Self {
		Self::Configuration(msg.into())
	}

	/// Create an output error
	pub fn output(msg: impl ToString) -> Self {
		Self::OutputWrite(msg.to_string())
	}
}
