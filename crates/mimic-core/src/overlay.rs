// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User-supplied environment variables layered on top of the mirrored ones.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{MimicError, MimicResult};

/// A `NAME=VALUE` override supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
	pub name: String,
	pub value: String,
}

impl EnvEntry {
	/// Parse a single `NAME=VALUE` string, splitting on the first `=`.
	pub fn parse(raw: &str) -> MimicResult<Self> {
		match raw.split_once('=') {
			Some((name, value)) if !name.is_empty() && !value.is_empty() => Ok(Self {
				name: name.to_string(),
				value: value.to_string(),
			}),
			_ => Err(MimicError::MalformedEnv {
				raw: raw.to_string(),
			}),
		}
	}

	pub fn into_value(self) -> Value {
		json!({"name": self.name, "value": self.value})
	}
}

/// Parse every override in order. Duplicate names are passed through as-is.
pub fn parse_overrides<S: AsRef<str>>(raw: &[S]) -> MimicResult<Vec<EnvEntry>> {
	let entries = raw
		.iter()
		.map(|r| EnvEntry::parse(r.as_ref()))
		.collect::<MimicResult<Vec<_>>>()?;
	debug!(count = entries.len(), "parsed additional environment variables");
	Ok(entries)
}

/// Append `overrides` after any mirrored `env` entries.
///
/// Mirrored names all carry the `MIMIC_` marker, so no deduplication is done.
pub fn merge_overrides(
	mut fields: Map<String, Value>,
	overrides: Vec<EnvEntry>,
) -> Map<String, Value> {
	if overrides.is_empty() {
		return fields;
	}

	debug!(
		count = overrides.len(),
		"appending additionally specified environment variables"
	);
	let extra = overrides.into_iter().map(EnvEntry::into_value);

	match fields.get_mut("env").and_then(Value::as_array_mut) {
		Some(env) => env.extend(extra),
		None => {
			fields.insert("env".to_string(), Value::Array(extra.collect()));
		}
	}

	fields
}
