// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Selection of the source container to mirror.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{MimicError, MimicResult};
use crate::pod::PodDocument;

/// Deep copy of the container the ephemeral container will mimic.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceContainer {
	name: String,
	fields: Map<String, Value>,
}

impl SourceContainer {
	fn from_value(value: &Value) -> MimicResult<Self> {
		let fields = value
			.as_object()
			.cloned()
			.ok_or_else(|| MimicError::schema("container entry is not a dictionary/map"))?;
		let name = fields
			.get("name")
			.and_then(Value::as_str)
			.ok_or_else(|| MimicError::schema("container entry has no string \"name\""))?
			.to_string();
		Ok(Self { name, fields })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.fields.get(key)
	}
}

/// Pick the source container.
///
/// A single-container pod always yields that container and ignores `target`.
/// Otherwise `target` is required and the first container with that name wins.
pub fn locate(pod: &PodDocument<'_>, target: Option<&str>) -> MimicResult<SourceContainer> {
	let containers = pod.containers();

	if let [only] = containers {
		if let Some(target) = target {
			debug!(container = target, "pod has a single container, ignoring target name");
		}
		return SourceContainer::from_value(only);
	}

	let target = target.filter(|t| !t.is_empty()).ok_or_else(|| {
		MimicError::configuration(
			"input pod specification contains more than one container and no target container name is supplied",
		)
	})?;

	for container in containers {
		let candidate = SourceContainer::from_value(container)?;
		if candidate.name() == target {
			debug!(container = target, "found container matching target name");
			return Ok(candidate);
		}
	}

	Err(MimicError::ContainerNotFound {
		name: target.to_string(),
	})
}
