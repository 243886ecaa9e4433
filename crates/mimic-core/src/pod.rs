// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Minimal structural view over an input Pod document.

use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::Resource;
use serde_json::Value;

use crate::error::{MimicError, MimicResult};

/// Borrowed view of the parts of a Pod document the pipeline reads.
///
/// Only the fields needed to locate the source container and name the new
/// ephemeral container are checked; the rest of the document is ignored.
#[derive(Debug, Clone, Copy)]
pub struct PodDocument<'a> {
	containers: &'a [Value],
	ephemeral_containers: Option<&'a [Value]>,
}

impl<'a> PodDocument<'a> {
	/// Validate `value` as a v1 Pod and borrow its container lists.
	pub fn from_value(value: &'a Value) -> MimicResult<Self> {
		let pod = value
			.as_object()
			.ok_or_else(|| MimicError::schema("input pod specification is not a dictionary/map"))?;

		let kind = pod.get("kind").and_then(Value::as_str);
		let api_version = pod.get("apiVersion").and_then(Value::as_str);
		if kind != Some(Pod::KIND) || api_version != Some(Pod::API_VERSION) {
			return Err(MimicError::schema(format!(
				"input pod specification is not of kind \"{}\" version {}",
				Pod::KIND,
				Pod::API_VERSION
			)));
		}

		let spec = pod
			.get("spec")
			.and_then(Value::as_object)
			.ok_or_else(|| MimicError::schema("\"spec\" is missing or not an object"))?;

		let containers = spec
			.get("containers")
			.and_then(Value::as_array)
			.ok_or_else(|| MimicError::schema("\"spec.containers\" is missing or not a list"))?;
		if containers.is_empty() {
			return Err(MimicError::schema("\"spec.containers\" is empty"));
		}

		let ephemeral_containers = match spec.get("ephemeralContainers") {
			None | Some(Value::Null) => None,
			Some(Value::Array(items)) => Some(items.as_slice()),
			Some(_) => {
				return Err(MimicError::schema(
					"\"spec.ephemeralContainers\" is not a list",
				))
			}
		};

		Ok(Self {
			containers,
			ephemeral_containers,
		})
	}

	/// Declared containers, in document order. Never empty.
	pub fn containers(&self) -> &'a [Value] {
		self.containers
	}

	/// Existing ephemeral containers, if the pod declares the field.
	pub fn ephemeral_containers(&self) -> Option<&'a [Value]> {
		self.ephemeral_containers
	}
}
