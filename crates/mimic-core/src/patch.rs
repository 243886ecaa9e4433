// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde_json::{json, Map, Value};

/// Wrap the ephemeral container into a strategic-merge pod patch.
///
/// Produces `{"spec": {"ephemeralContainers": [container]}}` where the
/// container is `fields` plus the identity keys.
pub fn assemble(
	target_container_name: &str,
	image: &str,
	name: &str,
	fields: Map<String, Value>,
) -> Value {
	let mut container = fields;
	container.insert(
		"targetContainerName".to_string(),
		Value::String(target_container_name.to_string()),
	);
	container.insert("image".to_string(), Value::String(image.to_string()));
	container.insert("name".to_string(), Value::String(name.to_string()));

	json!({"spec": {"ephemeralContainers": [container]}})
}
