// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Allow-listed mirroring of source container fields.
//!
//! Only the [`FieldKind`] variants are ever copied. Each copy is a deep clone
//! that is then namespaced in place, so the source document is never touched.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{MimicError, MimicResult};
use crate::locate::SourceContainer;

/// Prefix for mirrored environment variable names and `envFrom` prefixes.
pub const ENV_MARKER: &str = "MIMIC_";

/// Directory under which mirrored volumes are mounted.
pub const MOUNT_ROOT: &str = "/mimic";

/// A container field that can be mirrored into the ephemeral container.
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "clap", value(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
	SecurityContext,
	Env,
	EnvFrom,
	VolumeMounts,
}

impl FieldKind {
	/// All mirrored kinds, in the order they are applied.
	pub const ALL: [FieldKind; 4] = [
		FieldKind::SecurityContext,
		FieldKind::Env,
		FieldKind::EnvFrom,
		FieldKind::VolumeMounts,
	];

	/// Container key this kind is read from and written to.
	pub fn key(self) -> &'static str {
		match self {
			FieldKind::SecurityContext => "securityContext",
			FieldKind::Env => "env",
			FieldKind::EnvFrom => "envFrom",
			FieldKind::VolumeMounts => "volumeMounts",
		}
	}

	/// Namespace a freshly cloned value of this kind.
	fn transform(self, value: &mut Value) -> MimicResult<()> {
		match self {
			FieldKind::SecurityContext => Ok(()),
			FieldKind::Env => {
				for item in entries_mut(self, value)? {
					let name = item
						.get("name")
						.and_then(Value::as_str)
						.ok_or_else(|| MimicError::schema("\"env\" entry has no string \"name\""))?;
					let renamed = format!("{ENV_MARKER}{name}");
					item.insert("name".to_string(), Value::String(renamed));
				}
				Ok(())
			}
			FieldKind::EnvFrom => {
				for item in entries_mut(self, value)? {
					let prefix = match item.get("prefix") {
						None | Some(Value::Null) => ENV_MARKER.to_string(),
						Some(Value::String(prefix)) => format!("{ENV_MARKER}{prefix}"),
						Some(_) => {
							return Err(MimicError::schema(
								"\"envFrom\" entry has a non-string \"prefix\"",
							))
						}
					};
					item.insert("prefix".to_string(), Value::String(prefix));
				}
				Ok(())
			}
			FieldKind::VolumeMounts => {
				for item in entries_mut(self, value)? {
					let path = item
						.get("mountPath")
						.and_then(Value::as_str)
						.ok_or_else(|| {
							MimicError::schema("\"volumeMounts\" entry has no string \"mountPath\"")
						})?;
					let remounted = format!("{MOUNT_ROOT}{path}");
					item.insert("mountPath".to_string(), Value::String(remounted));
				}
				Ok(())
			}
		}
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// View a list-valued field as its object entries.
fn entries_mut(
	kind: FieldKind,
	value: &mut Value,
) -> MimicResult<impl Iterator<Item = &mut Map<String, Value>>> {
	let items = value
		.as_array_mut()
		.ok_or_else(|| MimicError::schema(format!("\"{kind}\" is not a list")))?;

	if items.iter().any(|item| !item.is_object()) {
		return Err(MimicError::schema(format!(
			"\"{kind}\" contains an entry that is not a dictionary/map"
		)));
	}

	Ok(items.iter_mut().filter_map(Value::as_object_mut))
}

/// Copy every eligible field kind present on `source`, namespaced.
///
/// The result contains only fields that were present, not excluded and
/// successfully transformed.
pub fn mirror(
	source: &SourceContainer,
	excluded: &BTreeSet<FieldKind>,
) -> MimicResult<Map<String, Value>> {
	let mut fields = Map::new();

	for kind in FieldKind::ALL {
		if excluded.contains(&kind) {
			debug!(field = %kind, "excluding key from source container");
			continue;
		}

		let Some(original) = source.get(kind.key()) else {
			continue;
		};

		debug!(field = %kind, "cloning key to ephemeral container");
		let mut copy = original.clone();
		kind.transform(&mut copy)?;
		fields.insert(kind.key().to_string(), copy);
	}

	Ok(fields)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::locate::locate;
	use crate::pod::PodDocument;
	use proptest::prelude::*;
	use serde_json::json;

	fn source_from(container: Value) -> SourceContainer {
		let pod = json!({"kind": "Pod", "apiVersion": "v1", "spec": {"containers": [container]}});
		let doc = PodDocument::from_value(&pod).unwrap();
		locate(&doc, None).unwrap()
	}

	fn full_container() -> Value {
		json!({
			"name": "app",
			"image": "nginx",
			"command": ["/bin/app"],
			"securityContext": {"runAsUser": 1000, "capabilities": {"drop": ["ALL"]}},
			"env": [
				{"name": "X", "value": "1"},
				{"name": "SECRET", "valueFrom": {"secretKeyRef": {"name": "s", "key": "k"}}}
			],
			"envFrom": [
				{"configMapRef": {"name": "cm"}},
				{"prefix": "DB_", "secretRef": {"name": "db"}}
			],
			"volumeMounts": [
				{"name": "data", "mountPath": "/data", "readOnly": true},
				{"name": "rel", "mountPath": "relative/../x"}
			]
		})
	}

	#[test]
	fn mirrors_all_known_fields() {
		let fields = mirror(&source_from(full_container()), &BTreeSet::new()).unwrap();

		let keys: Vec<_> = fields.keys().map(String::as_str).collect();
		assert_eq!(keys, ["env", "envFrom", "securityContext", "volumeMounts"]);

		assert_eq!(
			fields["securityContext"],
			json!({"runAsUser": 1000, "capabilities": {"drop": ["ALL"]}})
		);
		assert_eq!(
			fields["env"],
			json!([
				{"name": "MIMIC_X", "value": "1"},
				{"name": "MIMIC_SECRET", "valueFrom": {"secretKeyRef": {"name": "s", "key": "k"}}}
			])
		);
		assert_eq!(
			fields["envFrom"],
			json!([
				{"prefix": "MIMIC_", "configMapRef": {"name": "cm"}},
				{"prefix": "MIMIC_DB_", "secretRef": {"name": "db"}}
			])
		);
		assert_eq!(
			fields["volumeMounts"],
			json!([
				{"name": "data", "mountPath": "/mimic/data", "readOnly": true},
				{"name": "rel", "mountPath": "/mimicrelative/../x"}
			])
		);
	}

	#[test]
	fn never_copies_unlisted_fields() {
		let fields = mirror(&source_from(full_container()), &BTreeSet::new()).unwrap();
		assert!(!fields.contains_key("image"));
		assert!(!fields.contains_key("command"));
		assert!(!fields.contains_key("name"));
	}

	#[test]
	fn excluded_fields_are_absent() {
		for kind in FieldKind::ALL {
			let excluded = BTreeSet::from([kind]);
			let fields = mirror(&source_from(full_container()), &excluded).unwrap();
			assert!(!fields.contains_key(kind.key()), "{kind} was not excluded");
			assert_eq!(fields.len(), 3);
		}
	}

	#[test]
	fn absent_fields_are_skipped() {
		let fields = mirror(&source_from(json!({"name": "bare"})), &BTreeSet::new()).unwrap();
		assert!(fields.is_empty());
	}

	#[test]
	fn null_prefix_is_treated_as_absent() {
		let source = source_from(json!({"name": "a", "envFrom": [{"prefix": null}]}));
		let fields = mirror(&source, &BTreeSet::new()).unwrap();
		assert_eq!(fields["envFrom"], json!([{"prefix": "MIMIC_"}]));
	}

	#[test]
	fn malformed_fields_are_schema_errors() {
		let bad = [
			json!({"name": "a", "env": {"X": "1"}}),
			json!({"name": "a", "env": [{"value": "1"}]}),
			json!({"name": "a", "env": ["X=1"]}),
			json!({"name": "a", "envFrom": [{"prefix": 7}]}),
			json!({"name": "a", "volumeMounts": [{"name": "data"}]}),
		];
		for container in bad {
			let result = mirror(&source_from(container.clone()), &BTreeSet::new());
			assert!(
				matches!(result, Err(MimicError::Schema(_))),
				"expected schema error for {container}"
			);
		}
	}

	#[test]
	fn excluded_malformed_field_is_not_inspected() {
		let source = source_from(json!({"name": "a", "env": "garbage"}));
		let fields = mirror(&source, &BTreeSet::from([FieldKind::Env])).unwrap();
		assert!(fields.is_empty());
	}

	#[test]
	fn mirroring_leaves_source_untouched() {
		let source = source_from(full_container());
		let before = source.clone();
		mirror(&source, &BTreeSet::new()).unwrap();
		assert_eq!(source, before);
		assert_eq!(source.get("env").unwrap()[0]["name"], json!("X"));
	}

	#[test]
	fn mirroring_independent_copies_is_deterministic() {
		let a = mirror(&source_from(full_container()), &BTreeSet::new()).unwrap();
		let b = mirror(&source_from(full_container()), &BTreeSet::new()).unwrap();
		assert_eq!(a, b);
	}

	proptest! {
		/// Every mirrored env name is the original with the marker prepended.
		#[test]
		fn env_names_are_namespaced(names in prop::collection::vec("[A-Z_][A-Z0-9_]{0,15}", 1..8)) {
			let env: Vec<Value> = names.iter().map(|n| json!({"name": n, "value": "v"})).collect();
			let fields = mirror(&source_from(json!({"name": "a", "env": env})), &BTreeSet::new()).unwrap();
			let mirrored = fields["env"].as_array().unwrap();
			for (entry, name) in mirrored.iter().zip(&names) {
				prop_assert_eq!(entry["name"].as_str().unwrap(), format!("MIMIC_{name}"));
				prop_assert_eq!(&entry["value"], &json!("v"));
			}
		}

		/// Mount paths are prefixed verbatim with no normalization.
		#[test]
		fn mount_paths_are_prefixed(path in "[a-z/.]{0,30}") {
			let source = source_from(json!({"name": "a", "volumeMounts": [{"name": "v", "mountPath": path}]}));
			let fields = mirror(&source, &BTreeSet::new()).unwrap();
			prop_assert_eq!(
				&fields["volumeMounts"],
				&json!([{"name": "v", "mountPath": format!("/mimic{path}")}])
			);
		}
	}
}
