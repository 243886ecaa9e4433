// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derive an ephemeral container patch that mimics an existing pod container.
//!
//! This crate provides:
//! - Pod document validation and source container lookup
//! - Allow-listed, namespaced mirroring of container fields
//! - Parsing and merging of user-supplied environment overrides
//! - Count-based ephemeral container naming
//! - Assembly and rendering of the strategic-merge patch
//!
//! The input document is only ever read; every mirrored value is a deep copy.

pub mod document;
pub mod error;
pub mod locate;
pub mod mirror;
pub mod naming;
pub mod options;
pub mod overlay;
pub mod patch;
pub mod pod;

pub use document::{read_pod, render_patch, write_patch};
pub use error::{MimicError, MimicResult};
pub use locate::{locate, SourceContainer};
pub use mirror::{mirror, FieldKind, ENV_MARKER, MOUNT_ROOT};
pub use naming::{generate_name, NAME_PREFIX};
pub use options::MimicOptions;
pub use overlay::{merge_overrides, parse_overrides, EnvEntry};
pub use patch::assemble;
pub use pod::PodDocument;

use serde_json::Value;
use tracing::debug;

/// Run the full pipeline over `pod` and return the patch document.
pub fn derive_patch(pod: &Value, options: &MimicOptions) -> MimicResult<Value> {
	debug!("performing basic sanity checking");
	let doc = PodDocument::from_value(pod)?;

	debug!("extracting source container from pod specification");
	let source = locate(&doc, options.container.as_deref())?;

	let overrides = parse_overrides(options.env.as_slice())?;

	let name = generate_name(&doc);
	debug!(name = %name, "generated name for ephemeral container");

	let fields = mirror(&source, &options.exclude)?;
	let fields = merge_overrides(fields, overrides);

	let patch = assemble(source.name(), &options.image, &name, fields);
	debug!(patch = %patch, "generated pod specification patch");
	Ok(patch)
}
