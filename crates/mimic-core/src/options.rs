// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeSet;

use crate::mirror::FieldKind;

/// Run configuration, built once and shared by every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimicOptions {
	/// Source container name. Only consulted for multi-container pods.
	pub container: Option<String>,
	/// Image for the ephemeral container.
	pub image: String,
	/// Raw `NAME=VALUE` overrides, in command-line order.
	pub env: Vec<String>,
	/// Field kinds that must not be mirrored.
	pub exclude: BTreeSet<FieldKind>,
}

impl MimicOptions {
	pub fn new(image: impl Into<String>) -> Self {
		Self {
			container: None,
			image: image.into(),
			env: Vec::new(),
			exclude: BTreeSet::new(),
		}
	}

	pub fn with_container(mut self, name: impl Into<String>) -> Self {
		self.container = Some(name.into());
		self
	}

	pub fn with_env(mut self, raw: impl Into<String>) -> Self {
		self.env.push(raw.into());
		self
	}

	pub fn excluding(mut self, kind: FieldKind) -> Self {
		self.exclude.insert(kind);
		self
	}
}
