// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::pod::PodDocument;

/// Prefix of every generated ephemeral container name.
pub const NAME_PREFIX: &str = "mimic-";

/// Name for the next ephemeral container: `mimic-<existing count>`.
///
/// The suffix is derived from the number of existing entries only. It can
/// collide if an entry outside this scheme already uses the same name.
pub fn generate_name(pod: &PodDocument<'_>) -> String {
	let existing = pod.ephemeral_containers().map_or(0, <[_]>::len);
	format!("{NAME_PREFIX}{existing}")
}
