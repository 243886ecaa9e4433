// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON codec for the input pod and the output patch.

use std::io::{Read, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{MimicError, MimicResult};

const INDENT: &[u8] = b"    ";

/// Parse a single JSON document from `reader`.
pub fn read_pod<R: Read>(reader: R) -> MimicResult<Value> {
	serde_json::from_reader(reader).map_err(MimicError::InputParse)
}

/// Render `patch` with sorted keys and four-space indentation.
///
/// No trailing newline is emitted.
pub fn render_patch(patch: &Value) -> MimicResult<String> {
	let mut buf = Vec::new();
	let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
	patch.serialize(&mut ser).map_err(MimicError::output)?;
	String::from_utf8(buf).map_err(MimicError::output)
}

/// Render `patch` in full, then write and flush it to `writer`.
pub fn write_patch<W: Write>(mut writer: W, patch: &Value) -> MimicResult<()> {
	let rendered = render_patch(patch)?;
	writer
		.write_all(rendered.as_bytes())
		.and_then(|()| writer.flush())
		.map_err(MimicError::output)
}
