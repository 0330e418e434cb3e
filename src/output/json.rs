//
//  goinstant-api
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Serialization helpers for the CLI, plus a small path selector for
//! pulling one field out of a response.
//!
//! ## Supported Filters
//!
//! | Filter | Description |
//! |--------|-------------|
//! | `.` | Identity |
//! | `.name` | Field access |
//! | `.owner.email` | Nested field access |
//! | `.[0]`, `.rooms[2].id` | Array index |
//!
//! For anything more involved, pipe the output to `jq`.

use std::io::Write;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

use super::OutputFormat;

/// Serializes `value` in the given format.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    let json = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Writes `value` followed by a newline.
///
/// # Example
///
/// ```rust
/// use goinstant_api::output::{write_json_to, OutputFormat};
///
/// let mut buffer = Vec::new();
/// write_json_to(&mut buffer, &serde_json::json!({"id": 1}), OutputFormat::Compact)?;
/// assert_eq!(String::from_utf8(buffer)?, "{\"id\":1}\n");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
    format: OutputFormat,
) -> Result<()> {
    writeln!(writer, "{}", to_json_string(value, format)?)?;
    Ok(())
}

/// Selects part of a JSON value with a simple `.a.b[0]` path.
///
/// # Errors
///
/// Fails when the filter does not start with `.`, is malformed, or names a
/// field or index that is not present.
pub fn select_path(value: &Value, filter: &str) -> Result<Value> {
    let path = filter
        .strip_prefix('.')
        .with_context(|| format!("Filter must start with '.': {}", filter))?;

    let mut current = value;
    for step in parse_steps(path)? {
        current = match step {
            Step::Field(name) => current
                .get(name)
                .with_context(|| format!("Field '{}' not found", name))?,
            Step::Index(index) => current
                .get(index)
                .with_context(|| format!("Index {} not found", index))?,
        };
    }
    Ok(current.clone())
}

enum Step<'f> {
    Field(&'f str),
    Index(usize),
}

fn parse_steps(path: &str) -> Result<Vec<Step<'_>>> {
    let mut steps = Vec::new();
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let (field, mut rest) = match segment.find('[') {
            Some(pos) => segment.split_at(pos),
            None => (segment, ""),
        };
        if !field.is_empty() {
            steps.push(Step::Field(field));
        }
        while let Some(inner) = rest.strip_prefix('[') {
            let Some(end) = inner.find(']') else {
                bail!("Unclosed '[' in filter: .{}", path);
            };
            let index = inner[..end]
                .parse()
                .with_context(|| format!("Invalid index '{}' in filter", &inner[..end]))?;
            steps.push(Step::Index(index));
            rest = &inner[end + 1..];
        }
        if !rest.is_empty() {
            bail!("Unsupported filter: .{}", path);
        }
    }
    Ok(steps)
}
