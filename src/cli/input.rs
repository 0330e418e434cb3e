//
//  goinstant-api
//  cli/input.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Parsing of command-line input into JSON bodies, query pairs and headers.
//!
//! ```bash
//! gi apps create -F name=chat -F settings.guest=true
//! # {"name": "chat", "settings": {"guest": true}}
//! ```

use std::fs;
use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use crate::api::common::PageOptions;

/// Request body taken from `-F key=value` fields or a JSON file.
#[derive(Args, Debug, Clone, Default)]
pub struct BodyArgs {
    /// Body field as key=value; dots in the key nest objects (repeatable)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Read the JSON body from a file (- for stdin)
    #[arg(long, short = 'f', conflicts_with = "field")]
    pub input: Option<String>,
}

impl BodyArgs {
    /// The body, or `None` when neither fields nor a file were given.
    pub fn body(&self) -> Result<Option<Value>> {
        if let Some(input) = &self.input {
            return read_body(input).map(Some);
        }
        if self.field.is_empty() {
            return Ok(None);
        }
        parse_fields(&self.field).map(Some)
    }

    /// The body, defaulting to an empty object.
    pub fn object(&self) -> Result<Value> {
        Ok(self.body()?.unwrap_or_else(|| Value::Object(Map::new())))
    }
}

/// Sorting and paging flags for list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Field to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction (asc or desc)
    #[arg(long, value_parser = ["asc", "desc"])]
    pub direction: Option<String>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub per_page: Option<u32>,
}

impl ListArgs {
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            sort: self.sort.clone(),
            direction: self.direction.clone(),
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Reads a JSON document from a file, or from stdin for `-`.
pub fn read_body(input: &str) -> Result<Value> {
    let content = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", input))
}

/// Builds a JSON object from `key=value` fields.
pub fn parse_fields(fields: &[String]) -> Result<Value> {
    let mut body = Map::new();
    for field in fields {
        let (key, value) = split_pair(field, '=')?;
        set_nested_value(&mut body, key, parse_value(value));
    }
    Ok(Value::Object(body))
}

/// Interprets a command-line value as JSON where it looks like JSON, and as
/// a plain string otherwise.
pub fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = raw.parse::<i64>() {
                return Value::Number(n.into());
            }
            if let Some(n) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                return Value::Number(n);
            }
            if raw.starts_with('[') || raw.starts_with('{') || raw.starts_with('"') {
                if let Ok(value) = serde_json::from_str(raw) {
                    return value;
                }
            }
            Value::String(raw.to_string())
        }
    }
}

/// Parses `key=value` query pairs.
pub fn parse_pairs(pairs: &[String]) -> Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| {
            split_pair(pair, '=').map(|(key, value)| (key.to_string(), value.to_string()))
        })
        .collect()
}

/// Parses a `Name: Value` header.
pub fn parse_header(header: &str) -> Result<(String, String)> {
    let (name, value) = split_pair(header, ':')
        .with_context(|| format!("Invalid header format: {}. Expected 'Name: Value'", header))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn split_pair(pair: &str, separator: char) -> Result<(&str, &str)> {
    match pair.split_once(separator) {
        Some((key, value)) if !key.trim().is_empty() => Ok((key, value)),
        _ => bail!("Invalid format: {}. Expected key{}value", pair, separator),
    }
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}
