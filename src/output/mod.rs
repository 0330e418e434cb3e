//
//  goinstant-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Everything the `gi` binary prints goes through an [`OutputWriter`].
//! Data is always JSON, on stdout, pretty-printed unless `--json` asks for
//! compact output. Status messages are short lines, coloured when the
//! terminal supports it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use goinstant_api::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Compact);
//! writer.write(&serde_json::json!({"id": 1}))?;
//! writer.write_success("Configuration saved");
//! # Ok::<(), anyhow::Error>(())
//! ```

mod json;

pub use json::*;

use std::io;

use console::style;
use serde::Serialize;
use serde_json::Value;

/// How JSON data is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented, one field per line.
    #[default]
    Pretty,
    /// Single line, for piping into other tools.
    Compact,
}

/// Writes data and status messages for the CLI.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Writer for the global `--json` flag.
    pub fn from_json_flag(compact: bool) -> Self {
        Self::new(if compact {
            OutputFormat::Compact
        } else {
            OutputFormat::Pretty
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a value as JSON to stdout.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        write_json_to(&mut io::stdout().lock(), value, self.format)
    }

    /// Writes a response body, optionally narrowed by a `.a.b[0]` filter.
    pub fn write_body(&self, body: &Value, filter: Option<&str>) -> anyhow::Result<()> {
        match filter {
            Some(filter) => self.write(&select_path(body, filter)?),
            None => self.write(body),
        }
    }

    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_success(&self, msg: &str) {
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}
