//
//  goinstant-api
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Interactive Prompts
//!
//! Thin wrappers over `dialoguer`, used by `gi config init`.
//!
//! ## Notes
//!
//! - Every prompt needs an interactive terminal; check [`is_interactive`]
//!   first and fall back to flags when it returns `false`
//! - Password input is never echoed

use anyhow::Result;
use console::Term;
use dialoguer::{Confirm, Input, Password};

/// Whether stdout and stderr are attached to a terminal.
pub fn is_interactive() -> bool {
    Term::stderr().is_term() && Term::stdout().is_term()
}

/// Prompts for text, pre-filled with `default`.
///
/// # Example
///
/// ```no_run
/// use goinstant_api::interactive::prompt_input_with_default;
///
/// let endpoint = prompt_input_with_default("Endpoint", "https://api.goinstant.net")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn prompt_input_with_default(message: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(message)
        .default(default.to_string())
        .interact_text()?;
    Ok(input)
}

/// Prompts for optional text. Empty input yields `None`.
pub fn prompt_input_optional(message: &str) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(input).filter(|s| !s.trim().is_empty()))
}

/// Prompts for a secret without echoing it. Empty input yields `None`.
pub fn prompt_password_optional(message: &str) -> Result<Option<String>> {
    let password = Password::new()
        .with_prompt(message)
        .allow_empty_password(true)
        .interact()?;
    Ok(Some(password).filter(|s| !s.is_empty()))
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
