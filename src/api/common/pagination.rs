//
//  goinstant-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Options for List Endpoints
//!
//! GoInstant list endpoints (`/apps`, `/devs`, `/teams`, `/apps/:app/rooms`, ...)
//! accept a small, fixed set of query parameters for sorting and paging.
//! [`PageOptions`] models that set and turns it into query pairs.
//!
//! # Accepted Keys
//!
//! | Input key | Query key | Notes |
//! |-----------|-----------|-------|
//! | `sort` | `sort` | Field to sort by |
//! | `direction` | `direction` | `asc` or `desc` |
//! | `page` | `page` | 1-indexed page number |
//! | `per_page` | `per_page` | Items per page |
//! | `pageSize` | `per_page` | Legacy name |
//! | `pageNumber` | `page` | Legacy name |
//!
//! Any other key passed to [`PageOptions::from_pairs`] is dropped.
//!
//! # Example
//!
//! ```rust
//! use goinstant_api::api::common::PageOptions;
//!
//! let options = PageOptions::from_pairs([("pageSize", "50"), ("bogus", "x")]);
//! assert_eq!(options.per_page, Some(50));
//!
//! let query = options.to_query();
//! assert_eq!(query.get("per_page").map(String::as_str), Some("50"));
//! assert!(!query.contains_key("bogus"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sorting and paging options for list endpoints.
///
/// All fields are optional; unset fields are left out of the query string so
/// the server defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    /// Field to sort by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Sort direction, `asc` or `desc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,

    /// Page number, starting at 1.
    #[serde(default, alias = "pageNumber", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of items per page.
    #[serde(default, alias = "pageSize", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Builds options from loosely-typed key/value pairs, such as command-line
    /// `key=value` arguments.
    ///
    /// Unknown keys are dropped, as are numeric keys whose value does not
    /// parse. Legacy names (`pageSize`, `pageNumber`) map onto their current
    /// equivalents; when both spellings are given the later pair wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "sort" => options.sort = Some(value.to_string()),
                "direction" => options.direction = Some(value.to_string()),
                "page" | "pageNumber" => {
                    if let Ok(page) = value.parse() {
                        options.page = Some(page);
                    }
                }
                "per_page" | "pageSize" => {
                    if let Ok(per_page) = value.parse() {
                        options.per_page = Some(per_page);
                    }
                }
                other => tracing::debug!("Ignoring unsupported list option '{}'", other),
            }
        }
        options
    }

    /// Whether no option is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Converts the options into query string pairs.
    pub fn to_query(&self) -> BTreeMap<String, String> {
        let mut query = BTreeMap::new();
        if let Some(sort) = &self.sort {
            query.insert("sort".to_string(), sort.clone());
        }
        if let Some(direction) = &self.direction {
            query.insert("direction".to_string(), direction.clone());
        }
        if let Some(page) = self.page {
            query.insert("page".to_string(), page.to_string());
        }
        if let Some(per_page) = self.per_page {
            query.insert("per_page".to_string(), per_page.to_string());
        }
        query
    }
}
