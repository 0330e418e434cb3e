//
//  goinstant-api
//  api/v1/devs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Developer accounts: `/devs` and `/devs/:dev`.
//!
//! `dev("self")` addresses the developer the client is authenticated as.

use super::resource::{Collection, Member};

pub const DEVS_PATH: &str = "/devs";

/// Id segment of the authenticated developer.
pub const SELF: &str = "self";

/// The `/devs` collection.
pub type Devs<'a> = Collection<'a>;

/// A single developer.
pub type Dev<'a> = Member<'a>;
