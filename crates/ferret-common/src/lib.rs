//! Common utilities for the Ferret locator toolkit.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - deduplicated colored terminal output for parse
//!   issues and structural anomalies found while matching
//! - **Fetching** - blocking HTTP GET for loading pages by URL

pub mod net;
pub mod warning;
