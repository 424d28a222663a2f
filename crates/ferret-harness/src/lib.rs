//! Execution-boundary harness for the Ferret locator toolkit.
//!
//! # Scope
//!
//! This crate provides:
//! - **Loaded pages** - an in-memory stand-in for a live, rendered page:
//!   parsed DOM, recovered binding annotations, element scopes, framework
//!   state, and location
//! - **Script hub** - the registry that installs every locator routine
//!   under its wire name and invokes it with JSON arguments
//! - **Readiness polling** - timer-driven probing for the framework global
//!   with a bounded retry budget
//! - **Scope evaluation** - property-path evaluation against the scope
//!   attached to an element
//! - **Location helpers** - absolute-URL reporting and in-page navigation
//!   with digest tracking
//!
//! # Not Yet Implemented
//!
//! - Live request tracking; outstanding requests are modeled as a counter
//!   the embedder drives
//! - Expression evaluation beyond dotted property paths
//!
//! Every failure that crosses the boundary is normalized to the single
//! [`ScriptError`] kind, mirroring how browser-side script errors lose
//! their type when marshalled back to the driver.

pub mod error;
pub mod hub;
pub mod location;
pub mod page;
pub mod ready;
pub mod scope;

pub use error::ScriptError;
pub use hub::{ScriptHub, SCRIPT_NAMES};
pub use location::{get_location_abs_url, set_location};
pub use page::{FrameworkState, LoadedPage};
pub use ready::{await_framework, notify_when_idle, FrameworkPresence, ProbeOutcome, RETRY_DELAY};
pub use scope::evaluate;
