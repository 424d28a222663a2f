//! Angular-convention structural matchers for the Ferret locator toolkit.
//!
//! # Scope
//!
//! This crate implements the matching side of element location: each
//! matcher takes a page handle and some search input and resolves it to an
//! ordered collection of element handles.
//!
//! - **Binding lookup** ([`find_bindings`])
//!   - Candidates are the bound-marker-class descendants of the search scope
//!   - Partial (substring) and exact (delimiter-aware) matching against the
//!     annotation the framework attached to each candidate
//!
//! - **Repeater rows** ([`find_repeater_rows`], [`find_all_repeater_rows`])
//!   - Single-element rows from the `repeat` attribute family
//!   - Multi-element rows anchored by `repeat-start`, delimited by sibling
//!     comment markers (see
//!     [`ngRepeat`](https://docs.angularjs.org/api/ng/directive/ngRepeat))
//!
//! - **Repeater columns** ([`find_repeater_element`], [`find_repeater_column`])
//!   - One cell of one row, or a whole column across every row, selected by
//!     binding annotation
//!
//! - **Model and options lookup** ([`find_by_model`], [`find_by_options`])
//!   - Literal attribute-expression matching with directive prefix probing
//!     (see [`ngModel`](https://docs.angularjs.org/api/ng/directive/ngModel))
//!
//! - **Text lookup** ([`find_by_button_text`], [`find_by_partial_button_text`],
//!   [`find_by_css_containing_text`])
//!   - Button labels by trimmed equality or containment
//!   - Arbitrary CSS selection narrowed by text content
//!
//! # Not Implemented
//!
//! - Shadow-root piercing locators
//! - Regular-expression text matching for `cssContainingText`
//! - Live result sets; matchers return a snapshot of handles into the tree
//!
//! Matchers never consult global state. Page access goes through the
//! [`RenderedPage`] capability trait so execution hosts can supply their
//! own page representation; [`AnnotatedPage`] is the canonical one.

pub mod binding;
pub mod column;
pub mod error;
pub mod model;
pub mod page;
pub mod prefix;
pub mod repeater;
pub mod text;

pub use binding::find_bindings;
pub use column::{find_repeater_column, find_repeater_element};
pub use error::MatchError;
pub use model::{find_by_model, find_by_options};
pub use page::{AnnotatedPage, BindingAnnotation, RenderedPage, BOUND_CLASS};
pub use prefix::DIRECTIVE_PREFIXES;
pub use repeater::{collect_segment, find_all_repeater_rows, find_repeater_rows, SegmentEnd};
pub use text::{find_by_button_text, find_by_css_containing_text, find_by_partial_button_text};
