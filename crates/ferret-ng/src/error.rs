//! Matcher errors.

use ferret_dom::SelectorError;
use thiserror::Error;

/// Errors surfaced by the structural matchers.
///
/// Absent data is never an error here: a page with no annotations, no rows,
/// or no matching attribute yields an empty collection. The failure modes
/// left are malformed search inputs.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The binding term did not form a valid exact-match pattern.
    #[error("invalid binding pattern `{pattern}`: {source}")]
    BindingPattern {
        /// The pattern as handed to the regex engine.
        pattern: String,
        /// The underlying parse failure.
        source: regex::Error,
    },

    /// The caller-supplied CSS selector could not be parsed.
    #[error(transparent)]
    Selector(#[from] SelectorError),
}
