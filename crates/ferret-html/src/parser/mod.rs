//! HTML tree construction module.
//!
//! A condensed take on
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction):
//! a stack builder without insertion modes, sufficient for well-formed pages
//! and fixture fragments.

/// Tree builder implementation.
pub mod core;

pub use self::core::{print_tree, HtmlParser, ParseIssue};
