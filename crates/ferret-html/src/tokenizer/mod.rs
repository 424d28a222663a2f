//! HTML tokenizer module.
//!
//! Implements a condensed form of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// HTML tokenizer state machine implementation.
pub mod core;
/// Character reference lookup tables.
pub mod entities;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::HtmlTokenizer;
pub use token::{Attribute, Token};
