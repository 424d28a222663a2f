//! HTML tokenizer and tree builder for the Ferret locator toolkit.
//!
//! Parses page markup into a [`ferret_dom::DomTree`] so locator routines can
//! run against it. The tokenizer follows
//! [WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! closely enough for real-world Angular-era markup; the tree builder is a
//! deliberately small stack builder rather than the full insertion-mode
//! machine.
//!
//! # Scope
//!
//! - Start/end tags with attributes, tag and attribute names ASCII-lowercased
//!   (so `ng:model` and `data-ng-repeat` spellings survive verbatim)
//! - Comments, including the `ngRepeat` start/end markers locators walk
//! - Void and self-closing elements
//! - Named and numeric character references (common subset)
//! - Raw text elements (`script`, `style`, ...) so their bodies never leak
//!   into the text content locators match against
//!
//! # Not Implemented
//!
//! - Insertion modes, implied tags, foster parenting, the adoption agency
//!   algorithm. Misnested markup degrades instead of being repaired.
//! - Script data escape states; `<script>` bodies end at the first
//!   case-insensitive `</script>`.
//! - RCDATA entity resolution: `title`/`textarea` are treated as raw text.
//! - CDATA sections and DOCTYPE public/system identifiers.
//! - Character references use direct lookahead rather than the spec's
//!   tokenizer states, and only a common subset of named entities.

/// Tree construction from a token stream.
pub mod parser;
/// HTML tokenizer for converting markup into tokens.
pub mod tokenizer;

pub use parser::{print_tree, HtmlParser, ParseIssue};
pub use tokenizer::{Attribute, HtmlTokenizer, Token};

use ferret_dom::DomTree;

/// Parse a complete document or fragment into a DOM tree.
///
/// Convenience wrapper running the tokenizer and tree builder back to back.
/// Parse issues are logged through the warning facility and otherwise
/// discarded; callers that need them should drive [`HtmlParser`] directly.
#[must_use]
pub fn parse_document(input: &str) -> DomTree {
    let mut tokenizer = HtmlTokenizer::new(input.to_string());
    tokenizer.run();
    let mut parser = HtmlParser::new(tokenizer.into_tokens());
    parser.run();
    let (tree, _issues) = parser.into_document();
    tree
}
