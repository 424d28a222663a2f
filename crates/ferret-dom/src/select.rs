//! CSS selector subset for element queries.
//!
//! Implements the slice of [Selectors Level 4](https://www.w3.org/TR/selectors-4/)
//! that locator expressions actually use: type, universal, class, id, and
//! attribute selectors, compound selectors, and the descendant/child
//! combinators, with comma-separated selector groups.
//!
//! Anything outside that subset (pseudo-classes, pseudo-elements, sibling
//! combinators, the rarer attribute operators) is a [`SelectorError`], never
//! a silent non-match.

use crate::{DomTree, ElementData, NodeId};
use thiserror::Error;

/// Failure to parse a selector string into the supported subset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector string was empty or contained only whitespace.
    #[error("empty selector")]
    Empty,

    /// A construct outside the supported subset was encountered.
    #[error("unsupported selector syntax at `{0}`")]
    Unsupported(String),

    /// An attribute selector was missing its closing bracket.
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,

    /// A combinator with no compound selector on one of its sides.
    #[error("combinator without a selector beside it")]
    DanglingCombinator,
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// The attribute match operators the subset supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr]`: the attribute is present, any value.
    Exists,
    /// `[attr=value]`: the value matches exactly.
    Equals(String),
    /// `[attr~=value]`: the value, split on whitespace, contains the word.
    Includes(String),
    /// `[attr*=value]`: the value contains the substring.
    Substring(String),
}

/// An attribute condition: name plus operator.
///
/// Names are compared verbatim, so escaped framework spellings
/// (`[ng\:model]`) resolve to the literal stored attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    /// Attribute name after unescaping.
    pub name: String,
    /// Match operator applied to the attribute's value.
    pub op: AttrOp,
}

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A single condition on one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// Type selector: `div`, `button`, `option`.
    Type(String),
    /// Class selector: `.ng-binding`.
    Class(String),
    /// ID selector: `#main`.
    Id(String),
    /// Universal selector: `*`.
    Universal,
    /// Attribute selector: `[value="2"]`.
    Attribute(AttributeSelector),
}

impl SimpleSelector {
    /// Check whether this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Class(class) => element.has_class(class),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Universal => true,
            Self::Attribute(attr) => match (&attr.op, element.attr(&attr.name)) {
                (AttrOp::Exists, value) => value.is_some(),
                (AttrOp::Equals(want), Some(value)) => value == want,
                (AttrOp::Includes(want), Some(value)) => {
                    value.split_ascii_whitespace().any(|w| w == want)
                }
                (AttrOp::Substring(want), Some(value)) => value.contains(want.as_str()),
                (_, None) => false,
            },
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector... represents a set of simultaneous conditions on a
/// single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simultaneous conditions.
    pub parts: Vec<SimpleSelector>,
}

impl CompoundSelector {
    fn matches(&self, element: &ElementData) -> bool {
        self.parts.iter().all(|s| s.matches(element))
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// The two combinators the subset supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace, as in `A B`: B is an arbitrary descendant of A.
    Descendant,
    /// `>`, as in `A > B`: B is a direct child of A.
    Child,
}

/// One complex selector: a subject compound plus the chain of ancestor
/// conditions leading away from it, stored right-to-left for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// The rightmost compound, the element the selector represents.
    pub subject: CompoundSelector,
    /// `(combinator, compound)` pairs walking up from the subject.
    pub ancestors: Vec<(Combinator, CompoundSelector)>,
}

impl Selector {
    /// Match this selector against an element with full tree context.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(element) = tree.as_element(id) else {
            return false;
        };
        if !self.subject.matches(element) {
            return false;
        }

        let mut current = id;
        for (combinator, compound) in &self.ancestors {
            match combinator {
                Combinator::Child => {
                    let Some(parent) = tree.parent(current) else {
                        return false;
                    };
                    match tree.as_element(parent) {
                        Some(data) if compound.matches(data) => current = parent,
                        _ => return false,
                    }
                }
                Combinator::Descendant => {
                    let found = tree.ancestors(current).find(|&anc| {
                        tree.as_element(anc).is_some_and(|data| compound.matches(data))
                    });
                    match found {
                        Some(anc) => current = anc,
                        None => return false,
                    }
                }
            }
        }
        true
    }
}

/// A comma-separated selector group, e.g.
/// `button, input[type="button"], input[type="submit"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    /// The alternatives; an element matches the list if it matches any.
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    /// Match the group against an element: true if any member matches.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, id))
    }
}

/// Collect every element under `scope` (strict descendants, document order)
/// matching the selector group, the `querySelectorAll` of this subset.
#[must_use]
pub fn query_all(tree: &DomTree, scope: NodeId, list: &SelectorList) -> Vec<NodeId> {
    tree.descendants(scope)
        .filter(|&id| list.matches(tree, id))
        .collect()
}

/// Check if a character can start an identifier.
/// [§ 4.3.10 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Check if a character can continue an identifier.
/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            let _ = self.chars.next();
        }
    }

    /// Consume an identifier, resolving `\x` escapes to the literal `x`.
    fn ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == '\\' {
                let _ = self.chars.next();
                if let Some(escaped) = self.chars.next() {
                    out.push(escaped);
                }
            } else if is_ident_char(c) {
                out.push(c);
                let _ = self.chars.next();
            } else {
                break;
            }
        }
        out
    }

    /// Parse an attribute value: quoted string or unquoted ident.
    fn attr_value(&mut self) -> Result<String, SelectorError> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some(&q @ ('"' | '\'')) => {
                let _ = self.chars.next();
                let mut val = String::new();
                for c in self.chars.by_ref() {
                    if c == q {
                        return Ok(val);
                    }
                    val.push(c);
                }
                Err(SelectorError::UnterminatedAttribute)
            }
            Some(_) => {
                let mut val = String::new();
                while self
                    .chars
                    .peek()
                    .is_some_and(|&c| is_ident_char(c) || c == '.')
                {
                    val.push(self.chars.next().unwrap());
                }
                if val.is_empty() {
                    Err(SelectorError::UnterminatedAttribute)
                } else {
                    Ok(val)
                }
            }
            None => Err(SelectorError::UnterminatedAttribute),
        }
    }

    /// Parse one `[name op value]` attribute selector; the opening `[` has
    /// already been consumed.
    fn attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.ident();
        if name.is_empty() {
            return Err(SelectorError::UnterminatedAttribute);
        }
        self.skip_whitespace();

        let op = match self.chars.peek() {
            Some(']') => {
                let _ = self.chars.next();
                return Ok(AttributeSelector {
                    name,
                    op: AttrOp::Exists,
                });
            }
            Some('=') => {
                let _ = self.chars.next();
                AttrOp::Equals(self.attr_value()?)
            }
            Some(&op @ ('~' | '*')) => {
                let _ = self.chars.next();
                if self.chars.next() != Some('=') {
                    return Err(SelectorError::Unsupported(format!("{op}")));
                }
                let value = self.attr_value()?;
                if op == '~' {
                    AttrOp::Includes(value)
                } else {
                    AttrOp::Substring(value)
                }
            }
            Some(&other @ ('|' | '^' | '$')) => {
                return Err(SelectorError::Unsupported(format!("{other}=")));
            }
            _ => return Err(SelectorError::UnterminatedAttribute),
        };

        self.skip_whitespace();
        if self.chars.next() != Some(']') {
            return Err(SelectorError::UnterminatedAttribute);
        }
        Ok(AttributeSelector { name, op })
    }

    /// Parse one compound selector. Returns None at end of input or before a
    /// combinator/comma.
    fn compound(&mut self) -> Result<Option<CompoundSelector>, SelectorError> {
        let mut parts = Vec::new();
        loop {
            match self.chars.peek() {
                Some('*') => {
                    let _ = self.chars.next();
                    parts.push(SimpleSelector::Universal);
                }
                Some('.') => {
                    let _ = self.chars.next();
                    let name = self.ident();
                    if name.is_empty() {
                        return Err(SelectorError::Unsupported(".".to_string()));
                    }
                    parts.push(SimpleSelector::Class(name));
                }
                Some('#') => {
                    let _ = self.chars.next();
                    let name = self.ident();
                    if name.is_empty() {
                        return Err(SelectorError::Unsupported("#".to_string()));
                    }
                    parts.push(SimpleSelector::Id(name));
                }
                Some('[') => {
                    let _ = self.chars.next();
                    parts.push(SimpleSelector::Attribute(self.attribute()?));
                }
                Some(&c @ (':' | '+' | '~')) if parts.is_empty() => {
                    // ':' is a pseudo-class, '+'/'~' sibling combinators;
                    // neither is in the subset.
                    return Err(SelectorError::Unsupported(format!("{c}")));
                }
                Some(':') => return Err(SelectorError::Unsupported(":".to_string())),
                Some(&c) if is_ident_start_char(c) || c == '\\' => {
                    parts.push(SimpleSelector::Type(self.ident()));
                }
                _ => break,
            }
        }
        if parts.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompoundSelector { parts }))
        }
    }

    /// Parse one complex selector up to a `,` or end of input.
    fn complex(&mut self) -> Result<Selector, SelectorError> {
        // Compounds and the combinators between them, left to right.
        let mut compounds = Vec::new();
        let mut combinators = Vec::new();

        self.skip_whitespace();
        match self.compound()? {
            Some(first) => compounds.push(first),
            None => {
                let rest: String = self.chars.clone().collect();
                return Err(if rest.trim().is_empty() {
                    SelectorError::Empty
                } else {
                    SelectorError::Unsupported(rest.trim().to_string())
                });
            }
        }

        loop {
            let had_space = self.chars.peek().is_some_and(|c| c.is_ascii_whitespace());
            self.skip_whitespace();
            match self.chars.peek() {
                Some('>') => {
                    let _ = self.chars.next();
                    self.skip_whitespace();
                    combinators.push(Combinator::Child);
                }
                Some(&c @ ('+' | '~')) => {
                    return Err(SelectorError::Unsupported(format!("{c}")));
                }
                Some(',') | None => break,
                Some(_) if had_space => combinators.push(Combinator::Descendant),
                Some(&c) => return Err(SelectorError::Unsupported(format!("{c}"))),
            }
            match self.compound()? {
                Some(next) => compounds.push(next),
                None => return Err(SelectorError::DanglingCombinator),
            }
        }

        if compounds.len() != combinators.len() + 1 {
            return Err(SelectorError::DanglingCombinator);
        }

        // The rightmost compound is the subject; the ancestor chain is
        // stored right-to-left so matching walks up from the subject.
        let subject = compounds.pop().unwrap();
        let ancestors = compounds
            .into_iter()
            .zip(combinators)
            .map(|(compound, combinator)| (combinator, compound))
            .rev()
            .collect();

        Ok(Selector { subject, ancestors })
    }
}

/// Parse a raw selector string into a [`SelectorList`].
///
/// # Errors
///
/// Returns a [`SelectorError`] when the string is empty or uses syntax
/// outside the supported subset.
pub fn parse_selector_list(raw: &str) -> Result<SelectorList, SelectorError> {
    if raw.trim().is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut parser = Parser {
        chars: raw.chars().peekable(),
    };
    let mut selectors = vec![parser.complex()?];
    while parser.chars.peek() == Some(&',') {
        let _ = parser.chars.next();
        selectors.push(parser.complex()?);
    }
    Ok(SelectorList { selectors })
}
