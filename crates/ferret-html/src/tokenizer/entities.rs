//! Character reference lookup tables.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! The full spec defines 2,231 named entities; this table carries the ones
//! that show up in ordinary page markup. An unknown reference is left in the
//! text as literal characters, which is also what the spec's error recovery
//! converges on for most inputs.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Named character references, keyed without the leading `&`.
///
/// Entries with a trailing semicolon are the canonical forms. The handful of
/// legacy entities that historically resolved without a semicolon (`&amp`,
/// `&lt`, ...) have bare keys as well.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp;", "&"),
        ("amp", "&"),
        ("lt;", "<"),
        ("lt", "<"),
        ("gt;", ">"),
        ("gt", ">"),
        ("quot;", "\""),
        ("quot", "\""),
        ("apos;", "'"),
        ("nbsp;", "\u{00A0}"),
        ("copy;", "\u{00A9}"),
        ("reg;", "\u{00AE}"),
        ("trade;", "\u{2122}"),
        ("hellip;", "\u{2026}"),
        ("mdash;", "\u{2014}"),
        ("ndash;", "\u{2013}"),
        ("lsquo;", "\u{2018}"),
        ("rsquo;", "\u{2019}"),
        ("ldquo;", "\u{201C}"),
        ("rdquo;", "\u{201D}"),
        ("bull;", "\u{2022}"),
        ("middot;", "\u{00B7}"),
        ("times;", "\u{00D7}"),
        ("divide;", "\u{00F7}"),
        ("deg;", "\u{00B0}"),
        ("plusmn;", "\u{00B1}"),
        ("frac12;", "\u{00BD}"),
        ("laquo;", "\u{00AB}"),
        ("raquo;", "\u{00BB}"),
        ("sect;", "\u{00A7}"),
        ("para;", "\u{00B6}"),
        ("euro;", "\u{20AC}"),
        ("pound;", "\u{00A3}"),
        ("yen;", "\u{00A5}"),
        ("cent;", "\u{00A2}"),
        ("larr;", "\u{2190}"),
        ("uarr;", "\u{2191}"),
        ("rarr;", "\u{2192}"),
        ("darr;", "\u{2193}"),
    ])
});

/// Look up a named entity by its key (name without the leading `&`,
/// semicolon included for canonical forms).
#[must_use]
pub fn lookup_named(key: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(key).copied()
}

/// Whether a bare (semicolon-less) key is one of the legacy entities that
/// resolve without a terminator.
#[must_use]
pub fn is_legacy_bare(key: &str) -> bool {
    matches!(key, "amp" | "lt" | "gt" | "quot")
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Map a numeric reference code point to a character, substituting U+FFFD for
/// the null, surrogate, and out-of-range values the spec calls out.
#[must_use]
pub fn numeric_to_char(code: u32) -> char {
    if code == 0 || code > 0x0010_FFFF || (0xD800..=0xDFFF).contains(&code) {
        return '\u{FFFD}';
    }
    char::from_u32(code).unwrap_or('\u{FFFD}')
}
