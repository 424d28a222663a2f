use core::fmt;

/// An attribute on a start tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the
/// following tokens: DOCTYPE, start tag, end tag, comment, character,
/// end-of-file."
///
/// DOCTYPE tokens carry only their name; public and system identifiers are
/// skipped during tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// DOCTYPE token, name only.
    Doctype {
        /// "DOCTYPE tokens have a name"
        name: Option<String>,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes"
    StartTag {
        /// "a tag name"
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
    },

    /// End tag token. Attributes on end tags are a parse error and dropped.
    EndTag {
        /// "a tag name"
        name: String,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        data: String,
    },

    /// "Comment and character tokens have data."
    Character {
        /// "data"
        data: char,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// "When a start or end tag token is created, its self-closing flag must
    /// be unset... and its attributes list must be empty."
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// Create a new end tag token with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    /// Create a new comment token with empty data.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
        }
    }

    /// Create a new DOCTYPE token with a missing name.
    #[must_use]
    pub const fn new_doctype() -> Self {
        Self::Doctype { name: None }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// "Append the current input character to the current tag token's tag name."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token, indicating a tokenizer bug.
    pub fn append_to_tag_name(&mut self, c: char) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => name.push(c),
            _ => panic!("append_to_tag_name called on non-tag token"),
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    ///
    /// "Append the current input character to the current DOCTYPE token's name."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token, indicating a tokenizer bug.
    pub fn append_to_doctype_name(&mut self, c: char) {
        match self {
            Self::Doctype { name } => match name {
                Some(n) => n.push(c),
                None => *name = Some(String::from(c)),
            },
            _ => panic!("append_to_doctype_name called on non-DOCTYPE token"),
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    ///
    /// "Set the self-closing flag of the current tag token." End tags accept
    /// and ignore the flag, matching the spec's parse-error recovery.
    pub fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// "Append the current input character to the comment token's data."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-comment token, indicating a tokenizer bug.
    pub fn append_to_comment(&mut self, c: char) {
        match self {
            Self::Comment { data } => data.push(c),
            _ => panic!("append_to_comment called on non-comment token"),
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token." End tags drop their
    /// attributes, so only start tags accumulate them.
    pub fn start_new_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } = self {
            attributes.push(Attribute::new(String::new(), String::new()));
        }
    }

    /// "Append the current input character to the current attribute's name."
    pub fn append_to_attribute_name(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self {
            if let Some(attr) = attributes.last_mut() {
                attr.name.push(c);
            }
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub fn append_to_attribute_value(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self {
            if let Some(attr) = attributes.last_mut() {
                attr.value.push(c);
            }
        }
    }

    /// Append a resolved character reference to the current attribute's value.
    pub fn append_str_to_attribute_value(&mut self, s: &str) {
        if let Self::StartTag { attributes, .. } = self {
            if let Some(attr) = attributes.last_mut() {
                attr.value.push_str(s);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "if there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    #[must_use]
    pub fn current_attribute_name_is_duplicate(&self) -> bool {
        match self {
            Self::StartTag { attributes, .. } => attributes.last().is_some_and(|current| {
                attributes[..attributes.len() - 1]
                    .iter()
                    .any(|attr| attr.name == current.name)
            }),
            _ => false,
        }
    }

    /// Remove the current (last) attribute from the token.
    /// Used when a duplicate attribute is detected.
    pub fn remove_current_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } = self {
            let _ = attributes.pop();
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name } => match name {
                Some(n) => write!(f, "DOCTYPE {n}"),
                None => write!(f, "DOCTYPE"),
            },
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => match data {
                '\n' => write!(f, "Character(\\n)"),
                '\t' => write!(f, "Character(\\t)"),
                ' ' => write!(f, "Character(SPACE)"),
                c => write!(f, "Character({c})"),
            },
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
