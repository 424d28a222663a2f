use strum_macros::Display;

use ferret_common::warning::warn_once;

use super::entities::{is_legacy_bare, lookup_named, numeric_to_char};
use super::token::Token;

/// Raw text elements whose content is never parsed as markup.
///
/// `title` and `textarea` are RCDATA per spec; they are grouped here because
/// entity resolution inside them is not implemented.
const RAW_TEXT_ELEMENTS: [&str; 8] = [
    "script", "style", "title", "textarea", "xmp", "iframe", "noembed", "noframes",
];

/// Longest entity name the lookup table can match.
const MAX_ENTITY_NAME: usize = 32;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine, condensed to the states markup fixtures
/// exercise. Each state corresponds to a section in § 13.2.5; character
/// reference states are replaced by a lookahead helper.
#[derive(Debug, PartialEq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    Doctype,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    BeforeDoctypeName,
    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    DoctypeName,
    /// Everything between the DOCTYPE name and `>`, skipped. Public and
    /// system identifiers land here.
    AfterDoctypeName,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RawText,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RawTextLessThanSign,
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    RawTextEndTagOpen,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RawTextEndTagName,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to
/// tokenize HTML."
pub struct HtmlTokenizer {
    state: TokenizerState,
    input: String,
    current_pos: usize,
    current_input_character: Option<char>,
    current_token: Option<Token>,
    token_stream: Vec<Token>,
    at_eof: bool,
    // When true, the next iteration of the main loop will not consume a new
    // character. "Reconsume in the X state" sets this flag.
    reconsume: bool,

    /// "An appropriate end tag token is an end tag token whose tag name
    /// matches the tag name of the last start tag to have been emitted."
    last_start_tag_name: Option<String>,

    /// Buffer for raw text end tag detection, holding the characters as
    /// written so they can be replayed when the candidate end tag fails.
    temporary_buffer: String,
}

impl HtmlTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// "The initial state is the data state."
    #[must_use]
    pub fn new(input: String) -> Self {
        HtmlTokenizer {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            current_token: None,
            token_stream: Vec::new(),
            at_eof: false,
            reconsume: false,
            last_start_tag_name: None,
            temporary_buffer: String::new(),
        }
    }

    /// Run the state machine over the whole input.
    pub fn run(&mut self) {
        while !self.at_eof {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }
            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"');
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'');
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state();
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state();
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
                TokenizerState::BogusComment => self.handle_bogus_comment_state(),
                TokenizerState::MarkupDeclarationOpen => {
                    self.handle_markup_declaration_open_state();
                }
                TokenizerState::CommentStart => self.handle_comment_start_state(),
                TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
                TokenizerState::Comment => self.handle_comment_state(),
                TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
                TokenizerState::CommentEnd => self.handle_comment_end_state(),
                TokenizerState::Doctype => self.handle_doctype_state(),
                TokenizerState::BeforeDoctypeName => self.handle_before_doctype_name_state(),
                TokenizerState::DoctypeName => self.handle_doctype_name_state(),
                TokenizerState::AfterDoctypeName => self.handle_after_doctype_name_state(),
                TokenizerState::RawText => self.handle_raw_text_state(),
                TokenizerState::RawTextLessThanSign => self.handle_raw_text_less_than_sign_state(),
                TokenizerState::RawTextEndTagOpen => self.handle_raw_text_end_tag_open_state(),
                TokenizerState::RawTextEndTagName => self.handle_raw_text_end_tag_name_state(),
            }
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after [`HtmlTokenizer::run`] to get the tokens for the parser.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    // ------------------------------------------------------------------
    // State transitions and input
    // ------------------------------------------------------------------

    /// "Switch to the X state"
    const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Transitions without consuming; the same character is processed again
    /// in the new state.
    const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// "Consume the next input character"
    fn consume(&mut self) -> Option<char> {
        if let Some(c) = self.input[self.current_pos..].chars().next() {
            self.current_pos += c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    /// Peek at a codepoint at the given offset from the current position
    /// without consuming it.
    fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..." with ASCII case-insensitive
    /// comparison.
    fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        target.chars().enumerate().all(|(i, target_char)| {
            self.peek_codepoint(i)
                .is_some_and(|input_char| input_char.eq_ignore_ascii_case(&target_char))
        })
    }

    /// Consume the given ASCII string from the input. Caller must have
    /// already verified the characters are present.
    const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// [§ ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    /// minus CR, which a real input stream normalizes away earlier.
    const fn is_whitespace_char(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\x0C')
    }

    // ------------------------------------------------------------------
    // Token emission
    // ------------------------------------------------------------------

    /// "Emit the current token."
    ///
    /// Start tags for raw text elements switch the tokenizer into the RAWTEXT
    /// state; per spec that switch is the parser's job, but running the
    /// tokenizer to completion first means doing it here.
    fn emit_token(&mut self) {
        if let Some(token) = self.current_token.take() {
            if let Token::StartTag {
                ref name,
                self_closing,
                ..
            } = token
            {
                self.last_start_tag_name = Some(name.clone());
                if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    self.token_stream.push(token);
                    self.switch_to(TokenizerState::RawText);
                    return;
                }
            }
            self.token_stream.push(token);
        }
    }

    /// "Emit the current input character as a character token."
    fn emit_character_token(&mut self, c: char) {
        self.token_stream.push(Token::Character { data: c });
    }

    /// "Emit an end-of-file token."
    fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::EndOfFile);
        self.at_eof = true;
    }

    /// EOF inside a token: log the parse error, then emit end-of-file.
    fn eof_in(&mut self, error: &str) {
        self.log_parse_error(error);
        self.emit_eof_token();
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Parse errors in HTML are not fatal; the tokenizer recovers and
    /// continues. Each distinct error is reported once.
    fn log_parse_error(&self, error: &str) {
        let pos = self.current_pos;
        warn_once("HTML Tokenizer", &format!("{error} at position {pos}"));
    }

    /// "An appropriate end tag token is an end tag token whose tag name
    /// matches the tag name of the last start tag to have been emitted from
    /// this tokenizer, if any."
    fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    // ------------------------------------------------------------------
    // Character references
    // ------------------------------------------------------------------

    /// Resolve a character reference by direct lookahead, the `&` having just
    /// been consumed. Returns the replacement text and leaves the position
    /// after the reference, or returns None with the position untouched.
    ///
    /// Inside attribute values the legacy semicolon-less entities do not
    /// resolve, matching the spec's attribute carve-out.
    fn consume_character_reference(&mut self, in_attribute: bool) -> Option<String> {
        match self.peek_codepoint(0) {
            Some('#') => self.consume_numeric_reference(),
            Some(c) if c.is_ascii_alphanumeric() => self.consume_named_reference(in_attribute),
            _ => None,
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    fn consume_numeric_reference(&mut self) -> Option<String> {
        let saved_pos = self.current_pos;
        self.consume_string("#");

        let hex = matches!(self.peek_codepoint(0), Some('x' | 'X'));
        if hex {
            self.current_pos += 1;
        }

        let mut digits = String::new();
        while let Some(c) = self.peek_codepoint(0) {
            let is_digit = if hex {
                c.is_ascii_hexdigit()
            } else {
                c.is_ascii_digit()
            };
            if !is_digit {
                break;
            }
            digits.push(c);
            self.current_pos += c.len_utf8();
        }

        if digits.is_empty() {
            self.current_pos = saved_pos;
            return None;
        }

        if self.peek_codepoint(0) == Some(';') {
            self.current_pos += 1;
        } else {
            self.log_parse_error("missing-semicolon-after-character-reference");
        }

        let radix = if hex { 16 } else { 10 };
        // Out-of-range values (including overflow) become U+FFFD.
        let code = u32::from_str_radix(&digits, radix).unwrap_or(u32::MAX);
        Some(numeric_to_char(code).to_string())
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    fn consume_named_reference(&mut self, in_attribute: bool) -> Option<String> {
        let mut name = String::new();
        while name.len() < MAX_ENTITY_NAME {
            match self.peek_codepoint(name.len()) {
                Some(c) if c.is_ascii_alphanumeric() => name.push(c),
                _ => break,
            }
        }

        // Canonical form: the whole run followed by a semicolon.
        if self.peek_codepoint(name.len()) == Some(';') {
            if let Some(replacement) = lookup_named(&format!("{name};")) {
                self.consume_string(&name);
                self.consume_string(";");
                return Some(replacement.to_string());
            }
        }

        // Legacy form: longest semicolon-less prefix, text content only.
        if !in_attribute {
            for end in (2..=name.len()).rev() {
                let prefix = &name[..end];
                if is_legacy_bare(prefix) {
                    if let Some(replacement) = lookup_named(prefix) {
                        self.log_parse_error("missing-semicolon-after-character-reference");
                        self.consume_string(prefix);
                        return Some(replacement.to_string());
                    }
                }
            }
        }

        None
    }

    // ------------------------------------------------------------------
    // State handlers
    // ------------------------------------------------------------------

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            Some('&') => {
                if let Some(replacement) = self.consume_character_reference(false) {
                    for c in replacement.chars() {
                        self.emit_character_token(c);
                    }
                } else {
                    self.emit_character_token('&');
                }
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.emit_character_token('\0');
            }
            None => self.emit_eof_token(),
            // "Anything else - Emit the current input character as a
            // character token."
            Some(c) => self.emit_character_token(c),
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            Some('!') => self.switch_to(TokenizerState::MarkupDeclarationOpen),
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            // "Create a new start tag token... Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            Some('?') => {
                self.log_parse_error("unexpected-question-mark-instead-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.emit_character_token('<');
                self.emit_eof_token();
            }
            // "Emit a U+003C LESS-THAN SIGN character token. Reconsume in the
            // data state."
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "missing-end-tag-name parse error. Switch to the data state."
            Some('>') => {
                self.log_parse_error("missing-end-tag-name");
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.emit_eof_token();
            }
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "Append the lowercase version of the current input character...
            // to the current tag token's tag name."
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_tag_name('\u{FFFD}');
                }
            }
            None => self.eof_in("eof-in-tag"),
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_tag_name(c);
                }
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('=') => {
                self.log_parse_error("unexpected-equals-sign-before-attribute-name");
                if let Some(token) = self.current_token.as_mut() {
                    token.start_new_attribute();
                    token.append_to_attribute_name('=');
                }
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some('=') => {
                self.check_duplicate_attribute();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            // "Append the lowercase version of the current input character...
            // to the current attribute's name." Colons pass through, so
            // `ng:model` keeps its spelling.
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_attribute_name(c.to_ascii_lowercase());
                }
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_attribute_name('\u{FFFD}');
                }
            }
            Some(c) if !Self::is_whitespace_char(c) && !matches!(c, '/' | '>') => {
                if matches!(c, '"' | '\'' | '<') {
                    self.log_parse_error("unexpected-character-in-attribute-name");
                }
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_attribute_name(c);
                }
            }
            // Whitespace, '/', '>', and EOF all end the attribute name.
            _ => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in("eof-in-tag"),
            Some(_) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            Some('>') => {
                self.log_parse_error("missing-attribute-value");
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and § 13.2.5.37, which differ only in the closing quote.
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            Some('&') => {
                let replacement = self.consume_character_reference(true);
                if let Some(token) = self.current_token.as_mut() {
                    match replacement {
                        Some(text) => token.append_str_to_attribute_value(&text),
                        None => token.append_to_attribute_value('&'),
                    }
                }
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_attribute_value('\u{FFFD}');
                }
            }
            None => self.eof_in("eof-in-tag"),
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_attribute_value(c);
                }
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => {
                let replacement = self.consume_character_reference(true);
                if let Some(token) = self.current_token.as_mut() {
                    match replacement {
                        Some(text) => token.append_str_to_attribute_value(&text),
                        None => token.append_to_attribute_value('&'),
                    }
                }
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_attribute_value('\u{FFFD}');
                }
            }
            None => self.eof_in("eof-in-tag"),
            Some(c) => {
                if matches!(c, '"' | '\'' | '<' | '=' | '`') {
                    self.log_parse_error("unexpected-character-in-unquoted-attribute-value");
                }
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_attribute_value(c);
                }
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in("eof-in-tag"),
            Some(_) => {
                self.log_parse_error("missing-whitespace-between-attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                if let Some(token) = self.current_token.as_mut() {
                    token.set_self_closing();
                }
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in("eof-in-tag"),
            Some(_) => {
                self.log_parse_error("unexpected-solidus-in-tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.emit_token();
                self.emit_eof_token();
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_comment('\u{FFFD}');
                }
            }
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_comment(c);
                }
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// The first lookahead character has already been consumed when this
    /// state runs, so the checks below are against the remainder.
    fn handle_markup_declaration_open_state(&mut self) {
        match self.current_input_character {
            // "Two U+002D HYPHEN-MINUS characters (-)"
            Some('-') if self.peek_codepoint(0) == Some('-') => {
                self.consume_string("-");
                self.current_token = Some(Token::new_comment());
                self.switch_to(TokenizerState::CommentStart);
            }
            // "ASCII case-insensitive match for the word 'DOCTYPE'"
            Some('d' | 'D') if self.next_few_characters_are_case_insensitive("octype") => {
                self.consume_string("octype");
                self.switch_to(TokenizerState::Doctype);
            }
            _ => {
                self.log_parse_error("incorrectly-opened-comment");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            Some('>') => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_token();
                self.emit_eof_token();
            }
            Some(_) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_comment('-');
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_comment('\u{FFFD}');
                }
            }
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_token();
                self.emit_eof_token();
            }
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_comment(c);
                }
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_token();
                self.emit_eof_token();
            }
            Some(_) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_comment('-');
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment
            // token's data." The extra dash stays buffered for the next pass.
            Some('-') => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_comment('-');
                }
            }
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_token();
                self.emit_eof_token();
            }
            Some(_) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_comment('-');
                    token.append_to_comment('-');
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDoctypeName);
            }
            None => {
                self.log_parse_error("eof-in-doctype");
                self.current_token = Some(Token::new_doctype());
                self.emit_token();
                self.emit_eof_token();
            }
            _ => {
                self.log_parse_error("missing-whitespace-before-doctype-name");
                self.reconsume_in(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.log_parse_error("missing-doctype-name");
                self.current_token = Some(Token::new_doctype());
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.log_parse_error("eof-in-doctype");
                self.current_token = Some(Token::new_doctype());
                self.emit_token();
                self.emit_eof_token();
            }
            Some(c) => {
                let mut token = Token::new_doctype();
                token.append_to_doctype_name(c.to_ascii_lowercase());
                self.current_token = Some(token);
                self.switch_to(TokenizerState::DoctypeName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDoctypeName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.log_parse_error("eof-in-doctype");
                self.emit_token();
                self.emit_eof_token();
            }
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_doctype_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    /// Skip everything between the DOCTYPE name and the closing `>`.
    fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.log_parse_error("eof-in-doctype");
                self.emit_token();
                self.emit_eof_token();
            }
            Some(_) => {}
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    fn handle_raw_text_state(&mut self) {
        match self.current_input_character {
            Some('<') => self.switch_to(TokenizerState::RawTextLessThanSign),
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.emit_character_token('\u{FFFD}');
            }
            None => self.emit_eof_token(),
            Some(c) => self.emit_character_token(c),
        }
    }

    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    fn handle_raw_text_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::RawTextEndTagOpen);
            }
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::RawText);
            }
        }
    }

    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    fn handle_raw_text_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::RawTextEndTagName);
            }
            _ => {
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.reconsume_in(TokenizerState::RawText);
            }
        }
    }

    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    fn handle_raw_text_end_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
                self.temporary_buffer.push(c);
            }
            // "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
            // character token, and a character token for each of the
            // characters in the temporary buffer... Reconsume in the RAWTEXT
            // state."
            _ => {
                self.emit_character_token('<');
                self.emit_character_token('/');
                let buffer = self.temporary_buffer.clone();
                for c in buffer.chars() {
                    self.emit_character_token(c);
                }
                self.current_token = None;
                self.reconsume_in(TokenizerState::RawText);
            }
        }
    }

    /// "if there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.log_parse_error("duplicate-attribute");
            if let Some(token) = self.current_token.as_mut() {
                token.remove_current_attribute();
            }
        }
    }
}
