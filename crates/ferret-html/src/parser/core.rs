use ferret_common::warning::warn_once;
use ferret_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeKind};

use crate::tokenizer::{Attribute, Token};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements."
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// A recoverable problem found while building the tree.
///
/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
/// "The handling of parse errors is well-defined" and never fatal.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// Description of the problem.
    pub message: String,
    /// Index into the token stream where it was encountered.
    pub token_index: usize,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Builds a DOM tree from a token stream. Instead of the spec's insertion
/// modes this builder keeps only the stack of open elements: each start tag
/// nests under the current top, end tags pop to the nearest matching open
/// element, and anything unmatched is recorded as an issue and skipped.
/// Misnested markup therefore degrades rather than being repaired.
pub struct HtmlParser {
    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena. The Document node is the implicit
    /// bottom entry and is never pushed.
    open_elements: Vec<NodeId>,

    /// DOM tree under construction.
    tree: DomTree,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in the token stream.
    token_index: usize,

    /// Character tokens accumulated since the last non-character token.
    /// Flushed into a single Text node, so runs of characters coalesce the
    /// way `Text` nodes do in a browser-built tree.
    pending_text: String,

    /// Issues encountered during construction.
    issues: Vec<ParseIssue>,
}

impl HtmlParser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            open_elements: Vec::new(),
            tree: DomTree::new(),
            tokens,
            token_index: 0,
            pending_text: String::new(),
            issues: Vec::new(),
        }
    }

    /// Run tree construction over the whole token stream.
    pub fn run(&mut self) {
        while self.token_index < self.tokens.len() {
            let token = self.tokens[self.token_index].clone();
            if token.is_eof() {
                break;
            }
            self.process_token(token);
            self.token_index += 1;
        }
        self.flush_pending_text();
    }

    /// Consume the parser, returning the finished tree and any issues.
    #[must_use]
    pub fn into_document(self) -> (DomTree, Vec<ParseIssue>) {
        (self.tree, self.issues)
    }

    /// The node new content is appended to: the innermost open element, or
    /// the Document when the stack is empty.
    fn current_insertion_point(&self) -> NodeId {
        self.open_elements.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn process_token(&mut self, token: Token) {
        if let Token::Character { data } = token {
            self.pending_text.push(data);
            return;
        }
        self.flush_pending_text();

        match token {
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => self.insert_element(name, self_closing, attributes),
            Token::EndTag { name } => self.close_element(&name),
            Token::Comment { data } => {
                let parent = self.current_insertion_point();
                let comment = self.tree.alloc(NodeKind::Comment(data));
                self.tree.append_child(parent, comment);
            }
            // DOCTYPE carries no tree content; quirks handling is out of scope.
            Token::Doctype { .. } | Token::Character { .. } | Token::EndOfFile => {}
        }
    }

    /// Insert an element for a start tag and push it onto the stack unless it
    /// cannot have content.
    fn insert_element(&mut self, name: String, self_closing: bool, attributes: Vec<Attribute>) {
        let is_void = VOID_ELEMENTS.contains(&name.as_str());
        let parent = self.current_insertion_point();

        let element = self.tree.alloc(NodeKind::Element(ElementData {
            tag_name: name,
            attrs: collect_attributes(attributes),
        }));
        self.tree.append_child(parent, element);

        if !is_void && !self_closing {
            self.open_elements.push(element);
        }
    }

    /// Pop the stack through the nearest open element with this tag name,
    /// implicitly closing anything nested inside it.
    fn close_element(&mut self, name: &str) {
        let position = self.open_elements.iter().rposition(|&id| {
            self.tree
                .as_element(id)
                .is_some_and(|data| data.tag_name == name)
        });

        match position {
            Some(index) => self.open_elements.truncate(index),
            None => self.record_issue(format!("stray end tag </{name}>")),
        }
    }

    /// Turn accumulated character tokens into a Text node under the current
    /// insertion point. Whitespace-only runs are kept; locators trim where
    /// their semantics call for it.
    fn flush_pending_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let data = std::mem::take(&mut self.pending_text);
        let parent = self.current_insertion_point();
        let text = self.tree.alloc(NodeKind::Text(data));
        self.tree.append_child(parent, text);
    }

    fn record_issue(&mut self, message: String) {
        warn_once("HTML Parser", &message);
        self.issues.push(ParseIssue {
            message,
            token_index: self.token_index,
        });
    }
}

/// Collapse a token's attribute list into the element's attribute map.
///
/// "if there is already an attribute on the token with the exact same name...
/// the new attribute must be removed". The tokenizer drops exact duplicates;
/// first-wins here covers any that slip through.
fn collect_attributes(attributes: Vec<Attribute>) -> AttributesMap {
    let mut map = AttributesMap::new();
    for attr in attributes {
        let _ = map.entry(attr.name).or_insert(attr.value);
    }
    map
}

/// Print the tree rooted at `id` as an indented outline, for debugging.
///
/// Text nodes are shown with newlines escaped and spaces as `·` so
/// whitespace-only runs stay visible.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.kind {
            NodeKind::Document => {
                println!("{prefix}Document");
            }
            NodeKind::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeKind::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
            NodeKind::Comment(data) => {
                println!("{prefix}<!-- {data} -->");
            }
        }
        for &child in tree.children(id) {
            print_tree(tree, child, indent + 1);
        }
    }
}
