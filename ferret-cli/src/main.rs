//! Ferret locator CLI
//!
//! Loads a page from a file, a URL, or an inline string and runs the same
//! locator routines a driver would install, printing matched elements.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ferret_common::net;
use ferret_dom::{parse_selector_list, query_all, NodeId};
use ferret_harness::{FrameworkPresence, LoadedPage, ScriptHub};
use ferret_html::print_tree;
use owo_colors::OwoColorize;
use serde_json::Value;
use std::fs;

#[derive(Parser)]
#[command(name = "ferret", version, about = "Structural locators for Angular-convention pages")]
struct Cli {
    /// Page to load: a file path, an http(s) URL, or markup with --html.
    input: String,

    /// Treat the input as an inline HTML string.
    #[arg(long)]
    html: bool,

    /// Restrict the search to the first element matching this selector.
    #[arg(long, global = true, value_name = "SELECTOR")]
    within: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find elements bound to an expression.
    Binding {
        /// Binding expression to look for.
        expression: String,
        /// Match the whole expression instead of any substring.
        #[arg(long)]
        exact: bool,
    },
    /// Find repeater rows, one row, a column, or a single cell.
    Repeater {
        /// Repetition descriptor, e.g. "cat in cats".
        descriptor: String,
        /// Zero-based row index.
        #[arg(long)]
        row: Option<usize>,
        /// Binding to project out of the matched rows.
        #[arg(long, value_name = "BINDING")]
        column: Option<String>,
    },
    /// Find inputs bound to a model expression.
    Model {
        /// Model expression, matched exactly.
        expression: String,
    },
    /// Find the options generated by an options expression.
    Options {
        /// Options comprehension, matched exactly.
        expression: String,
    },
    /// Find buttons by their visible label.
    Button {
        /// Label text to look for.
        text: String,
        /// Match by substring instead of the whole trimmed label.
        #[arg(long)]
        partial: bool,
    },
    /// Find elements matching a selector whose text contains a needle.
    Text {
        /// CSS selector for the candidate set.
        selector: String,
        /// Substring the text content must contain.
        needle: String,
    },
    /// Report whether the framework bootstrapped on the page.
    Check,
    /// Print the page's absolute URL.
    Url,
    /// Print the parsed DOM tree.
    Dump,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let markup = load_markup(&cli)?;
    let mut hub = ScriptHub::new(LoadedPage::from_html(&markup));

    let scope = cli
        .within
        .as_deref()
        .map(|selector| resolve_scope(hub.page(), selector))
        .transpose()?;

    let (name, args): (&str, Vec<Value>) = match cli.command {
        Command::Binding { expression, exact } => (
            "findBindings",
            vec![Value::String(expression), Value::Bool(exact), scope_value(scope)],
        ),
        Command::Repeater {
            descriptor,
            row: Some(row),
            column: Some(column),
        } => (
            "findRepeaterElement",
            vec![
                Value::String(descriptor),
                Value::from(row),
                Value::String(column),
                scope_value(scope),
            ],
        ),
        Command::Repeater {
            descriptor,
            row: Some(row),
            column: None,
        } => (
            "findRepeaterRows",
            vec![Value::String(descriptor), Value::from(row), scope_value(scope)],
        ),
        Command::Repeater {
            descriptor,
            row: None,
            column: Some(column),
        } => (
            "findRepeaterColumn",
            vec![Value::String(descriptor), Value::String(column), scope_value(scope)],
        ),
        Command::Repeater {
            descriptor,
            row: None,
            column: None,
        } => (
            "findAllRepeaterRows",
            vec![Value::String(descriptor), scope_value(scope)],
        ),
        Command::Model { expression } => (
            "findByModel",
            vec![Value::String(expression), scope_value(scope)],
        ),
        Command::Options { expression } => (
            "findByOptions",
            vec![Value::String(expression), scope_value(scope)],
        ),
        Command::Button { text, partial: false } => (
            "findByButtonText",
            vec![Value::String(text), scope_value(scope)],
        ),
        Command::Button { text, partial: true } => (
            "findByPartialButtonText",
            vec![Value::String(text), scope_value(scope)],
        ),
        Command::Text { selector, needle } => (
            "findByCssContainingText",
            vec![Value::String(selector), Value::String(needle), scope_value(scope)],
        ),
        Command::Check => {
            report_presence(hub.page());
            return Ok(());
        }
        Command::Url => {
            let url = hub.execute("getLocationAbsUrl", &[])?;
            println!("{}", url.as_str().unwrap_or_default());
            return Ok(());
        }
        Command::Dump => {
            print_tree(hub.page().tree(), NodeId::ROOT, 0);
            return Ok(());
        }
    };

    let matched = hub.execute(name, &args)?;
    print_matches(hub.page(), &matched);
    Ok(())
}

/// Load the page markup named by the command line.
fn load_markup(cli: &Cli) -> Result<String> {
    if cli.html {
        return Ok(cli.input.clone());
    }
    if cli.input.starts_with("http://") || cli.input.starts_with("https://") {
        return net::fetch_text(&cli.input).map_err(|message| anyhow!(message));
    }
    fs::read_to_string(&cli.input).with_context(|| format!("failed to read {}", cli.input))
}

/// Resolve a `--within` selector to the first matching element.
fn resolve_scope(page: &LoadedPage, selector: &str) -> Result<NodeId> {
    let list = parse_selector_list(selector)?;
    query_all(page.tree(), NodeId::ROOT, &list)
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("nothing on the page matches `{selector}`"))
}

/// The scope argument as the hub expects it: a handle, or null for the
/// whole document.
fn scope_value(scope: Option<NodeId>) -> Value {
    scope.map_or(Value::Null, |id| Value::from(id.0))
}

fn report_presence(page: &LoadedPage) {
    match page.framework_presence() {
        FrameworkPresence::Ready => {
            println!("{} angular bootstrapped and ready", "ok".green());
        }
        FrameworkPresence::BootstrapPending => {
            println!(
                "{} angular present but manual bootstrap never resumed",
                "!!".yellow()
            );
        }
        FrameworkPresence::Missing => {
            println!("{} angular not found on the page", "--".red());
        }
    }
}

/// Print the handle array a finder routine returned, one element per line.
fn print_matches(page: &LoadedPage, matched: &Value) {
    let handles = matched.as_array().map_or(&[][..], Vec::as_slice);
    match handles.len() {
        0 => println!("{}", "no matches".red()),
        1 => println!("{}", "1 match".green()),
        n => println!("{}", format!("{n} matches").green()),
    }
    for handle in handles {
        let Some(id) = handle.as_u64().and_then(|n| usize::try_from(n).ok()).map(NodeId) else {
            continue;
        };
        println!("  {}", describe(page, id));
    }
}

/// One-line description of a matched element: handle, tag, id, and a text
/// snippet.
fn describe(page: &LoadedPage, id: NodeId) -> String {
    let tree = page.tree();
    let Some(element) = tree.as_element(id) else {
        return format!("[{}]", id.0);
    };

    let mut label = format!("<{}", element.tag_name.cyan());
    if let Some(element_id) = element.id() {
        label.push_str(&format!(" id=\"{element_id}\""));
    }
    label.push('>');

    let text: String = tree
        .text_content(id)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if !text.is_empty() {
        let snippet: String = text.chars().take(60).collect();
        let cut = if text.chars().count() > 60 { "…" } else { "" };
        label.push_str(&format!(" \"{snippet}{cut}\""));
    }

    format!("[{}] {label}", id.0)
}
