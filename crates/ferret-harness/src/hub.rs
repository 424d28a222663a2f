//! The script hub.
//!
//! Installs every locator routine under the wire name drivers invoke it
//! by, decodes externally supplied JSON arguments, and normalizes every
//! failure into [`ScriptError`]. Elements cross the boundary as numeric
//! handles (tree node indices); finder routines always come back as an
//! array of handles, the helper routines as scalars.

use ferret_dom::NodeId;
use ferret_ng::{
    find_all_repeater_rows, find_bindings, find_by_button_text, find_by_css_containing_text,
    find_by_model, find_by_options, find_by_partial_button_text, find_repeater_column,
    find_repeater_element, find_repeater_rows,
};
use serde_json::Value;

use crate::error::ScriptError;
use crate::location::{get_location_abs_url, set_location};
use crate::page::LoadedPage;
use crate::ready::{await_framework, notify_when_idle, ProbeOutcome};
use crate::scope::evaluate;

/// Every routine installed on the hub, by wire name.
///
/// The last two are asynchronous and only reachable through
/// [`ScriptHub::execute_async`]; the rest dispatch synchronously.
pub const SCRIPT_NAMES: [&str; 16] = [
    "findBindings",
    "findRepeaterRows",
    "findAllRepeaterRows",
    "findRepeaterElement",
    "findRepeaterColumn",
    "findByModel",
    "findByOptions",
    "findByButtonText",
    "findByPartialButtonText",
    "findByCssContainingText",
    "evaluate",
    "getLocationAbsUrl",
    "setLocation",
    "allowAnimations",
    "testForAngular",
    "waitForAngular",
];

/// The execution boundary around one loaded page.
#[derive(Debug)]
pub struct ScriptHub {
    page: LoadedPage,
}

impl ScriptHub {
    /// Install the routines around `page`.
    #[must_use]
    pub fn new(page: LoadedPage) -> Self {
        Self { page }
    }

    /// The page the hub executes against.
    #[must_use]
    pub fn page(&self) -> &LoadedPage {
        &self.page
    }

    /// Mutable access to the page, for embedders driving its state.
    pub fn page_mut(&mut self) -> &mut LoadedPage {
        &mut self.page
    }

    /// Invoke the synchronous routine `name` with JSON `args`.
    ///
    /// Contract:
    /// - a missing or `null` scope argument means the whole document;
    /// - finder routines return an array of element handles, possibly
    ///   empty;
    /// - every failure is a [`ScriptError`] whose message names the
    ///   routine and the offending argument where applicable.
    ///
    /// # Errors
    /// [`ScriptError`] for unknown names, undecodable arguments, matcher
    /// errors, and routines that require async execution.
    pub fn execute(&mut self, name: &str, args: &[Value]) -> Result<Value, ScriptError> {
        match name {
            "findBindings" => {
                let binding = string_arg(name, args, 0, "binding")?;
                let exact = bool_arg(name, args, 1, "exactMatch")?.unwrap_or(false);
                let scope = scope_arg(&self.page, name, args, 2)?;
                let matched = find_bindings(&self.page, &binding, exact, scope)?;
                Ok(handles(&matched))
            }
            "findRepeaterRows" => {
                let repeater = string_arg(name, args, 0, "repeater")?;
                let index = index_arg(name, args, 1, "index")?;
                let scope = scope_arg(&self.page, name, args, 2)?;
                Ok(handles(&find_repeater_rows(&self.page, &repeater, index, scope)))
            }
            "findAllRepeaterRows" => {
                let repeater = string_arg(name, args, 0, "repeater")?;
                let scope = scope_arg(&self.page, name, args, 1)?;
                Ok(handles(&find_all_repeater_rows(&self.page, &repeater, scope)))
            }
            "findRepeaterElement" => {
                let repeater = string_arg(name, args, 0, "repeater")?;
                let index = index_arg(name, args, 1, "index")?;
                let binding = string_arg(name, args, 2, "binding")?;
                let scope = scope_arg(&self.page, name, args, 3)?;
                Ok(handles(&find_repeater_element(
                    &self.page, &repeater, index, &binding, scope,
                )))
            }
            "findRepeaterColumn" => {
                let repeater = string_arg(name, args, 0, "repeater")?;
                let binding = string_arg(name, args, 1, "binding")?;
                let scope = scope_arg(&self.page, name, args, 2)?;
                Ok(handles(&find_repeater_column(
                    &self.page, &repeater, &binding, scope,
                )))
            }
            "findByModel" => {
                let model = string_arg(name, args, 0, "model")?;
                let scope = scope_arg(&self.page, name, args, 1)?;
                Ok(handles(&find_by_model(&self.page, &model, scope)))
            }
            "findByOptions" => {
                let options = string_arg(name, args, 0, "options")?;
                let scope = scope_arg(&self.page, name, args, 1)?;
                Ok(handles(&find_by_options(&self.page, &options, scope)))
            }
            "findByButtonText" => {
                let text = string_arg(name, args, 0, "searchText")?;
                let scope = scope_arg(&self.page, name, args, 1)?;
                Ok(handles(&find_by_button_text(&self.page, &text, scope)))
            }
            "findByPartialButtonText" => {
                let text = string_arg(name, args, 0, "searchText")?;
                let scope = scope_arg(&self.page, name, args, 1)?;
                Ok(handles(&find_by_partial_button_text(&self.page, &text, scope)))
            }
            "findByCssContainingText" => {
                let selector = string_arg(name, args, 0, "cssSelector")?;
                let text = string_arg(name, args, 1, "searchText")?;
                let scope = scope_arg(&self.page, name, args, 2)?;
                let matched = find_by_css_containing_text(&self.page, &selector, &text, scope)?;
                Ok(handles(&matched))
            }
            "evaluate" => {
                let element = handle_arg(&self.page, name, args, 0, "element")?;
                let expression = string_arg(name, args, 1, "expression")?;
                evaluate(&self.page, element, &expression)
            }
            "getLocationAbsUrl" => get_location_abs_url(&self.page).map(Value::String),
            "setLocation" => {
                let url = string_arg(name, args, 0, "url")?;
                set_location(&mut self.page, &url)?;
                Ok(Value::Null)
            }
            "allowAnimations" => {
                let value = bool_arg(name, args, 0, "value")?;
                self.page.allow_animations(value).map(Value::Bool)
            }
            "testForAngular" | "waitForAngular" => Err(ScriptError::new(format!(
                "{name} is asynchronous; invoke it through execute_async"
            ))),
            _ => Err(ScriptError::new(format!("unknown script '{name}'"))),
        }
    }

    /// Invoke `name` with JSON `args`, allowing the asynchronous routines.
    ///
    /// `testForAngular` resolves to the wire pair `[ready, reason-or-null]`;
    /// `waitForAngular` resolves to `null` once the page is idle.
    /// Synchronous names pass through to [`ScriptHub::execute`].
    ///
    /// # Errors
    /// As [`ScriptHub::execute`].
    pub async fn execute_async(&mut self, name: &str, args: &[Value]) -> Result<Value, ScriptError> {
        match name {
            "testForAngular" => {
                let attempts = attempts_arg(name, args, 0)?;
                let outcome = self.test_for_framework(attempts).await;
                Ok(outcome_wire(outcome))
            }
            "waitForAngular" => {
                self.wait_until_idle().await?;
                Ok(Value::Null)
            }
            _ => self.execute(name, args),
        }
    }

    /// Poll for the framework global with `attempts` retries.
    pub async fn test_for_framework(&self, attempts: u32) -> ProbeOutcome {
        await_framework(|| self.page.framework_presence(), attempts).await
    }

    /// Resolve once the page has no outstanding tracked requests.
    ///
    /// # Errors
    /// [`ScriptError`] when the page has no framework to consult.
    pub async fn wait_until_idle(&self) -> Result<(), ScriptError> {
        notify_when_idle(&self.page).await
    }
}

/// Element handles as the wire array finders return.
fn handles(ids: &[NodeId]) -> Value {
    Value::Array(ids.iter().map(|id| Value::from(id.0)).collect())
}

/// The probe outcome as its wire pair.
fn outcome_wire(outcome: ProbeOutcome) -> Value {
    let reason = outcome
        .reason()
        .map_or(Value::Null, |reason| Value::String(reason.to_string()));
    Value::Array(vec![Value::Bool(outcome.is_ready()), reason])
}

fn string_arg(script: &str, args: &[Value], index: usize, param: &str) -> Result<String, ScriptError> {
    args.get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ScriptError::new(format!(
                "{script}: expected a string for '{param}' at argument {index}"
            ))
        })
}

fn index_arg(script: &str, args: &[Value], index: usize, param: &str) -> Result<usize, ScriptError> {
    let number = args.get(index).and_then(Value::as_u64).ok_or_else(|| {
        ScriptError::new(format!(
            "{script}: expected a non-negative number for '{param}' at argument {index}"
        ))
    })?;
    usize::try_from(number).map_err(|_| {
        ScriptError::new(format!(
            "{script}: '{param}' at argument {index} is out of range"
        ))
    })
}

fn attempts_arg(script: &str, args: &[Value], index: usize) -> Result<u32, ScriptError> {
    let number = args.get(index).and_then(Value::as_u64).ok_or_else(|| {
        ScriptError::new(format!(
            "{script}: expected a non-negative number for 'attempts' at argument {index}"
        ))
    })?;
    u32::try_from(number).map_err(|_| {
        ScriptError::new(format!(
            "{script}: 'attempts' at argument {index} is out of range"
        ))
    })
}

/// Optional boolean argument; absent and `null` both mean "not given".
fn bool_arg(
    script: &str,
    args: &[Value],
    index: usize,
    param: &str,
) -> Result<Option<bool>, ScriptError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(ScriptError::new(format!(
            "{script}: expected a boolean for '{param}' at argument {index}"
        ))),
    }
}

/// Required element-handle argument, validated against the tree.
fn handle_arg(
    page: &LoadedPage,
    script: &str,
    args: &[Value],
    index: usize,
    param: &str,
) -> Result<NodeId, ScriptError> {
    let number = args.get(index).and_then(Value::as_u64).ok_or_else(|| {
        ScriptError::new(format!(
            "{script}: expected an element handle for '{param}' at argument {index}"
        ))
    })?;
    let id = usize::try_from(number)
        .map(NodeId)
        .map_err(|_| ScriptError::new(format!("{script}: unknown element handle {number}")))?;
    if page.tree().get(id).is_none() {
        return Err(ScriptError::new(format!(
            "{script}: unknown element handle {number}"
        )));
    }
    Ok(id)
}

/// Optional scope argument; absent and `null` mean the whole document.
fn scope_arg(
    page: &LoadedPage,
    script: &str,
    args: &[Value],
    index: usize,
) -> Result<Option<NodeId>, ScriptError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(_)) => handle_arg(page, script, args, index, "using").map(Some),
        Some(_) => Err(ScriptError::new(format!(
            "{script}: expected an element handle for 'using' at argument {index}"
        ))),
    }
}
