//! Scope evaluation.

use ferret_dom::NodeId;
use serde_json::Value;

use crate::error::ScriptError;
use crate::page::LoadedPage;

/// Evaluate a dotted property path against the scope governing `element`.
///
/// The scope is the element's own or the nearest ancestor's, matching
/// framework scope inheritance. A path that runs off the data resolves to
/// `null`, the way a loose expression language treats missing properties.
///
/// # Errors
/// [`ScriptError`] when no scope is attached anywhere on the ancestor
/// chain; evaluation needs a scope to evaluate against.
pub fn evaluate(page: &LoadedPage, element: NodeId, expression: &str) -> Result<Value, ScriptError> {
    let scope = page.scope_for(element).ok_or_else(|| {
        ScriptError::new(format!("no scope attached to the element (evaluating '{expression}')"))
    })?;
    Ok(resolve_path(scope, expression))
}

/// Walk `expression` segment by segment into `scope`.
fn resolve_path(scope: &Value, expression: &str) -> Value {
    let mut current = scope;
    for segment in expression.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return Value::Null,
        }
    }
    current.clone()
}
