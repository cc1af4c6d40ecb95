//! Strategies for locating the reply inside a parsed upstream envelope.
//!
//! Strategies are tried in order; the first to return a candidate wins.
//! When none matches, the raw body is the candidate.

use serde_json::Value;

/// A named extractor over a parsed upstream body.
#[derive(Clone, Copy)]
pub struct ShapeStrategy {
    pub name: &'static str,
    pub extract: fn(&Value) -> Option<Value>,
}

/// Strategies in priority order.
pub const STRATEGIES: &[ShapeStrategy] = &[ShapeStrategy {
    name: "chat_completion",
    extract: chat_completion_message,
}];

/// Return the first candidate produced by [`STRATEGIES`], with the name of
/// the strategy that produced it.
pub fn extract_candidate(envelope: &Value) -> Option<(&'static str, Value)> {
    STRATEGIES
        .iter()
        .find_map(|strategy| (strategy.extract)(envelope).map(|v| (strategy.name, v)))
}

/// OpenAI-style `choices[0].message`. An object message with a truthy
/// `content` yields that content; any other truthy message yields itself.
fn chat_completion_message(envelope: &Value) -> Option<Value> {
    let message = envelope.pointer("/choices/0/message")?;

    if let Some(content) = message.get("content").filter(|c| is_truthy(c)) {
        return Some(content.clone());
    }
    is_truthy(message).then(|| message.clone())
}

/// Loose truthiness: null, false, zero and "" are empty.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
