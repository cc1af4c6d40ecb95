//! Response normalization: turn whatever upstream sent into the cleanest
//! JSON value available.
//!
//! Upstream models often answer with JSON serialized inside a string,
//! sometimes wrapped in markdown code fences, sometimes nested inside an
//! OpenAI-style `choices[0].message`. [`normalize_body`] unwraps those
//! layers. Nothing here fails: a parse error leaves the text as a string.

pub mod shapes;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// A fenced block anywhere in the text: ```` ``` ```` optionally tagged
/// `json` and followed by a newline, the interior, then the next fence.
static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?[ \t]*\n?(.*?)```").unwrap());

/// Strip markdown fences from `text`, keeping their interiors.
///
/// A fence enclosing the whole text is peeled first, repeatedly, then every
/// remaining fence pair is replaced by its interior. When the text merely
/// starts and ends with two separate blocks, peeling would splice them
/// together; if the peeled text is not valid JSON the blocks are replaced
/// pairwise from the untouched text instead.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();

    let mut peeled = trimmed;
    while let Some(inner) = peel_enclosing_fence(peeled) {
        peeled = inner.trim();
    }

    let cleaned = replace_fenced_blocks(peeled);
    if peeled.len() == trimmed.len() || parses_as_json(&cleaned) {
        return cleaned;
    }
    replace_fenced_blocks(trimmed)
}

fn replace_fenced_blocks(text: &str) -> String {
    FENCED_BLOCK.replace_all(text, "${1}").trim().to_string()
}

/// Interior of a fence wrapping all of `text`, if any.
fn peel_enclosing_fence(text: &str) -> Option<&str> {
    let body = text.strip_prefix("```")?.strip_suffix("```")?;
    let body = body
        .strip_prefix("json")
        .unwrap_or(body)
        .trim_start_matches([' ', '\t']);
    Some(body.strip_prefix('\n').unwrap_or(body))
}

fn parses_as_json(text: &str) -> bool {
    looks_like_json(text) && serde_json::from_str::<Value>(text).is_ok()
}

/// Unwrap one value. Non-strings pass through. Strings are de-fenced and,
/// when bracketed by `{}` or `[]`, parsed as JSON; a failed parse returns
/// the cleaned string.
pub fn unwrap_value(value: Value) -> Value {
    let Value::String(text) = value else {
        return value;
    };

    let cleaned = strip_code_fences(&text);
    if looks_like_json(&cleaned) {
        if let Ok(parsed) = serde_json::from_str::<Value>(&cleaned) {
            return parsed;
        }
    }
    Value::String(cleaned)
}

fn looks_like_json(text: &str) -> bool {
    (text.starts_with('{') && text.ends_with('}'))
        || (text.starts_with('[') && text.ends_with(']'))
}

/// Normalize a raw upstream body.
///
/// 1. Parse the body as JSON and pick a candidate with
///    [`shapes::extract_candidate`]; the raw body is the candidate when the
///    body is not JSON or no strategy matches.
/// 2. [`unwrap_value`] the candidate.
/// 3. If the result is an object, [`unwrap_value`] each direct field once.
pub fn normalize_body(raw: &str) -> Value {
    let candidate = match serde_json::from_str::<Value>(raw) {
        Ok(envelope) => match shapes::extract_candidate(&envelope) {
            Some((strategy, candidate)) => {
                log::debug!("normalize_body: matched shape '{}'", strategy);
                candidate
            }
            None => Value::String(raw.to_string()),
        },
        Err(_) => Value::String(raw.to_string()),
    };

    let mut processed = unwrap_value(candidate);
    if let Value::Object(fields) = &mut processed {
        for field in fields.values_mut() {
            *field = unwrap_value(field.take());
        }
    }
    processed
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_fenced_json_body_becomes_object() {
        assert_eq!(normalize_body("```json\n{\"a\":1}\n```"), json!({"a": 1}));
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(normalize_body("hello world"), json!("hello world"));
    }

    #[test]
    fn test_malformed_json_falls_back_to_trimmed_text() {
        assert_eq!(normalize_body("{not valid"), json!("{not valid"));
        assert_eq!(normalize_body("  {not valid}  "), json!("{not valid}"));
    }

    #[test]
    fn test_nested_fenced_field_is_unwrapped_one_level() {
        let raw = r#"{"choices":[{"message":{"content":"```json\n{\"x\":\"```json\\n{\\\"y\\\":2}\\n```\"}\n```"}}]}"#;
        assert_eq!(normalize_body(raw), json!({"x": {"y": 2}}));
    }

    #[test]
    fn test_field_unwrapping_does_not_recurse_further() {
        let inner = json!({"z": "{\"deep\":true}"}).to_string();
        let content = json!({"y": inner}).to_string();
        let raw = json!({"choices": [{"message": {"content": content}}]}).to_string();

        let normalized = normalize_body(&raw);
        // "y" is unwrapped, but "z" inside it stays a string.
        assert_eq!(normalized["y"]["z"], json!("{\"deep\":true}"));
    }

    #[test]
    fn test_plain_content_string_is_trimmed() {
        let raw = json!({"choices": [{"message": {"content": "  Hi there 🛡️  "}}]}).to_string();
        assert_eq!(normalize_body(&raw), json!("Hi there 🛡️"));
    }

    #[test]
    fn test_json_body_without_known_shape_is_reparsed_whole() {
        let raw = r#"{"reply":"[1,2]","note":"plain"}"#;
        assert_eq!(normalize_body(raw), json!({"reply": [1, 2], "note": "plain"}));
    }

    #[test]
    fn test_top_level_array_is_returned() {
        assert_eq!(normalize_body("```\n[1, \"two\"]\n```"), json!([1, "two"]));
    }

    #[test]
    fn test_object_field_order_is_preserved() {
        let raw = r#"{"zeta":1,"alpha":2,"mid":3}"#;
        let keys: Vec<String> = normalize_body(raw)
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_unwrap_passes_non_strings_through() {
        assert_eq!(unwrap_value(json!(5)), json!(5));
        assert_eq!(unwrap_value(json!(null)), json!(null));
        assert_eq!(unwrap_value(json!(["```json\n{}\n```"])), json!(["```json\n{}\n```"]));
    }

    #[test]
    fn test_strip_code_fences_handles_every_block() {
        let text = "Intro:\n```json\n{\"a\":1}\n```\nthen\n```\n[2]\n```";
        assert_eq!(strip_code_fences(text), "Intro:\n{\"a\":1}\n\nthen\n[2]");
    }

    #[test]
    fn test_nested_fences_are_peeled() {
        assert_eq!(normalize_body("```\n```json\n{\"a\":1}\n```\n```"), json!({"a": 1}));
        assert_eq!(strip_code_fences("```json\n```\n[1]\n```\n```"), "[1]");
    }

    #[test]
    fn test_mid_line_fence_is_stripped() {
        assert_eq!(strip_code_fences("Sure! ```json\n{\"a\":1}\n```"), "Sure! {\"a\":1}");

        let raw = json!({"choices": [{"message": {"content": "Here: ```json {\"a\":1}```"}}]}).to_string();
        assert_eq!(normalize_body(&raw), json!("Here: {\"a\":1}"));
    }

    #[test]
    fn test_separate_leading_and_trailing_blocks_keep_no_tag() {
        let text = "```json\n{\"a\":1}\n```\nthen\n```\n[2]\n```";
        assert_eq!(strip_code_fences(text), "{\"a\":1}\n\nthen\n[2]");
    }

    #[test]
    fn test_strip_code_fences_single_line_block() {
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_code_fences_ignores_unterminated_fence() {
        assert_eq!(strip_code_fences("```"), "```");
        assert_eq!(strip_code_fences("  no fences here "), "no fences here");
    }

    #[test]
    fn test_unwrap_is_idempotent_for_fence_free_values() {
        let samples = [
            json!("hello world"),
            json!("{not valid"),
            json!("{\"a\":[1,2,{\"b\":\"c\"}]}"),
            json!("[true, null]"),
            json!({"k": "v"}),
            json!(3.5),
        ];
        for sample in samples {
            let once = unwrap_value(sample);
            let twice = unwrap_value(once.clone());
            assert_eq!(once, twice);
        }
    }
}
