//! # Generator Reply Extraction
//!
//! The generator is asked for a bare JSON object, but model replies often
//! wrap the payload in markdown code fences or surrounding narrative text.
//! This module extracts the candidate JSON value from a raw reply without
//! validating it — validation stays a separate step so a shape defect is
//! reported as a structural violation, not a parse failure.

use serde_json::Value;

use crate::error::AnalysisError;

/// Extract the candidate JSON value from a raw generator reply.
///
/// Strategy order:
/// 1. The full trimmed reply as JSON.
/// 2. A ```json fenced code block.
/// 3. Any fenced code block.
/// 4. The first valid JSON object or array found in the text.
///
/// # Errors
///
/// Returns [`AnalysisError::ResponseParse`] if no strategy yields a JSON
/// value.
pub fn extract_json(content: &str) -> Result<Value, AnalysisError> {
    let trimmed = content.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        tracing::debug!(strategy = "direct", "extracted candidate from reply");
        return Ok(value);
    }

    if let Some(block) = extract_fenced_block(trimmed, Some("json")) {
        if let Ok(value) = serde_json::from_str::<Value>(&block) {
            tracing::debug!(strategy = "json_fence", "extracted candidate from reply");
            return Ok(value);
        }
    }

    if let Some(block) = extract_fenced_block(trimmed, None) {
        if let Ok(value) = serde_json::from_str::<Value>(&block) {
            tracing::debug!(strategy = "any_fence", "extracted candidate from reply");
            return Ok(value);
        }
    }

    if let Some(snippet) = extract_first_json_value(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(&snippet) {
            tracing::debug!(strategy = "first_value", "extracted candidate from reply");
            return Ok(value);
        }
    }

    Err(AnalysisError::ResponseParse(
        "no JSON value found in generator reply".to_string(),
    ))
}

/// Extract the first valid JSON value (object or array) embedded in text.
///
/// Uses a streaming `serde_json::Deserializer` to detect a valid JSON
/// prefix starting at each `{` or `[`.
fn extract_first_json_value(content: &str) -> Option<String> {
    for (idx, ch) in content.char_indices() {
        if ch == '{' || ch == '[' {
            let candidate = &content[idx..];
            let mut stream =
                serde_json::Deserializer::from_str(candidate).into_iter::<Value>();
            if let Some(Ok(_)) = stream.next() {
                let end = stream.byte_offset();
                if end > 0 && end <= candidate.len() {
                    return Some(candidate[..end].to_string());
                }
            }
        }
    }
    None
}

/// Extract a fenced code block, optionally requiring a language tag.
fn extract_fenced_block(content: &str, language: Option<&str>) -> Option<String> {
    let fence = "```";
    let mut search = content;

    loop {
        let start = search.find(fence)?;
        let after_start = &search[start + fence.len()..];

        let line_end = after_start.find('\n')?;
        let lang_tag = after_start[..line_end].trim();
        let rest = &after_start[line_end + 1..];

        if let Some(expected) = language {
            if !lang_tag.eq_ignore_ascii_case(expected) {
                search = after_start;
                continue;
            }
        }

        let end = rest.find(fence)?;
        return Some(rest[..end].trim().to_string());
    }
}
