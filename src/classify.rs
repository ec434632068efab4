//! Response classification: status range, headers, and body-shape checks.

use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::HarnessError;

const BODY_PREVIEW_LIMIT: usize = 300;

/// A completed HTTP exchange, captured for assertion.
///
/// In streaming mode the body is never buffered and stays empty; only the
/// status and headers are meaningful there.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Lossy string view of a header value. Lookups are case-insensitive.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
    }

    /// Decodes the buffered body as JSON.
    ///
    /// A decode failure is a distinct `Decode`-kind error so it is never
    /// conflated with a non-2xx status mismatch.
    pub fn decode_json(&self) -> Result<Value, HarnessError> {
        serde_json::from_slice(&self.body)
            .map_err(|err| HarnessError::decode(format!("malformed success body: {err}")))
    }

    /// Bounded, lossy preview of the body for diagnostics.
    pub fn body_preview(&self) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let mut preview = text
            .chars()
            .take(BODY_PREVIEW_LIMIT)
            .collect::<String>();
        if text.chars().count() > BODY_PREVIEW_LIMIT {
            preview.push('…');
        }

        preview
    }
}

/// Checks the consolidated success-body shape of a chat completion.
///
/// The body must be an object. When it carries a `choices` array, the array
/// must be non-empty and every candidate must be an object whose nested
/// `message`, if present, carries at least a `content` or `role` field.
/// Without `choices` the body must fall back to carrying `id` or `model`.
pub fn check_completion_shape(body: &Value) -> Result<(), HarnessError> {
    let Some(object) = body.as_object() else {
        return Err(HarnessError::assertion("completion body must be a JSON object"));
    };

    match object.get("choices") {
        Some(choices) => {
            let Some(candidates) = choices.as_array() else {
                return Err(HarnessError::assertion("choices must be an array"));
            };

            if candidates.is_empty() {
                return Err(HarnessError::assertion("choices must not be empty"));
            }

            for (index, candidate) in candidates.iter().enumerate() {
                if !candidate.is_object() {
                    return Err(HarnessError::assertion(format!(
                        "choices[{index}] must be an object"
                    )));
                }

                if let Some(message) = candidate.get("message") {
                    let has_content_or_role =
                        message.get("content").is_some() || message.get("role").is_some();
                    if !has_content_or_role {
                        return Err(HarnessError::assertion(format!(
                            "choices[{index}].message must carry content or role"
                        )));
                    }
                }
            }

            Ok(())
        }
        None => {
            if object.contains_key("id") || object.contains_key("model") {
                Ok(())
            } else {
                let keys = object.keys().cloned().collect::<Vec<_>>();
                Err(HarnessError::assertion(format!(
                    "completion body must carry choices, id, or model; keys: {keys:?}"
                )))
            }
        }
    }
}
