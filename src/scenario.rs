//! The scenario matrix: pure data tables consumed by the runner.

use serde_json::{Value, json};

use crate::classify::{RawResponse, check_completion_shape};
use crate::credentials::CredentialCase;
use crate::error::HarnessError;

/// Statuses the endpoint may return for a structurally invalid request.
pub const MALFORMED_REQUEST_STATUSES: &[u16] = &[400, 422];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOverride {
    /// Use the session default from `EndpointConfig`.
    Default,
    /// Leave the field out of the payload entirely.
    Absent,
    Value(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessagesOverride {
    /// One well-formed user message.
    Default,
    Absent,
    /// Verbatim JSON, including wrong container types.
    Value(Value),
}

/// Partial chat request applied on top of the session defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOverrides {
    pub model: FieldOverride,
    pub messages: MessagesOverride,
    pub extra: Vec<(String, Value)>,
    pub stream: bool,
}

impl Default for RequestOverrides {
    fn default() -> Self {
        Self {
            model: FieldOverride::Default,
            messages: MessagesOverride::Default,
            extra: Vec::new(),
            stream: false,
        }
    }
}

impl RequestOverrides {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = FieldOverride::Value(model.into());
        self
    }

    pub fn absent_model(mut self) -> Self {
        self.model = FieldOverride::Absent;
        self
    }

    pub fn messages_value(mut self, value: Value) -> Self {
        self.messages = MessagesOverride::Value(value);
        self
    }

    pub fn absent_messages(mut self) -> Self {
        self.messages = MessagesOverride::Absent;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.push((key.into(), value));
        self
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

/// Declared outcome predicate for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Any status in [200, 299].
    Success,
    /// Any status outside [200, 299].
    Failure,
    Status(u16),
    StatusIn(&'static [u16]),
    /// Status 200 with a `Content-Type` containing `text/event-stream`,
    /// checked case-insensitively.
    EventStream,
    /// Status 200 with a decodable body passing the completion-shape check.
    CompletionShape,
}

impl Expectation {
    pub fn evaluate(&self, response: &RawResponse) -> Result<(), HarnessError> {
        match self {
            Self::Success => {
                if response.is_success() {
                    Ok(())
                } else {
                    Err(HarnessError::assertion(format!(
                        "expected a 2xx status, got {}; body: {}",
                        response.status,
                        response.body_preview()
                    )))
                }
            }
            Self::Failure => {
                if response.is_success() {
                    Err(HarnessError::assertion(format!(
                        "expected an error status, got {}",
                        response.status
                    )))
                } else {
                    Ok(())
                }
            }
            Self::Status(code) => {
                if response.status == *code {
                    Ok(())
                } else {
                    Err(HarnessError::assertion(format!(
                        "expected status {code}, got {}; body: {}",
                        response.status,
                        response.body_preview()
                    )))
                }
            }
            Self::StatusIn(codes) => {
                if codes.contains(&response.status) {
                    Ok(())
                } else {
                    Err(HarnessError::assertion(format!(
                        "expected status in {codes:?}, got {}; body: {}",
                        response.status,
                        response.body_preview()
                    )))
                }
            }
            Self::EventStream => {
                if response.status != 200 {
                    return Err(HarnessError::assertion(format!(
                        "expected 200 for a streamed response, got {}",
                        response.status
                    )));
                }

                let content_type = response.header("content-type").unwrap_or_default();
                if content_type.to_ascii_lowercase().contains("text/event-stream") {
                    Ok(())
                } else {
                    Err(HarnessError::assertion(format!(
                        "expected a text/event-stream content type, got {content_type:?}"
                    )))
                }
            }
            Self::CompletionShape => {
                if response.status != 200 {
                    return Err(HarnessError::assertion(format!(
                        "expected 200, got {}; body: {}",
                        response.status,
                        response.body_preview()
                    )));
                }

                let body = response.decode_json()?;
                check_completion_shape(&body)
            }
        }
    }
}

/// One parameterized contract check: inputs plus the declared expectation.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: &'static str,
    pub credential: CredentialCase,
    pub overrides: RequestOverrides,
    pub expected: Expectation,
}

impl Scenario {
    pub fn new(
        id: &'static str,
        credential: CredentialCase,
        overrides: RequestOverrides,
        expected: Expectation,
    ) -> Self {
        Self {
            id,
            credential,
            overrides,
            expected,
        }
    }
}

/// Authentication behavior across every credential state, including the
/// exact 401 contract for the fixed failure cases.
pub fn credential_scenarios() -> Vec<Scenario> {
    let generic = [
        CredentialCase::Valid,
        CredentialCase::Empty,
        CredentialCase::Malformed,
        CredentialCase::Stale,
    ]
    .into_iter()
    .zip([
        "auth_valid_token",
        "auth_empty_token",
        "auth_invalid_token",
        "auth_old_token",
    ])
    .map(|(case, id)| {
        let expected = if case.expects_success() {
            Expectation::Success
        } else {
            Expectation::Failure
        };
        Scenario::new(id, case, RequestOverrides::default(), expected)
    });

    let exact = [
        (CredentialCase::Empty, "auth_empty_token_401"),
        (CredentialCase::Malformed, "auth_invalid_token_401"),
        (CredentialCase::Stale, "auth_old_token_401"),
    ]
    .into_iter()
    .map(|(case, id)| {
        Scenario::new(id, case, RequestOverrides::default(), Expectation::Status(401))
    });

    generic.chain(exact).collect()
}

/// `model` field behavior, including the exact 404 contract for an unknown
/// model and the 400/422 contract for omitted required fields.
pub fn model_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "model_absent",
            CredentialCase::Valid,
            RequestOverrides::default().absent_model(),
            Expectation::Failure,
        ),
        Scenario::new(
            "model_empty",
            CredentialCase::Valid,
            RequestOverrides::default().model(""),
            Expectation::Failure,
        ),
        Scenario::new(
            "model_unknown",
            CredentialCase::Valid,
            RequestOverrides::default().model("NonExistingModel123"),
            Expectation::Failure,
        ),
        Scenario::new(
            "model_unknown_404",
            CredentialCase::Valid,
            RequestOverrides::default().model("NonExistingModel123"),
            Expectation::Status(404),
        ),
        Scenario::new(
            "model_default_accepted",
            CredentialCase::Valid,
            RequestOverrides::default(),
            Expectation::Success,
        ),
        Scenario::new(
            "required_model_missing",
            CredentialCase::Valid,
            RequestOverrides::default().absent_model(),
            Expectation::StatusIn(MALFORMED_REQUEST_STATUSES),
        ),
        Scenario::new(
            "required_messages_missing",
            CredentialCase::Valid,
            RequestOverrides::default().absent_messages(),
            Expectation::StatusIn(MALFORMED_REQUEST_STATUSES),
        ),
    ]
}

/// `messages` field behavior across well-formed and malformed values.
pub fn messages_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "messages_well_formed",
            CredentialCase::Valid,
            RequestOverrides::default(),
            Expectation::Success,
        ),
        Scenario::new(
            "messages_empty_list",
            CredentialCase::Valid,
            RequestOverrides::default().messages_value(json!([])),
            Expectation::Failure,
        ),
        Scenario::new(
            "messages_entry_without_content",
            CredentialCase::Valid,
            RequestOverrides::default().messages_value(json!([{"role": "user"}])),
            Expectation::Failure,
        ),
        Scenario::new(
            "messages_wrong_type",
            CredentialCase::Valid,
            RequestOverrides::default().messages_value(json!("not a list of messages")),
            Expectation::Failure,
        ),
    ]
}

/// Optional `attachments` field: an empty array is accepted, any non-array
/// value is a malformed request.
pub fn attachment_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "attachments_empty_array",
            CredentialCase::Valid,
            RequestOverrides::default().with_extra("attachments", json!([])),
            Expectation::Success,
        ),
        Scenario::new(
            "attachments_string",
            CredentialCase::Valid,
            RequestOverrides::default().with_extra("attachments", json!("not_an_array")),
            Expectation::StatusIn(MALFORMED_REQUEST_STATUSES),
        ),
        Scenario::new(
            "attachments_object",
            CredentialCase::Valid,
            RequestOverrides::default().with_extra("attachments", json!({"key": "value"})),
            Expectation::StatusIn(MALFORMED_REQUEST_STATUSES),
        ),
        Scenario::new(
            "attachments_number",
            CredentialCase::Valid,
            RequestOverrides::default().with_extra("attachments", json!(123)),
            Expectation::StatusIn(MALFORMED_REQUEST_STATUSES),
        ),
    ]
}

/// Success-body shape and streaming framing.
pub fn response_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "success_body_shape",
            CredentialCase::Valid,
            RequestOverrides::default(),
            Expectation::CompletionShape,
        ),
        Scenario::new(
            "streaming_event_stream",
            CredentialCase::Valid,
            RequestOverrides::default().streaming(),
            Expectation::EventStream,
        ),
    ]
}

/// Every scenario in the matrix.
pub fn all_scenarios() -> Vec<Scenario> {
    let mut scenarios = credential_scenarios();
    scenarios.extend(model_scenarios());
    scenarios.extend(messages_scenarios());
    scenarios.extend(attachment_scenarios());
    scenarios.extend(response_scenarios());
    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn scenario_ids_are_unique() {
        let scenarios = all_scenarios();
        let mut ids = scenarios.iter().map(|s| s.id).collect::<Vec<_>>();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before, "duplicate scenario id in the matrix");
    }

    #[test]
    fn credential_matrix_pins_401_for_every_fixed_failure_case() {
        let scenarios = credential_scenarios();
        let exact = scenarios
            .iter()
            .filter(|s| s.expected == Expectation::Status(401))
            .map(|s| s.credential)
            .collect::<Vec<_>>();

        assert_eq!(
            exact,
            [
                CredentialCase::Empty,
                CredentialCase::Malformed,
                CredentialCase::Stale
            ]
        );
    }

    #[test]
    fn only_credential_scenarios_use_non_valid_credentials() {
        for scenario in all_scenarios() {
            if !scenario.id.starts_with("auth_") {
                assert_eq!(
                    scenario.credential,
                    CredentialCase::Valid,
                    "{} must isolate the field under test from auth failures",
                    scenario.id
                );
            }
        }
    }

    #[test]
    fn status_expectations_match_exactly() {
        assert!(Expectation::Status(401).evaluate(&response(401, "")).is_ok());
        let err = Expectation::Status(401)
            .evaluate(&response(403, "denied"))
            .expect_err("wrong status must fail");
        assert!(err.message.contains("403"));
        assert!(err.message.contains("denied"));

        assert!(
            Expectation::StatusIn(MALFORMED_REQUEST_STATUSES)
                .evaluate(&response(422, ""))
                .is_ok()
        );
        assert!(
            Expectation::StatusIn(MALFORMED_REQUEST_STATUSES)
                .evaluate(&response(500, ""))
                .is_err()
        );
    }

    #[test]
    fn success_and_failure_split_on_the_2xx_boundary() {
        assert!(Expectation::Success.evaluate(&response(204, "")).is_ok());
        assert!(Expectation::Success.evaluate(&response(500, "")).is_err());
        assert!(Expectation::Failure.evaluate(&response(500, "")).is_ok());
        assert!(Expectation::Failure.evaluate(&response(200, "")).is_err());
    }

    #[test]
    fn event_stream_expectation_checks_content_type_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("Text/Event-Stream; charset=utf-8"),
        );
        let streamed = RawResponse {
            status: 200,
            headers,
            body: Vec::new(),
        };
        assert!(Expectation::EventStream.evaluate(&streamed).is_ok());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let buffered = RawResponse {
            status: 200,
            headers,
            body: Vec::new(),
        };
        assert!(Expectation::EventStream.evaluate(&buffered).is_err());

        assert!(Expectation::EventStream.evaluate(&response(401, "")).is_err());
    }

    #[test]
    fn completion_shape_expectation_separates_decode_from_status() {
        use crate::error::HarnessErrorKind;

        let ok = response(200, r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}]}"#);
        assert!(Expectation::CompletionShape.evaluate(&ok).is_ok());

        let not_json = response(200, "event: ping");
        let err = Expectation::CompletionShape
            .evaluate(&not_json)
            .expect_err("non-JSON body must fail");
        assert_eq!(err.kind, HarnessErrorKind::Decode);

        let wrong_status = response(500, "{}");
        let err = Expectation::CompletionShape
            .evaluate(&wrong_status)
            .expect_err("non-200 must fail");
        assert_eq!(err.kind, HarnessErrorKind::Assertion);
    }
}
