//! The single generic interpreter that executes scenario records.

use serde_json::Value;

use crate::config::EndpointConfig;
use crate::credentials::SecretString;
use crate::request::{ChatMessage, PayloadBuilder};
use crate::scenario::{FieldOverride, MessagesOverride, RequestOverrides, Scenario};
use crate::transport::{ChatTransport, TransportOutcome};

/// Message content used when a scenario does not override `messages`.
pub const DEFAULT_PROBE_MESSAGE: &str = "Reply with one word: ok.";

/// Three-valued scenario result. `Skipped` records checks that could not be
/// evaluated and must never count toward pass or fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

impl ScenarioOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Materializes a scenario's partial request on top of the session defaults.
///
/// Only explicitly overridden fields diverge from the canonical well-formed
/// request; `Absent` drops the field from the payload entirely.
pub fn build_payload(config: &EndpointConfig, overrides: &RequestOverrides) -> Value {
    let mut builder = PayloadBuilder::new();

    match &overrides.model {
        FieldOverride::Default => builder = builder.model(config.default_model.clone()),
        FieldOverride::Value(model) => builder = builder.model(model.clone()),
        FieldOverride::Absent => {}
    }

    match &overrides.messages {
        MessagesOverride::Default => {
            builder = builder.messages(vec![ChatMessage::user(DEFAULT_PROBE_MESSAGE)]);
        }
        MessagesOverride::Value(value) => builder = builder.messages_value(value.clone()),
        MessagesOverride::Absent => {}
    }

    for (key, value) in &overrides.extra {
        builder = builder.extra(key.clone(), value.clone());
    }

    if overrides.stream {
        builder = builder.extra("stream", Value::Bool(true));
    }

    builder.build()
}

/// Executes one scenario: resolve credential, build payload, post, classify,
/// and compare against the declared expectation.
pub async fn run_scenario(
    config: &EndpointConfig,
    transport: &dyn ChatTransport,
    live_token: Option<&SecretString>,
    scenario: &Scenario,
) -> ScenarioOutcome {
    tracing::info!(
        phase = "runner",
        event = "scenario_start",
        id = scenario.id,
        credential = %scenario.credential
    );

    let Some(credential) = scenario.credential.resolve(live_token) else {
        let reason = format!(
            "no live token in {}; cannot evaluate the {} credential case",
            crate::credentials::LIVE_TOKEN_VAR,
            scenario.credential
        );
        tracing::info!(phase = "runner", event = "skipped", id = scenario.id, reason = %reason);
        return ScenarioOutcome::Skipped(reason);
    };

    let payload = build_payload(config, &scenario.overrides);
    let outcome = transport
        .post(&credential.header_value, &payload, scenario.overrides.stream)
        .await;

    let response = match outcome {
        TransportOutcome::Response(response) => response,
        TransportOutcome::Inconclusive { reason } => {
            tracing::info!(phase = "runner", event = "skipped", id = scenario.id, reason = %reason);
            return ScenarioOutcome::Skipped(reason);
        }
    };

    match scenario.expected.evaluate(&response) {
        Ok(()) => {
            tracing::info!(
                phase = "runner",
                event = "passed",
                id = scenario.id,
                status = response.status
            );
            ScenarioOutcome::Passed
        }
        Err(err) => {
            tracing::warn!(
                phase = "runner",
                event = "failed",
                id = scenario.id,
                status = response.status,
                error = %err
            );
            ScenarioOutcome::Failed(format!("{}: {err}", scenario.id))
        }
    }
}

/// Runs a scenario table in order and pairs every id with its outcome.
pub async fn run_table(
    config: &EndpointConfig,
    transport: &dyn ChatTransport,
    live_token: Option<&SecretString>,
    scenarios: &[Scenario],
) -> Vec<(&'static str, ScenarioOutcome)> {
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let outcome = run_scenario(config, transport, live_token, scenario).await;
        results.push((scenario.id, outcome));
    }

    results
}
