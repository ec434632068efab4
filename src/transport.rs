//! Chat endpoint transport trait and reqwest-based single-shot implementation.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::classify::RawResponse;
use crate::config::EndpointConfig;
use crate::HarnessFuture;

/// Result of one transport attempt.
///
/// Network-level failures are values, not errors: an `Inconclusive` outcome
/// must downgrade the scenario to skipped so environment flakiness is never
/// reported as a contract violation.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportOutcome {
    Response(RawResponse),
    Inconclusive { reason: String },
}

pub trait ChatTransport: Send + Sync + std::fmt::Debug {
    /// Issues exactly one POST with the given bearer header and JSON body.
    ///
    /// With `stream` set the response body is left unread; only status and
    /// headers are captured.
    fn post<'a>(
        &'a self,
        auth_header: &'a str,
        payload: &'a Value,
        stream: bool,
    ) -> HarnessFuture<'a, TransportOutcome>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(client: Client, config: &EndpointConfig) -> Self {
        Self::new(client, config.base_url.clone(), config.timeout)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn inconclusive(reason: String) -> TransportOutcome {
        tracing::warn!(phase = "transport", event = "inconclusive", reason = %reason);
        TransportOutcome::Inconclusive { reason }
    }
}

impl ChatTransport for HttpTransport {
    fn post<'a>(
        &'a self,
        auth_header: &'a str,
        payload: &'a Value,
        stream: bool,
    ) -> HarnessFuture<'a, TransportOutcome> {
        Box::pin(async move {
            tracing::debug!(
                phase = "transport",
                event = "post",
                endpoint = %self.endpoint,
                stream
            );

            let sent = self
                .client
                .post(&self.endpoint)
                .header(AUTHORIZATION, auth_header)
                .json(payload)
                .timeout(self.timeout)
                .send()
                .await;

            let response = match sent {
                Ok(response) => response,
                Err(err) if err.is_timeout() => {
                    return Self::inconclusive(format!(
                        "request timed out after {}s: {err}",
                        self.timeout.as_secs()
                    ));
                }
                Err(err) => {
                    return Self::inconclusive(format!("request failed: {err}"));
                }
            };

            let status = response.status().as_u16();
            let headers = response.headers().clone();

            // Streamed bodies arrive incrementally; the contract only
            // inspects the framing, so the body is dropped unread.
            let body = if stream {
                Vec::new()
            } else {
                match response.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(err) => {
                        return Self::inconclusive(format!(
                            "failed to read response body: {err}"
                        ));
                    }
                }
            };

            TransportOutcome::Response(RawResponse {
                status,
                headers,
                body,
            })
        })
    }
}
