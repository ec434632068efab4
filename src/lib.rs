//! Contract-verification harness for chat-completion HTTP endpoints.
//!
//! The crate builds chat-completion request payloads (including intentionally
//! malformed ones), posts them over a single-shot transport, and checks the
//! observed status, headers, and body shape against a declared expectation.
//! Scenarios that cannot be evaluated, because the network is unreachable or
//! no live credential is configured, resolve to a skipped outcome instead of
//! a failure.
//!
//! ```rust
//! use fcontract::{ChatMessage, PayloadBuilder};
//! use serde_json::json;
//!
//! let payload = PayloadBuilder::new()
//!     .model("GigaChat")
//!     .messages(vec![ChatMessage::user("hello")])
//!     .extra("attachments", json!([]))
//!     .build();
//!
//! assert_eq!(payload["model"], "GigaChat");
//! assert_eq!(payload["messages"][0]["role"], "user");
//! assert_eq!(payload["attachments"], json!([]));
//! ```

use std::future::Future;
use std::pin::Pin;

mod classify;
mod config;
mod credentials;
mod error;
mod request;
mod runner;
mod scenario;
mod transport;

pub type HarnessFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub mod prelude {
    //! Common `fcontract` imports for contract-test suites.

    pub use crate::{
        ChatMessage, ChatTransport, CredentialCase, EndpointConfig, Expectation, FieldOverride,
        HarnessError, HarnessErrorKind, HttpTransport, MessagesOverride, PayloadBuilder,
        RawResponse, RequestOverrides, ResolvedCredential, Scenario, ScenarioOutcome,
        SecretString, TransportOutcome, attachment_scenarios, credential_scenarios, live_token,
        messages_scenarios, model_scenarios, response_scenarios, run_scenario, run_table,
    };
}

pub use classify::{RawResponse, check_completion_shape};
pub use config::{
    API_URL_VAR, DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECONDS, EndpointConfig,
    MODEL_VAR, TIMEOUT_SECONDS_VAR,
};
pub use credentials::{
    CredentialCase, LIVE_TOKEN_VAR, ResolvedCredential, SecretString, live_token,
};
pub use error::{HarnessError, HarnessErrorKind};
pub use request::{ChatMessage, PayloadBuilder};
pub use runner::{DEFAULT_PROBE_MESSAGE, ScenarioOutcome, build_payload, run_scenario, run_table};
pub use scenario::{
    Expectation, FieldOverride, MALFORMED_REQUEST_STATUSES, MessagesOverride, RequestOverrides,
    Scenario, all_scenarios, attachment_scenarios, credential_scenarios, messages_scenarios,
    model_scenarios, response_scenarios,
};
pub use transport::{ChatTransport, HttpTransport, TransportOutcome};
