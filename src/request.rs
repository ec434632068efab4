//! Chat-completion payload assembly without client-side validation.
//!
//! The builder serializes whatever it is given, including intentionally
//! malformed shapes. The harness verifies that the remote service rejects
//! bad payloads, so nothing here fills in or coerces fields.

use serde::Serialize;
use serde_json::{Map, Value};

/// A single `{role, content}` entry of the `messages` array.
///
/// `content` is optional so that a message missing its required content can
/// be constructed explicitly for negative scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// A message that carries a role but no content field at all.
    pub fn role_only(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: None,
        }
    }
}

impl From<ChatMessage> for Value {
    fn from(message: ChatMessage) -> Self {
        let mut entry = Map::new();
        entry.insert("role".to_string(), Value::String(message.role));
        if let Some(content) = message.content {
            entry.insert("content".to_string(), Value::String(content));
        }

        Value::Object(entry)
    }
}

/// Assembles a request body as a JSON object containing exactly the fields
/// that were inserted. Omitting `model` or `messages` is deliberate and must
/// be requested explicitly by not calling the corresponding method.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    fields: Map<String, Value>,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.fields
            .insert("model".to_string(), Value::String(model.into()));
        self
    }

    pub fn messages(mut self, messages: Vec<ChatMessage>) -> Self {
        let entries = messages.into_iter().map(Value::from).collect::<Vec<_>>();
        self.fields
            .insert("messages".to_string(), Value::Array(entries));
        self
    }

    /// Inserts `messages` verbatim, allowing wrong container types.
    pub fn messages_value(mut self, value: Value) -> Self {
        self.fields.insert("messages".to_string(), value);
        self
    }

    /// Overlays an arbitrary extra field, serialized as-is.
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn built_payload_contains_exactly_the_inserted_fields() {
        let payload = PayloadBuilder::new()
            .model("GigaChat")
            .messages(vec![ChatMessage::user("hi")])
            .extra("attachments", json!([]))
            .build();

        let object = payload.as_object().expect("payload is an object");
        let mut keys = object.keys().cloned().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, ["attachments", "messages", "model"]);
        assert_eq!(payload["model"], "GigaChat");
        assert_eq!(payload["messages"], json!([{"role": "user", "content": "hi"}]));
    }

    #[test]
    fn omitted_fields_stay_omitted() {
        let payload = PayloadBuilder::new()
            .messages(vec![ChatMessage::user("hi")])
            .build();
        assert!(payload.get("model").is_none());

        let payload = PayloadBuilder::new().model("GigaChat").build();
        assert!(payload.get("messages").is_none());
    }

    #[test]
    fn malformed_messages_pass_through_verbatim() {
        let payload = PayloadBuilder::new()
            .model("GigaChat")
            .messages_value(json!("not a list of messages"))
            .build();

        assert_eq!(payload["messages"], "not a list of messages");
    }

    #[test]
    fn role_only_message_omits_the_content_field() {
        let entry = Value::from(ChatMessage::role_only("user"));
        assert_eq!(entry, json!({"role": "user"}));
    }

    #[test]
    fn value_conversion_matches_serde_serialization() {
        for message in [ChatMessage::user("hello"), ChatMessage::role_only("system")] {
            let via_serde = serde_json::to_value(&message).expect("message serializes");
            assert_eq!(Value::from(message), via_serde);
        }
    }
}
