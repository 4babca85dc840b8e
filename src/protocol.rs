// Messages exchanged between the panel view and its controller, and the
// static command -> endpoint dispatch table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;

/// One of the four user-triggerable panel actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ExplainCode,
    GenerateCode,
    DebugCode,
    RunCode,
}

/// Where a command is sent and how its reply is routed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub endpoint: &'static str,
    pub request_field: &'static str,
    pub response_field: &'static str,
    pub tag: &'static str,
}

impl Command {
    /// Button order in the panel.
    pub const ALL: [Self; 4] = [
        Self::ExplainCode,
        Self::GenerateCode,
        Self::DebugCode,
        Self::RunCode,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExplainCode => "explainCode",
            Self::GenerateCode => "generateCode",
            Self::DebugCode => "debugCode",
            Self::RunCode => "runCode",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExplainCode => "Explain Code",
            Self::GenerateCode => "Generate Code",
            Self::DebugCode => "Debug Code",
            Self::RunCode => "Run Code",
        }
    }

    pub const fn route(self) -> Route {
        match self {
            Self::ExplainCode => Route {
                endpoint: "/explain-code",
                request_field: "code",
                response_field: "explanation",
                tag: "showExplanation",
            },
            Self::GenerateCode => Route {
                endpoint: "/generate-code",
                request_field: "query",
                response_field: "code",
                tag: "showGeneratedCode",
            },
            Self::DebugCode => Route {
                endpoint: "/debug-code",
                request_field: "code",
                response_field: "code",
                tag: "showDebuggedCode",
            },
            Self::RunCode => Route {
                endpoint: "/run-code",
                request_field: "code",
                response_field: "output",
                tag: "showRunOutput",
            },
        }
    }

    /// Build the outbound view message from a service reply.
    ///
    /// A missing or null reply field yields `None`, which the view shows as
    /// empty output rather than an error.
    pub fn reply_message(self, reply: &Value) -> OutboundMessage {
        let value = match reply.get(self.route().response_field) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };

        match self {
            Self::ExplainCode => OutboundMessage::ShowExplanation { explanation: value },
            Self::GenerateCode => OutboundMessage::ShowGeneratedCode { code: value },
            Self::DebugCode => OutboundMessage::ShowDebuggedCode { code: value },
            Self::RunCode => OutboundMessage::ShowRunOutput { output: value },
        }
    }
}

impl Route {
    /// JSON body with exactly one field holding the prompt verbatim.
    pub fn request_body(&self, prompt: &str) -> Value {
        let mut body = Map::new();
        body.insert(
            self.request_field.to_string(),
            Value::String(prompt.to_string()),
        );
        Value::Object(body)
    }
}

impl FromStr for Command {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| PanelError::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View -> controller message. `command` stays a raw string so that
/// unrecognized commands reach the handler and fail there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub command: String,
    pub prompt: String,
}

impl InboundMessage {
    pub fn new(command: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            prompt: prompt.into(),
        }
    }
}

/// Controller -> view message, tagged by `command`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum OutboundMessage {
    ShowExplanation { explanation: Option<String> },
    ShowGeneratedCode { code: Option<String> },
    ShowDebuggedCode { code: Option<String> },
    ShowRunOutput { output: Option<String> },
    #[serde(other)]
    Unrecognized,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_table() {
        let rows = [
            ("explainCode", "/explain-code", "code", "explanation", "showExplanation"),
            ("generateCode", "/generate-code", "query", "code", "showGeneratedCode"),
            ("debugCode", "/debug-code", "code", "code", "showDebuggedCode"),
            ("runCode", "/run-code", "code", "output", "showRunOutput"),
        ];

        for (name, endpoint, request_field, response_field, tag) in rows {
            let command: Command = name.parse().unwrap();
            let route = command.route();
            assert_eq!(route.endpoint, endpoint);
            assert_eq!(route.request_field, request_field);
            assert_eq!(route.response_field, response_field);
            assert_eq!(route.tag, tag);
        }
    }

    #[test]
    fn test_unknown_command_keeps_literal() {
        let err = "foo".parse::<Command>().unwrap_err();
        assert!(matches!(err, PanelError::UnknownCommand(ref c) if c == "foo"));
    }

    #[test]
    fn test_command_parse_is_case_sensitive() {
        assert!("ExplainCode".parse::<Command>().is_err());
    }

    #[test]
    fn test_request_body_keeps_prompt_verbatim() {
        let body = Command::GenerateCode.route().request_body("  print('hi')\n");
        assert_eq!(body, json!({"query": "  print('hi')\n"}));

        let body = Command::DebugCode.route().request_body("");
        assert_eq!(body, json!({"code": ""}));
    }

    #[test]
    fn test_reply_message_serializes_with_tag() {
        let message = Command::RunCode.reply_message(&json!({"output": "hi\n"}));
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value, json!({"command": "showRunOutput", "output": "hi\n"}));
    }

    #[test]
    fn test_reply_message_missing_field_is_null() {
        let message = Command::ExplainCode.reply_message(&json!({"error": "Bad Request"}));
        assert_eq!(message, OutboundMessage::ShowExplanation { explanation: None });

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value, json!({"command": "showExplanation", "explanation": null}));
    }

    #[test]
    fn test_reply_message_stringifies_non_string_field() {
        let message = Command::RunCode.reply_message(&json!({"output": 42}));
        assert_eq!(
            message,
            OutboundMessage::ShowRunOutput {
                output: Some("42".to_string())
            }
        );
    }

    #[test]
    fn test_outbound_unknown_tag_deserializes_as_unrecognized() {
        let message: OutboundMessage =
            serde_json::from_value(json!({"command": "showSomethingElse", "x": 1})).unwrap();
        assert_eq!(message, OutboundMessage::Unrecognized);
    }

    #[test]
    fn test_inbound_message_deserialization() {
        let message: InboundMessage =
            serde_json::from_str(r#"{"command":"debugCode","prompt":""}"#).unwrap();
        assert_eq!(message, InboundMessage::new("debugCode", ""));
    }
}
