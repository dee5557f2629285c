use serde_json::{Map, Value};

use crate::{domain::OrderId, errors::Error, Result};

/// Order actions understood by the SMM panel's `action` parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Status,
    Speed,
    Cancel,
    Partial,
    Refill,
    FakeComplete,
}

impl Action {
    /// Actions a user may request by word after an order id.
    pub const COMMANDS: [(&'static str, Action); 5] = [
        ("speed", Action::Speed),
        ("cancel", Action::Cancel),
        ("partial", Action::Partial),
        ("refill", Action::Refill),
        ("fake", Action::FakeComplete),
    ];

    pub fn as_api_str(self) -> &'static str {
        match self {
            Action::Status => "status",
            Action::Speed => "speed",
            Action::Cancel => "cancel",
            Action::Partial => "partial",
            Action::Refill => "refill",
            Action::FakeComplete => "fake_complete",
        }
    }

    /// Map a chat command word (case-insensitive) to its action.
    ///
    /// `status` is deliberately absent: a bare order id already means status.
    pub fn from_command(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        Self::COMMANDS
            .iter()
            .find(|(word, _)| *word == token)
            .map(|(_, action)| *action)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRequest {
    pub api_key: String,
    pub action: Action,
    pub order: OrderId,
}

/// Decoded SMM panel reply.
///
/// The panel signals failure only through a top-level `error` key; anything
/// else is a success carrying whatever fields the action returns.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResponse {
    Success(Map<String, Value>),
    Failure { error: String },
}

impl ActionResponse {
    pub fn decode(body: &str) -> Result<Self> {
        let v: Value = serde_json::from_str(body).map_err(|e| {
            Error::BadResponse(format!(
                "{e}: {}",
                body.chars().take(200).collect::<String>()
            ))
        })?;
        Ok(Self::from_json(v))
    }

    pub fn from_json(v: Value) -> Self {
        match v {
            Value::Object(obj) => match obj.get("error") {
                Some(err) => ActionResponse::Failure {
                    error: display_value(err).unwrap_or_else(|| "null".to_string()),
                },
                None => ActionResponse::Success(obj),
            },
            _ => ActionResponse::Success(Map::new()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ActionResponse::Failure { .. })
    }
}

/// Typed view over a successful `action=status` reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderStatus {
    pub status: Option<String>,
    pub service: Option<String>,
    pub charge: Option<String>,
    pub start_count: Option<String>,
    pub remains: Option<String>,
}

impl OrderStatus {
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let get = |k: &str| fields.get(k).and_then(display_value);
        Self {
            status: get("status"),
            service: get("service"),
            charge: get("charge"),
            start_count: get("start_count"),
            remains: get("remains"),
        }
    }
}

/// Render a JSON scalar the way a user expects to read it. `null` is absent.
fn display_value(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn command_words_map_to_actions() {
        assert_eq!(Action::from_command("cancel"), Some(Action::Cancel));
        assert_eq!(Action::from_command("REFILL"), Some(Action::Refill));
        assert_eq!(Action::from_command("fake"), Some(Action::FakeComplete));
        assert_eq!(Action::FakeComplete.as_api_str(), "fake_complete");
        assert_eq!(Action::from_command("status"), None);
        assert_eq!(Action::from_command("fake_complete"), None);
        assert_eq!(Action::from_command("bogus"), None);
    }

    #[test]
    fn error_key_means_failure() {
        let r = ActionResponse::from_json(json!({"error": "Incorrect order ID"}));
        assert_eq!(
            r,
            ActionResponse::Failure {
                error: "Incorrect order ID".to_string()
            }
        );

        let r = ActionResponse::from_json(json!({"error": null}));
        assert!(r.is_failure());
    }

    #[test]
    fn status_fields_render_numbers_and_strings() {
        let r = ActionResponse::decode(
            r#"{"charge":"0.27819","start_count":"3572","status":"Partial","remains":157,"currency":"USD"}"#,
        )
        .unwrap();
        let ActionResponse::Success(fields) = r else {
            panic!("expected success");
        };
        let s = OrderStatus::from_fields(&fields);
        assert_eq!(s.status.as_deref(), Some("Partial"));
        assert_eq!(s.charge.as_deref(), Some("0.27819"));
        assert_eq!(s.start_count.as_deref(), Some("3572"));
        assert_eq!(s.remains.as_deref(), Some("157"));
        assert_eq!(s.service, None);
    }

    #[test]
    fn non_object_body_is_an_empty_success() {
        assert_eq!(
            ActionResponse::from_json(json!([1, 2])),
            ActionResponse::Success(Map::new())
        );
    }

    #[test]
    fn non_json_body_is_a_bad_response() {
        let err = ActionResponse::decode("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::BadResponse(_)));
    }
}
