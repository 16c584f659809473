//! Wire types for the webhook endpoint and the reply decoder.

use serde::Serialize;
use serde_json::Value;

/// Body posted to the webhook: `{"message": "..."}`.
#[derive(Serialize)]
pub struct WebhookRequest<'a> {
    pub message: &'a str,
}

/// Shown when a response parses as JSON but does not carry a reply.
pub const FALLBACK_REPLY: &str = "The AI encountered an error. Please try again.";

/// Pulls the reply text out of a webhook payload.
///
/// The endpoint answers with `[{"Bundle": [{"Body": "..."}]}]`. Anything that
/// deviates from that shape (wrong type at any level, empty sequences, a
/// missing or empty `Body`) yields `None`.
pub fn extract_reply(payload: &Value) -> Option<&str> {
    payload
        .get(0)?
        .get("Bundle")?
        .get(0)?
        .get("Body")?
        .as_str()
        .filter(|body| !body.is_empty())
}

/// Decodes a payload into the reply text, falling back to [`FALLBACK_REPLY`]
/// when the expected shape is absent. A missing reply is a normal outcome
/// here, not an error.
pub fn decode_reply(payload: &Value) -> String {
    extract_reply(payload)
        .map(str::to_owned)
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_reply_from_expected_shape() {
        let payload = json!([{"Bundle": [{"Body": "Hello"}]}]);
        assert_eq!(extract_reply(&payload), Some("Hello"));
        assert_eq!(decode_reply(&payload), "Hello");
    }

    #[test]
    fn only_the_first_bundle_entry_counts() {
        let payload = json!([
            {"Bundle": [{"Body": "first"}, {"Body": "second"}]},
            {"Bundle": [{"Body": "third"}]}
        ]);
        assert_eq!(extract_reply(&payload), Some("first"));
    }

    #[test]
    fn shape_deviations_fall_back() {
        let payloads = [
            json!([]),
            json!([{"Bundle": []}]),
            json!({}),
            json!([{"Bundle": [{}]}]),
            json!([{"Bundle": [{"Body": 42}]}]),
            json!([{"Bundle": {"Body": "nested wrong"}}]),
            json!("just a string"),
            json!(null),
        ];
        for payload in payloads {
            assert_eq!(extract_reply(&payload), None, "payload: {payload}");
            assert_eq!(decode_reply(&payload), FALLBACK_REPLY);
        }
    }

    #[test]
    fn empty_body_is_a_decode_miss() {
        let payload = json!([{"Bundle": [{"Body": ""}]}]);
        assert_eq!(decode_reply(&payload), FALLBACK_REPLY);
    }

    #[test]
    fn webhook_request_serializes_to_message_object() {
        let body = serde_json::to_value(WebhookRequest { message: "wake up" }).unwrap();
        assert_eq!(body, json!({"message": "wake up"}));
    }
}
