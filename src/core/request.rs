//! Request orchestration for the webhook endpoint.
//!
//! One submission becomes one spawned task that races the HTTP call against a
//! timer and reports exactly one outcome back over a channel, tagged with the
//! request id it belongs to. The losing side of the race is simply discarded;
//! a late reply from a timed-out call goes nowhere.

use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{decode_reply, WebhookRequest};
use crate::core::fault::RequestFault;

/// Terminal result of one orchestrated request. A `Reply` may carry the
/// decoder's fallback text; that is a normal settlement, not a fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    Reply(String),
    Fault(RequestFault),
}

pub struct RequestParams {
    pub client: reqwest::Client,
    pub endpoint: String,
    pub message: String,
    pub timeout: Duration,
    pub request_id: u64,
}

#[derive(Clone)]
pub struct RequestService {
    tx: mpsc::UnboundedSender<(RequestOutcome, u64)>,
}

impl RequestService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(RequestOutcome, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Sends `message` to the endpoint and races it against `timeout`.
    /// Exactly one `(outcome, request_id)` pair is delivered per call, on
    /// every path.
    pub fn spawn_request(&self, params: RequestParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let RequestParams {
                client,
                endpoint,
                message,
                timeout,
                request_id,
            } = params;

            debug!(request_id, %endpoint, "dispatching webhook request");

            let outcome = tokio::select! {
                outcome = dispatch(&client, &endpoint, &message) => outcome,
                _ = tokio::time::sleep(timeout) => {
                    debug!(request_id, "request timed out");
                    RequestOutcome::Fault(RequestFault::Timeout)
                }
            };

            let _ = tx.send((outcome, request_id));
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, outcome: RequestOutcome, request_id: u64) {
        let _ = self.tx.send((outcome, request_id));
    }
}

async fn dispatch(client: &reqwest::Client, endpoint: &str, message: &str) -> RequestOutcome {
    let response = match client
        .post(endpoint)
        .header("Content-Type", "application/json")
        .json(&WebhookRequest { message })
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, "webhook request failed to send");
            return RequestOutcome::Fault(RequestFault::Network);
        }
    };

    if let Some(fault) = RequestFault::from_status(response.status()) {
        return RequestOutcome::Fault(fault);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            debug!(error = %err, "failed to read webhook response body");
            return RequestOutcome::Fault(RequestFault::Unclassified);
        }
    };

    match serde_json::from_str::<Value>(&body) {
        Ok(payload) => RequestOutcome::Reply(decode_reply(&payload)),
        Err(err) => {
            debug!(error = %err, "webhook response was not JSON");
            RequestOutcome::Fault(RequestFault::Unclassified)
        }
    }
}
