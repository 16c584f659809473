//! Fault taxonomy for webhook requests.
//!
//! Every way a request can fail collapses into one of these categories, and
//! every category maps to exactly one user-facing message. Classification is
//! total: there is no fault the orchestrator can produce that does not render
//! as one of the texts below.

use reqwest::StatusCode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestFault {
    /// The 60-second timer fired before the call settled.
    Timeout,
    /// The call itself failed: no response object was obtainable.
    Network,
    /// The upstream proxy answered 520, which this endpoint emits under load.
    Upstream520,
    /// Any other non-success status code.
    HttpStatus(u16),
    /// Body read failures, invalid JSON, and anything else unforeseen.
    Unclassified,
}

impl RequestFault {
    /// Classifies a response status. 520 is checked before the generic
    /// non-success test; success codes classify as no fault at all.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.as_u16() == 520 {
            Some(RequestFault::Upstream520)
        } else if !status.is_success() {
            Some(RequestFault::HttpStatus(status.as_u16()))
        } else {
            None
        }
    }

    /// The message shown in the transcript for this fault.
    pub fn user_message(&self) -> String {
        match self {
            RequestFault::Timeout => {
                "The AI is taking longer than expected to respond. Please try again.".to_string()
            }
            RequestFault::Network => {
                "There was an issue connecting to the AI. Please check your internet connection \
                 and try again."
                    .to_string()
            }
            RequestFault::Upstream520 => {
                "The server encountered an error (520). This might be due to high traffic or \
                 temporary issues. Please try again later."
                    .to_string()
            }
            RequestFault::HttpStatus(code) => {
                format!(
                    "The server responded with an error: HTTP error! status: {code}. \
                     Please try again later."
                )
            }
            RequestFault::Unclassified => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }
}
