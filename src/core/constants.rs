//! Shared constants used across the application

use std::time::Duration;

/// Default automation endpoint the client posts user messages to.
pub const WEBHOOK_URL: &str = "https://hook.eu2.make.com/ymrirgtspure7mg4fj6ko3ouiovpyp2m";

/// How long a request may stay in flight before it is treated as timed out.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(60_000);
