//! Retry and backoff policy for HEAD probes.
//!
//! Classifies probe failures (timeouts, throttling, connection failures) and
//! decides exponential backoff. The default policy makes a single attempt.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
