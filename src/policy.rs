use crate::{config::Config, fetch::FetchOutcome};
use serde::{Deserialize, Serialize};

pub const NETWORK_ERROR: &str = "Network error";
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportPolicy {
    Failure,
    Retry,
}

impl TransportPolicy {
    pub fn from_config(cfg: &Config) -> Self {
        match cfg.classification.transport_errors.as_str() {
            "retry" => TransportPolicy::Retry,
            _ => TransportPolicy::Failure,
        }
    }
}

/// What the executor does next with a fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<'a> {
    Persist(&'a [u8]),
    Retry,
    Fail(String),
}

pub fn decide<'a>(cfg: &Config, outcome: &'a FetchOutcome) -> Verdict<'a> {
    classify(TransportPolicy::from_config(cfg), outcome)
}

pub fn classify(transport: TransportPolicy, outcome: &FetchOutcome) -> Verdict<'_> {
    match outcome {
        FetchOutcome::BodyReceived { bytes } => Verdict::Persist(bytes.as_slice()),
        FetchOutcome::HttpError { status } if is_server_error(*status) => Verdict::Retry,
        FetchOutcome::HttpError { status } if !is_success(*status) => {
            Verdict::Fail(NETWORK_ERROR.to_string())
        }
        FetchOutcome::HttpError { .. } => Verdict::Fail(UNKNOWN_ERROR.to_string()),
        FetchOutcome::BodyReadError { message } => Verdict::Fail(message.clone()),
        FetchOutcome::TransportError { message } => match transport {
            TransportPolicy::Retry => Verdict::Retry,
            TransportPolicy::Failure => Verdict::Fail(message.clone()),
        },
    }
}

fn is_server_error(status: u16) -> bool {
    (500..=599).contains(&status)
}

fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}
