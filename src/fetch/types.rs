use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchOutcome {
    BodyReceived { bytes: Vec<u8> },
    /// The response carried no body. `status` may still be a 2xx.
    HttpError { status: u16 },
    /// No response arrived.
    TransportError { message: String },
    /// A successful response whose body could not be read to the end.
    BodyReadError { message: String },
}

impl FetchOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchOutcome::BodyReceived { .. } => "body_received",
            FetchOutcome::HttpError { .. } => "http_error",
            FetchOutcome::TransportError { .. } => "transport_error",
            FetchOutcome::BodyReadError { .. } => "body_read_error",
        }
    }
}
