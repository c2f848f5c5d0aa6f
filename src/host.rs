use crate::config::Config;
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevatedExecutionRequest {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub icon: String,
    pub channel_id: String,
}

impl ElevatedExecutionRequest {
    /// Builds the request from the notification settings with a fresh random id.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            id: rand::thread_rng().r#gen(),
            title: cfg.notification.title.clone(),
            body: cfg.notification.body.clone(),
            icon: cfg.notification.icon.clone(),
            channel_id: cfg.notification.channel_id.clone(),
        }
    }
}

/// The host is not in a state where it can grant elevated execution.
#[derive(Debug, Clone, Error)]
#[error("host denied elevated execution: {0}")]
pub struct HostDenied(pub String);

#[async_trait]
pub trait ExecutionHost: Send + Sync {
    async fn request_elevated_execution(
        &self,
        request: &ElevatedExecutionRequest,
    ) -> Result<(), HostDenied>;
}

/// Asks `host` for elevated status and reports whether it was granted.
/// A denial is logged and otherwise ignored.
pub async fn request_elevated<H: ExecutionHost + ?Sized>(
    host: &H,
    request: &ElevatedExecutionRequest,
) -> bool {
    match host.request_elevated_execution(request).await {
        Ok(()) => true,
        Err(e) => {
            debug!("request_elevated: {e}");
            false
        }
    }
}

/// Host used by the binary: presentation fields go to the log.
pub struct TracingHost {
    enabled: bool,
}

impl TracingHost {
    pub fn new(cfg: &Config) -> Self {
        Self {
            enabled: cfg.notification.enabled,
        }
    }
}

#[async_trait]
impl ExecutionHost for TracingHost {
    async fn request_elevated_execution(
        &self,
        request: &ElevatedExecutionRequest,
    ) -> Result<(), HostDenied> {
        if !self.enabled {
            return Err(HostDenied("notifications disabled".into()));
        }
        info!(
            id = request.id,
            channel = %request.channel_id,
            icon = %request.icon,
            "{}: {}",
            request.title,
            request.body
        );
        Ok(())
    }
}
