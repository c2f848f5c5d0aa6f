use super::{types::FetchOutcome, Fetcher};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
    timeout_seconds: u64,
}

impl HttpFetcher {
    pub fn new(cfg: &Config) -> Result<Self> {
        let endpoint = cfg.job.endpoint.trim().to_string();
        if endpoint.is_empty() {
            return Err(anyhow!("job.endpoint is empty"));
        }
        url::Url::parse(&endpoint).with_context(|| format!("invalid job.endpoint: {endpoint}"))?;

        let mut builder = reqwest::Client::builder().user_agent(cfg.http.user_agent.clone());
        if cfg.http.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(cfg.http.timeout_seconds));
        }
        let client = builder.build().with_context(|| "building HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            timeout_seconds: cfg.http.timeout_seconds,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn describe_send_error(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!(
                "Timeout fetching '{}' (exceeded {} seconds)",
                self.endpoint, self.timeout_seconds
            )
        } else if err.is_connect() {
            format!("Connection failed for '{}': {}", self.endpoint, err)
        } else {
            format!("Failed to fetch '{}': {}", self.endpoint, err)
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self) -> FetchOutcome {
        debug!("GET {}", self.endpoint);
        let response = match self.client.get(&self.endpoint).send().await {
            Ok(r) => r,
            Err(e) => {
                let message = self.describe_send_error(&e);
                warn!("{message}");
                return FetchOutcome::TransportError { message };
            }
        };

        let status = response.status();
        debug!("response status={} url={}", status, self.endpoint);

        // Error responses and bodiless successes are reported by status only.
        if !status.is_success()
            || status == StatusCode::NO_CONTENT
            || status == StatusCode::RESET_CONTENT
        {
            return FetchOutcome::HttpError {
                status: status.as_u16(),
            };
        }

        match response.bytes().await {
            Ok(body) => FetchOutcome::BodyReceived {
                bytes: body.to_vec(),
            },
            Err(e) => {
                let message = format!(
                    "Failed to read response body from '{}': {}",
                    self.endpoint, e
                );
                warn!("{message}");
                FetchOutcome::BodyReadError { message }
            }
        }
    }
}
