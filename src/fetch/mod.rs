pub mod http;
pub mod types;

use async_trait::async_trait;

pub use http::HttpFetcher;
pub use types::FetchOutcome;

/// Performs the remote fetch for one attempt. Implementations report every
/// failure through [`FetchOutcome`] instead of returning an error.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self) -> FetchOutcome;
}
