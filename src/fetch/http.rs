// src/fetch/http.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::fetch::types::{FetchError, SourceFetcher, SourcePayload};
use crate::sources::Source;

/// Plain HTTP GET fetcher, one instance per configured source. The client
/// is shared across the run's fetchers and dropped with them.
pub struct HttpFetcher {
    source: Source,
    url: String,
    client: Client,
}

impl HttpFetcher {
    pub fn new(source: Source, url: impl Into<String>, client: Client) -> Self {
        Self {
            source,
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<SourcePayload, FetchError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(classify)?;
        if resp.status() != StatusCode::OK {
            return Err(FetchError::BadStatus(resp.status()));
        }
        resp.json::<SourcePayload>().await.map_err(classify)
    }

    fn source(&self) -> Source {
        self.source
    }
}

// A body that is not well-formed JSON counts as a transport failure; the
// taxonomy stays bad-status | timeout | transport.
fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}
