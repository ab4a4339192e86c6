//! Source fetching: one HTTP request per configured account

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use reqwest::header::ACCEPT;

use crate::config::LeaderboardConfig;
use crate::error::FetchError;

/// Fetches the raw body of one listing URL.
pub trait RepoFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`RepoFetcher`] over a shared `reqwest` client
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &LeaderboardConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { client })
    }
}

impl RepoFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        let url = url.to_string();

        async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    source_name: url,
                    status: status.as_u16(),
                });
            }
            Ok(response.text().await?)
        }
    }
}

/// Run one attempt: request every URL concurrently and wait for all of them.
///
/// Succeeds only if every request succeeds; bodies come back in `urls` order.
pub async fn fetch_attempt<F: RepoFetcher>(
    fetcher: &F,
    urls: &[String],
) -> Result<Vec<String>, FetchError> {
    let results = join_all(urls.iter().map(|url| fetcher.fetch(url))).await;

    let mut bodies = Vec::with_capacity(results.len());
    let mut first_error = None;
    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(body) => bodies.push(body),
            Err(e) => {
                log::debug!("Request to {} failed: {}", url, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(bodies),
    }
}
