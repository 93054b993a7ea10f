// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP, retrying a fixed number of times.
//
// Key functionality:
// - One shared reqwest Client (connection pooling, timeout, User-Agent)
// - Malformed URLs are rejected up front, no retries are spent on them
// - Any network error, timeout or non-2xx status counts as a failed attempt
// - A fixed pause separates two attempts for the same URL
//
// Rust concepts:
// - async/await: Network I/O and sleeping without blocking the thread
// - Result<T, E>: Every attempt either yields the body or a FetchError
// =============================================================================

use crate::config::Config;
use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

// Downloads pages using the settings from Config
pub struct Fetcher {
    client: Client,
    retry_limit: u32,
    retry_delay: Duration,
}

impl Fetcher {
    // Creates a fetcher with an HTTP client configured from the batch settings
    pub fn new(config: &Config) -> Result<Fetcher, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Fetcher {
            client,
            retry_limit: config.retry_limit.max(1),
            retry_delay: config.retry_delay,
        })
    }

    // Fetches a page body, trying at most `retry_limit` times
    //
    // Returns:
    //   Ok(html) as soon as one attempt succeeds
    //   Err(InvalidUrl) without sending anything if the URL is unusable
    //   Err(Exhausted) when every attempt failed
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = url.trim();
        let parsed = validate_url(url)?;
        let mut last_error = String::new();

        for attempt in 1..=self.retry_limit {
            match self.fetch_once(parsed.clone()).await {
                Ok(body) => {
                    debug!("Fetched {} bytes from {} (attempt {})", body.len(), url, attempt);
                    return Ok(body);
                }
                Err(e) => {
                    last_error = describe_error(&e);
                    warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt, self.retry_limit, url, last_error
                    );

                    // No point in waiting after the final attempt
                    if attempt < self.retry_limit {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Err(FetchError::Exhausted {
            attempts: self.retry_limit,
            last_error,
        })
    }

    // A single GET request; non-2xx statuses become errors
    async fn fetch_once(&self, url: Url) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        Ok(body)
    }
}

// Parses the URL and checks that it is something we can GET
fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

// Turns an attempt failure into a short human-readable reason
//
// reqwest errors can happen for many reasons:
// - Non-2xx status (from error_for_status)
// - Network timeout
// - Connection refused / DNS failure
// - Too many redirects
fn describe_error(error: &FetchError) -> String {
    let FetchError::Transport(error) = error else {
        return error.to_string();
    };

    if let Some(status) = error.status() {
        format!("HTTP {}", status.as_u16())
    } else if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one Client for the whole batch?
//    - reqwest keeps a connection pool inside the Client
//    - Reusing it avoids a new TCP/TLS handshake for every page on a host
//
// 2. What is `let ... else`?
//    - `let FetchError::Transport(error) = error else { ... };` binds the
//      inner reqwest error if the pattern matches, otherwise runs the else
//      block, which must return (or break/continue)
//
// 3. Why tokio::time::sleep and not std::thread::sleep?
//    - std's sleep blocks the whole thread, so no other record could make
//      progress with --jobs > 1
//    - tokio's sleep only pauses this one future
// -----------------------------------------------------------------------------
