//! Async HTTP client wrapping reqwest.
//!
//! A call succeeds only on HTTP 200 with a JSON body. Transport failures and
//! other statuses are retried under the configured [`RetryPolicy`]; a body
//! that does not parse as JSON fails immediately.

use serde::Serialize;
use serde_json::Value;

use crate::types::{ServerError, ServerResult};

use super::retry::{retry, RetryPolicy};

/// JSON fetcher shared by every handler.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(policy: RetryPolicy) -> ServerResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fizz-subtext/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, policy })
    }

    /// GET `url` and parse the body as JSON.
    pub async fn get_json(&self, url: &str) -> ServerResult<Value> {
        let this = self;
        retry(self.policy, &format!("GET {url}"), move || this.get_once(url)).await
    }

    /// POST `body` as JSON to `url` and parse the reply as JSON.
    pub async fn post_json<B>(&self, url: &str, body: &B) -> ServerResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let this = self;
        retry(self.policy, &format!("POST {url}"), move || {
            this.post_once(url, body)
        })
        .await
    }

    async fn get_once(&self, url: &str) -> ServerResult<Value> {
        tracing::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        read_json(url, response).await
    }

    async fn post_once<B>(&self, url: &str, body: &B) -> ServerResult<Value>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!("POST {url}");
        let response = self.client.post(url).json(body).send().await?;
        read_json(url, response).await
    }
}

async fn read_json(url: &str, response: reqwest::Response) -> ServerResult<Value> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(ServerError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ServerError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}
