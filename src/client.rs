use std::time::Duration;

use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

/// Thin wrapper over a pooled `reqwest::Client` shared by the three calls of a run.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
}

impl ApiClient {
    pub fn new() -> Result<Self> {
        let http = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(2)
            .build()?;
        Ok(Self { http })
    }

    /// POSTs `body` as JSON and returns the response text when the status is 200.
    pub async fn post_json<T>(&self, url: &str, body: &T, timeout: Duration) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        send(self.http.post(url).json(body).timeout(timeout)).await
    }

    /// GETs `url` with the given query string and returns the response text when the status is 200.
    pub async fn get<Q>(&self, url: &str, query: &Q, timeout: Duration) -> Result<String>
    where
        Q: Serialize + ?Sized,
    {
        send(self.http.get(url).query(query).timeout(timeout)).await
    }
}

pub fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

async fn send(request: RequestBuilder) -> Result<String> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        return Err(AppError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}
