// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::config::HttpConfig;
use crate::transport::{traits::HttpClient, types::HttpResponse};

/// HTTP client backed by reqwest.
///
/// Credentials are not negotiated here: whatever the config puts in
/// `http.headers` (cookies, bearer tokens) is sent on every request.
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| anyhow::anyhow!("Invalid header name {}: {}", name, e))?;
            let mut value = HeaderValue::from_str(value)
                .map_err(|e| anyhow::anyhow!("Invalid value for header {}: {}", name, e))?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    async fn send(
        &self,
        mut builder: reqwest::RequestBuilder,
        headers: &[(&str, &str)],
    ) -> anyhow::Result<HttpResponse> {
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!("Response status={} length={}", status, body.len());
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> anyhow::Result<HttpResponse> {
        debug!("GET {}", url);
        self.send(self.client.get(url), headers).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> anyhow::Result<HttpResponse> {
        debug!("POST {}", url);
        let mut builder = self.client.post(url);
        // raw bytes, so the content-type given by the caller is kept as is
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        self.send(builder, headers).await
    }
}
