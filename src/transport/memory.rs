// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::transport::{traits::HttpClient, types::HttpResponse};

#[derive(Debug, Clone)]
enum Scripted {
    Respond(HttpResponse),
    Fail(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Scripted in-process transport. Answers by method and url, 404 when
/// nothing was scripted, and keeps every request it saw.
pub struct InMemClient {
    routes: RwLock<HashMap<(String, String), Scripted>>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl InMemClient {
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(HashMap::new()),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, method: &str, url: &str, status: u16, body: &str) -> Self {
        self.routes.get_mut().insert(
            (method.to_string(), url.to_string()),
            Scripted::Respond(HttpResponse::new(status, body)),
        );
        self
    }

    /// Requests to `url` fail as if the connection could not be made
    pub fn with_failure(mut self, method: &str, url: &str, message: &str) -> Self {
        self.routes.get_mut().insert(
            (method.to_string(), url.to_string()),
            Scripted::Fail(message.to_string()),
        );
        self
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    pub async fn count(&self, method: &str, url: &str) -> usize {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    async fn answer(&self, request: RecordedRequest) -> anyhow::Result<HttpResponse> {
        let key = (request.method.clone(), request.url.clone());
        self.requests.write().await.push(request);
        match self.routes.read().await.get(&key) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::Fail(message)) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(HttpResponse::new(404, "")),
        }
    }
}

impl Default for InMemClient {
    fn default() -> Self {
        Self::new()
    }
}

fn record(
    method: &str,
    url: &str,
    headers: &[(&str, &str)],
    body: Option<String>,
) -> RecordedRequest {
    RecordedRequest {
        method: method.to_string(),
        url: url.to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body,
    }
}

#[async_trait]
impl HttpClient for InMemClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> anyhow::Result<HttpResponse> {
        self.answer(record("GET", url, headers, None)).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> anyhow::Result<HttpResponse> {
        let body = body.map(serde_json::to_string).transpose()?;
        self.answer(record("POST", url, headers, body)).await
    }
}
