use async_trait::async_trait;

use crate::transport::types::HttpResponse;

/// Minimal HTTP capability the layout updater depends on.
///
/// An `Err` is a transport level fault (dns, connection, timeout). Any HTTP
/// status, including 4xx and 5xx, is an `Ok` response.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> anyhow::Result<HttpResponse>;

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> anyhow::Result<HttpResponse>;
}
