// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::transport::HttpClient;
use crate::types::{Layout, UpdateError, UpdateRequest, UpdateResult};
use crate::updater::endpoints::{self, ACCEPT, CONTENT_TYPE, ODATA_NOMETADATA};
use crate::updater::phase::UpdatePhase;

/// Sets the `PageLayoutType` of a page: checks the file exists, gets a
/// fresh request digest, then MERGEs the new value into the list item.
///
/// Calls are strictly sequential and nothing is kept between operations.
pub struct PageLayoutUpdater {
    client: Arc<dyn HttpClient>,
}

impl PageLayoutUpdater {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// True only when the file lookup answers with a 2xx. Transport errors
    /// are logged and reported as false.
    pub async fn file_exists(&self, site_url: &str, page_relative_url: &str) -> bool {
        let url = endpoints::file_url(site_url, page_relative_url);
        match self.client.get(&url, &[]).await {
            Ok(response) if response.is_success() => {
                debug!("File exists url={}", url);
                true
            }
            Ok(response) => {
                warn!("File lookup url={} status={}", url, response.status);
                false
            }
            Err(e) => {
                warn!("File lookup url={} failed: {}", url, e);
                false
            }
        }
    }

    async fn fetch_request_digest(&self, site_url: &str) -> Result<String, UpdateError> {
        let url = endpoints::context_info_url(site_url);
        let response = self
            .client
            .post_json(&url, &[(ACCEPT, ODATA_NOMETADATA)], None)
            .await
            .map_err(|e| UpdateError::NetworkFault {
                step: "fetching request digest".to_string(),
                message: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(UpdateError::TokenFetchFailure {
                reason: format!("status {}", response.status),
            });
        }

        let value: serde_json::Value =
            response.json().map_err(|e| UpdateError::TokenFetchFailure {
                reason: format!("invalid json: {}", e),
            })?;

        // nometadata answers at the top level, verbose odata nests it
        let digest = value
            .pointer("/FormDigestValue")
            .or_else(|| value.pointer("/d/GetContextWebInformation/FormDigestValue"))
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| UpdateError::TokenFetchFailure {
                reason: "no FormDigestValue in response".to_string(),
            })?;
        Ok(digest.to_string())
    }

    async fn merge_layout(&self, request: &UpdateRequest, digest: &str) -> Result<(), UpdateError> {
        let url = endpoints::list_item_url(request.site_url(), request.page_relative_url());
        let headers = [
            (ACCEPT, ODATA_NOMETADATA),
            (endpoints::X_HTTP_METHOD, "MERGE"),
            (endpoints::IF_MATCH, "*"),
            (endpoints::X_REQUEST_DIGEST, digest),
            (CONTENT_TYPE, ODATA_NOMETADATA),
        ];
        let body = serde_json::json!({ "PageLayoutType": request.layout() });

        let response = self
            .client
            .post_json(&url, &headers, Some(&body))
            .await
            .map_err(|e| UpdateError::NetworkFault {
                step: "updating list item".to_string(),
                message: e.to_string(),
            })?;

        if !response.is_success() {
            debug!("Update response body: {}", response.text());
            return Err(UpdateError::UpdateRejected {
                status: response.status,
            });
        }
        Ok(())
    }

    async fn steps(
        &self,
        request: &UpdateRequest,
        on_phase: &mut (dyn FnMut(UpdatePhase) + Send),
    ) -> Result<(), UpdateError> {
        on_phase(UpdatePhase::CheckingExistence);
        if !self
            .file_exists(request.site_url(), request.page_relative_url())
            .await
        {
            return Err(UpdateError::NotFound {
                url: endpoints::file_url(request.site_url(), request.page_relative_url()),
            });
        }

        on_phase(UpdatePhase::FetchingToken);
        let digest = self.fetch_request_digest(request.site_url()).await?;

        on_phase(UpdatePhase::Updating);
        self.merge_layout(request, &digest).await
    }

    /// Runs the whole operation, reporting every phase it enters.
    pub async fn run(
        &self,
        request: &UpdateRequest,
        on_phase: &mut (dyn FnMut(UpdatePhase) + Send),
    ) -> Result<(), UpdateError> {
        let span = info_span!(
            "page_layout",
            op = %Uuid::new_v4(),
            page = %request.page_relative_url(),
        );
        async {
            info!(
                "Setting layout={} site={}",
                request.layout(),
                request.site_url()
            );
            on_phase(UpdatePhase::Idle);
            let result = self.steps(request, &mut *on_phase).await;
            match &result {
                Ok(()) => {
                    on_phase(UpdatePhase::Succeeded);
                    info!("Page layout updated");
                }
                Err(e) => {
                    on_phase(UpdatePhase::Failed);
                    error!(code = e.error_code(), "Page layout update failed: {}", e);
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    pub async fn update(&self, request: &UpdateRequest) -> Result<(), UpdateError> {
        self.run(request, &mut |_| {}).await
    }

    /// Boolean plus message boundary for callers. Never fails.
    pub async fn submit(
        &self,
        site_url: &str,
        page_relative_url: &str,
        layout: Layout,
    ) -> UpdateResult {
        let request = match UpdateRequest::new(site_url, page_relative_url, layout) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected input: {}", e);
                return UpdateResult::from(&e);
            }
        };
        UpdateResult::from(self.update(&request).await)
    }
}
