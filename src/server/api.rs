use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use poem::Error as PoemError;
use poem_openapi::{payload::Json, OpenApi};
use tracing::{info, warn};

use crate::server::types::{LayoutListResults, LayoutUpdateBody, LayoutUpdateResponse};
use crate::types::{Layout, ParseLayoutError, UpdateRequest};
use crate::updater::PageLayoutUpdater;

type PageKey = (String, String);

/// Pages with an update running. A second submit for the same page is
/// refused until the first one finishes.
#[derive(Default, Clone)]
pub struct InFlightPages {
    pages: Arc<Mutex<HashSet<PageKey>>>,
}

pub struct InFlightGuard {
    pages: Arc<Mutex<HashSet<PageKey>>>,
    key: PageKey,
}

impl InFlightPages {
    pub fn claim(&self, request: &UpdateRequest) -> Option<InFlightGuard> {
        let key = (
            request.site_url().to_string(),
            request.page_relative_url().to_string(),
        );
        let mut pages = self.pages.lock().unwrap_or_else(|e| e.into_inner());
        if !pages.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            pages: self.pages.clone(),
            key,
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut pages = self.pages.lock().unwrap_or_else(|e| e.into_inner());
        pages.remove(&self.key);
    }
}

pub struct Api {
    updater: Arc<PageLayoutUpdater>,
    in_flight: InFlightPages,
}

#[OpenApi]
impl Api {
    pub fn new(updater: Arc<PageLayoutUpdater>) -> Self {
        Self {
            updater,
            in_flight: InFlightPages::default(),
        }
    }

    #[oai(path = "/layout", method = "post")]
    async fn update_layout(
        &self,
        Json(body): Json<LayoutUpdateBody>,
    ) -> Result<Json<LayoutUpdateResponse>, PoemError> {
        let layout: Layout = body.layout.parse().map_err(|e: ParseLayoutError| {
            PoemError::from_string(e.to_string(), poem::http::StatusCode::BAD_REQUEST)
        })?;

        let request = match UpdateRequest::new(&body.site_url, &body.page_relative_url, layout) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected input: {}", e);
                return Ok(Json(LayoutUpdateResponse::from_result(Err(e))));
            }
        };

        let _guard = match self.in_flight.claim(&request) {
            Some(guard) => guard,
            None => {
                info!(
                    "Update already running for page={}",
                    request.page_relative_url()
                );
                return Ok(Json(LayoutUpdateResponse::in_progress()));
            }
        };

        let result = self.updater.update(&request).await;
        Ok(Json(LayoutUpdateResponse::from_result(result)))
    }

    #[oai(path = "/layout", method = "get")]
    async fn layouts(&self) -> Json<LayoutListResults> {
        let results: Vec<String> = Layout::all().iter().map(|l| l.to_string()).collect();
        Json(LayoutListResults {
            count: results.len(),
            results,
        })
    }
}
