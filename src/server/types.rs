use poem_openapi::Object;

use crate::types::{UpdateError, UpdateResult};

#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct LayoutUpdateBody {
    pub site_url: String,
    pub page_relative_url: String,
    pub layout: String,
}

#[derive(Object, Debug, Clone, PartialEq)]
pub struct LayoutUpdateResponse {
    pub success: bool,
    pub message: String,
    #[oai(skip_serializing_if_is_none)]
    pub code: Option<String>,
}

impl LayoutUpdateResponse {
    pub fn from_result(result: Result<(), UpdateError>) -> Self {
        let code = result.as_ref().err().map(|e| e.error_code().to_string());
        let result = UpdateResult::from(result);
        Self {
            success: result.success,
            message: result.message,
            code,
        }
    }

    pub fn in_progress() -> Self {
        Self {
            success: false,
            message: "An update for this page is already in progress".to_string(),
            code: Some("IN_PROGRESS".to_string()),
        }
    }
}

#[derive(Object, Debug, Clone)]
pub struct LayoutListResults {
    pub count: usize,
    pub results: Vec<String>,
}
