// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const SUCCESS_MESSAGE: &str = "Page layout has been updated";
pub const NOT_FOUND_MESSAGE: &str = "Error occured 'File not found.'";
pub const FAILURE_MESSAGE: &str = "Error occured while updating page layout";

/// Value of the `PageLayoutType` field of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Layout {
    #[default]
    Article,
    SingleWebPartAppPage,
}

impl Layout {
    pub fn all() -> &'static [Layout] {
        &[Layout::Article, Layout::SingleWebPartAppPage]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Article => "Article",
            Layout::SingleWebPartAppPage => "SingleWebPartAppPage",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown page layout: {value}")]
pub struct ParseLayoutError {
    pub value: String,
}

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::all()
            .iter()
            .find(|layout| layout.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ParseLayoutError {
                value: s.to_string(),
            })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpdateError {
    #[error("File not found: {url}")]
    NotFound { url: String },
    #[error("Could not get request digest: {reason}")]
    TokenFetchFailure { reason: String },
    #[error("Update rejected with status {status}")]
    UpdateRejected { status: u16 },
    #[error("Network error while {step}: {message}")]
    NetworkFault { step: String, message: String },
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl UpdateError {
    pub fn error_code(&self) -> &'static str {
        match self {
            UpdateError::NotFound { .. } => "FILE_NOT_FOUND",
            UpdateError::TokenFetchFailure { .. } => "TOKEN_FETCH_FAILURE",
            UpdateError::UpdateRejected { .. } => "UPDATE_REJECTED",
            UpdateError::NetworkFault { .. } => "NETWORK_FAULT",
            UpdateError::InvalidRequest { .. } => "INVALID_REQUEST",
        }
    }

    /// Message shown to the operator. Only not-found and invalid input get
    /// their own wording, everything else is a generic failure.
    pub fn user_message(&self) -> String {
        match self {
            UpdateError::NotFound { .. } => NOT_FOUND_MESSAGE.to_string(),
            UpdateError::InvalidRequest { .. } => self.to_string(),
            _ => FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Input to one layout update. Fields are validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    site_url: String,
    page_relative_url: String,
    layout: Layout,
}

impl UpdateRequest {
    pub fn new(
        site_url: &str,
        page_relative_url: &str,
        layout: Layout,
    ) -> Result<Self, UpdateError> {
        let site_url = site_url.trim();
        let parsed = reqwest::Url::parse(site_url).map_err(|e| UpdateError::InvalidRequest {
            reason: format!("site url '{}' is not an absolute url: {}", site_url, e),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(UpdateError::InvalidRequest {
                reason: format!("site url '{}' must be http or https", site_url),
            });
        }
        let site_url = if site_url.ends_with('/') {
            site_url.to_string()
        } else {
            format!("{}/", site_url)
        };

        let page_relative_url = page_relative_url.trim();
        if page_relative_url.is_empty() {
            return Err(UpdateError::InvalidRequest {
                reason: "page url is empty".to_string(),
            });
        }
        // embedded in a quoted literal inside the url path
        if let Some(c) = page_relative_url.chars().find(|&c| matches!(c, '\'' | '#' | '?')) {
            return Err(UpdateError::InvalidRequest {
                reason: format!("page url '{}' contains '{}'", page_relative_url, c),
            });
        }
        if !page_relative_url.to_ascii_lowercase().ends_with(".aspx") {
            warn!("Page url does not look like a page: {}", page_relative_url);
        }

        Ok(Self {
            site_url,
            page_relative_url: page_relative_url.to_string(),
            layout,
        })
    }

    /// Site url, always ending in `/`
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn page_relative_url(&self) -> &str {
        &self.page_relative_url
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub success: bool,
    pub message: String,
}

impl UpdateResult {
    pub fn success() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

impl From<&UpdateError> for UpdateResult {
    fn from(error: &UpdateError) -> Self {
        UpdateResult::failure(error.user_message())
    }
}

impl From<Result<(), UpdateError>> for UpdateResult {
    fn from(result: Result<(), UpdateError>) -> Self {
        match result {
            Ok(()) => UpdateResult::success(),
            Err(e) => UpdateResult::from(&e),
        }
    }
}
