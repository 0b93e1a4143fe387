// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use crate::types::{Layout, UpdateError, UpdateRequest, UpdateResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SiteUrlChanged(String),
    PageUrlChanged(String),
    LayoutChanged(Layout),
    Submitted,
    Completed(UpdateResult),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Success(String),
    Error(String),
}

/// State of the "set page layout" form. Every change goes through `reduce`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub site_url: String,
    pub page_url: String,
    pub layout: Layout,
    pub status: FormStatus,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(self, action: FormAction) -> Self {
        match action {
            FormAction::SiteUrlChanged(site_url) => Self { site_url, ..self }.edited(),
            FormAction::PageUrlChanged(page_url) => Self { page_url, ..self }.edited(),
            FormAction::LayoutChanged(layout) => Self { layout, ..self }.edited(),
            FormAction::Submitted => Self {
                status: FormStatus::Submitting,
                ..self
            },
            FormAction::Completed(result) => {
                let status = if result.success {
                    FormStatus::Succeeded(result.message)
                } else {
                    FormStatus::Failed(result.message)
                };
                Self { status, ..self }
            }
        }
    }

    // An edit clears any message, but cannot cancel a running submission
    fn edited(self) -> Self {
        if self.is_submitting() {
            return self;
        }
        Self {
            status: FormStatus::Editing,
            ..self
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Whether a `Submitted` action would start a new update
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    pub fn banner(&self) -> Option<Banner> {
        match &self.status {
            FormStatus::Succeeded(message) => Some(Banner::Success(message.clone())),
            FormStatus::Failed(message) => Some(Banner::Error(message.clone())),
            _ => None,
        }
    }

    pub fn request(&self) -> Result<UpdateRequest, UpdateError> {
        UpdateRequest::new(&self.site_url, &self.page_url, self.layout)
    }
}
