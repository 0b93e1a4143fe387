// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

pub mod config;
pub mod form;
pub mod server;
pub mod transport;
pub mod types;
pub mod updater;
pub mod utils;

pub use config::{Config, HttpConfig, ServerConfig};
pub use form::{Banner, FormAction, FormState, FormStatus};
pub use transport::{HttpClient, HttpResponse, InMemClient, ReqwestClient};
pub use types::*;
pub use updater::{PageLayoutUpdater, UpdatePhase};
