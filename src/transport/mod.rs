// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

pub mod memory;
pub mod reqwest_client;
pub mod traits;
pub mod types;


pub use memory::InMemClient;
pub use reqwest_client::ReqwestClient;
pub use traits::HttpClient;
pub use types::HttpResponse;
