//! SharePoint REST endpoints and headers used by the layout update.
//!
//! `site_url` is expected to end in `/`. The page url is embedded verbatim
//! inside a quoted literal, no escaping is done.

pub const ODATA_NOMETADATA: &str = "application/json;odata=nometadata";

pub const ACCEPT: &str = "accept";
pub const CONTENT_TYPE: &str = "content-type";
pub const X_HTTP_METHOD: &str = "X-HTTP-Method";
pub const IF_MATCH: &str = "IF-MATCH";
pub const X_REQUEST_DIGEST: &str = "X-RequestDigest";

pub fn file_url(site_url: &str, page_relative_url: &str) -> String {
    format!("{}_api/web/getfilebyurl('{}')", site_url, page_relative_url)
}

pub fn list_item_url(site_url: &str, page_relative_url: &str) -> String {
    format!("{}/ListItemAllFields", file_url(site_url, page_relative_url))
}

pub fn context_info_url(site_url: &str) -> String {
    format!("{}_api/contextinfo", site_url)
}
