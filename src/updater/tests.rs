// (C) Coralbits SL 2025
// This file is part of Pagelayout and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::transport::InMemClient;
    use crate::types::{Layout, UpdateError, UpdateRequest, UpdateResult};
    use crate::updater::{PageLayoutUpdater, UpdatePhase};

    const SITE: &str = "https://example.sharepoint.com/sites/dev/";
    const PAGE: &str = "/sites/dev/SitePages/home.aspx";
    const FILE_URL: &str =
        "https://example.sharepoint.com/sites/dev/_api/web/getfilebyurl('/sites/dev/SitePages/home.aspx')";
    const ITEM_URL: &str = "https://example.sharepoint.com/sites/dev/_api/web/getfilebyurl('/sites/dev/SitePages/home.aspx')/ListItemAllFields";
    const CONTEXT_URL: &str = "https://example.sharepoint.com/sites/dev/_api/contextinfo";

    fn sharepoint(file_status: u16, update_status: u16) -> InMemClient {
        InMemClient::new()
            .with_response("GET", FILE_URL, file_status, "{}")
            .with_response("POST", CONTEXT_URL, 200, r#"{"FormDigestValue":"abc123"}"#)
            .with_response("POST", ITEM_URL, update_status, "")
    }

    fn updater(client: &Arc<InMemClient>) -> PageLayoutUpdater {
        PageLayoutUpdater::new(client.clone())
    }

    #[tokio::test]
    async fn test_update_succeeds() {
        let client = Arc::new(sharepoint(200, 204));
        let result = updater(&client).submit(SITE, PAGE, Layout::Article).await;

        assert_eq!(
            result,
            UpdateResult {
                success: true,
                message: "Page layout has been updated".to_string(),
            }
        );

        let requests = client.requests().await;
        let methods: Vec<(&str, &str)> = requests
            .iter()
            .map(|r| (r.method.as_str(), r.url.as_str()))
            .collect();
        assert_eq!(
            methods,
            vec![("GET", FILE_URL), ("POST", CONTEXT_URL), ("POST", ITEM_URL)]
        );
    }

    #[tokio::test]
    async fn test_missing_file_never_updates() {
        let client = Arc::new(sharepoint(404, 200));
        let result = updater(&client).submit(SITE, PAGE, Layout::Article).await;

        assert_eq!(
            result,
            UpdateResult {
                success: false,
                message: "Error occured 'File not found.'".to_string(),
            }
        );
        assert_eq!(client.count("GET", FILE_URL).await, 1);
        assert_eq!(client.count("POST", CONTEXT_URL).await, 0);
        assert_eq!(client.count("POST", ITEM_URL).await, 0);
    }

    #[tokio::test]
    async fn test_unreachable_site_is_not_found() {
        let client = Arc::new(
            InMemClient::new().with_failure("GET", FILE_URL, "dns error: no such host"),
        );
        let updater = updater(&client);
        assert!(!updater.file_exists(SITE, PAGE).await);

        let request = UpdateRequest::new(SITE, PAGE, Layout::Article).unwrap();
        let err = updater.update(&request).await.unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
        assert_eq!(client.count("POST", ITEM_URL).await, 0);
    }

    #[tokio::test]
    async fn test_rejected_update() {
        let client = Arc::new(sharepoint(200, 500));
        let result = updater(&client)
            .submit(SITE, PAGE, Layout::SingleWebPartAppPage)
            .await;

        assert_eq!(
            result,
            UpdateResult {
                success: false,
                message: "Error occured while updating page layout".to_string(),
            }
        );

        let request = UpdateRequest::new(SITE, PAGE, Layout::Article).unwrap();
        let err = updater(&client).update(&request).await.unwrap_err();
        assert_eq!(err, UpdateError::UpdateRejected { status: 500 });
    }

    #[tokio::test]
    async fn test_update_request_headers_and_body() {
        let client = Arc::new(sharepoint(200, 200));
        let request = UpdateRequest::new(SITE, PAGE, Layout::SingleWebPartAppPage).unwrap();
        updater(&client).update(&request).await.unwrap();

        let requests = client.requests().await;
        let context = &requests[1];
        assert_eq!(
            context.header("accept"),
            Some("application/json;odata=nometadata")
        );
        assert_eq!(context.body, None);

        let update = &requests[2];
        assert_eq!(update.header("X-HTTP-Method"), Some("MERGE"));
        assert_eq!(update.header("IF-MATCH"), Some("*"));
        assert_eq!(update.header("X-RequestDigest"), Some("abc123"));
        assert_eq!(
            update.header("content-type"),
            Some("application/json;odata=nometadata")
        );
        assert_eq!(
            update.body.as_deref(),
            Some(r#"{"PageLayoutType":"SingleWebPartAppPage"}"#)
        );
    }

    #[tokio::test]
    async fn test_verbose_digest_is_accepted() {
        let client = Arc::new(
            InMemClient::new()
                .with_response("GET", FILE_URL, 200, "{}")
                .with_response(
                    "POST",
                    CONTEXT_URL,
                    200,
                    r#"{"d":{"GetContextWebInformation":{"FormDigestValue":"0x1234,16 Oct 2026"}}}"#,
                )
                .with_response("POST", ITEM_URL, 204, ""),
        );
        let request = UpdateRequest::new(SITE, PAGE, Layout::Article).unwrap();
        updater(&client).update(&request).await.unwrap();

        let requests = client.requests().await;
        assert_eq!(
            requests[2].header("X-RequestDigest"),
            Some("0x1234,16 Oct 2026")
        );
    }

    #[tokio::test]
    async fn test_token_failures() {
        let request = UpdateRequest::new(SITE, PAGE, Layout::Article).unwrap();

        let missing = Arc::new(
            InMemClient::new()
                .with_response("GET", FILE_URL, 200, "{}")
                .with_response("POST", CONTEXT_URL, 200, r#"{"WebFullUrl":"x"}"#),
        );
        let err = updater(&missing).update(&request).await.unwrap_err();
        assert_eq!(err.error_code(), "TOKEN_FETCH_FAILURE");
        assert_eq!(missing.count("POST", ITEM_URL).await, 0);

        let garbage = Arc::new(
            InMemClient::new()
                .with_response("GET", FILE_URL, 200, "{}")
                .with_response("POST", CONTEXT_URL, 200, "<html>"),
        );
        let err = updater(&garbage).update(&request).await.unwrap_err();
        assert_eq!(err.error_code(), "TOKEN_FETCH_FAILURE");

        let forbidden = Arc::new(
            InMemClient::new()
                .with_response("GET", FILE_URL, 200, "{}")
                .with_response("POST", CONTEXT_URL, 403, ""),
        );
        let err = updater(&forbidden).update(&request).await.unwrap_err();
        assert_eq!(err.error_code(), "TOKEN_FETCH_FAILURE");
        assert_eq!(err.user_message(), "Error occured while updating page layout");
    }

    #[tokio::test]
    async fn test_network_fault_on_update() {
        let client = Arc::new(
            InMemClient::new()
                .with_response("GET", FILE_URL, 200, "{}")
                .with_response("POST", CONTEXT_URL, 200, r#"{"FormDigestValue":"abc123"}"#)
                .with_failure("POST", ITEM_URL, "connection reset"),
        );
        let request = UpdateRequest::new(SITE, PAGE, Layout::Article).unwrap();
        let err = updater(&client).update(&request).await.unwrap_err();
        assert_eq!(err.error_code(), "NETWORK_FAULT");
        assert_eq!(err.user_message(), "Error occured while updating page layout");
    }

    #[tokio::test]
    async fn test_network_fault_on_token_fetch() {
        let client = Arc::new(
            InMemClient::new()
                .with_response("GET", FILE_URL, 200, "{}")
                .with_failure("POST", CONTEXT_URL, "connection refused")
                .with_response("POST", ITEM_URL, 200, ""),
        );
        let result = updater(&client).submit(SITE, PAGE, Layout::Article).await;
        assert_eq!(
            result,
            UpdateResult {
                success: false,
                message: "Error occured while updating page layout".to_string(),
            }
        );

        let request = UpdateRequest::new(SITE, PAGE, Layout::Article).unwrap();
        let err = updater(&client).update(&request).await.unwrap_err();
        assert_eq!(err.error_code(), "NETWORK_FAULT");
        assert_eq!(client.count("POST", CONTEXT_URL).await, 2);
        assert_eq!(client.count("POST", ITEM_URL).await, 0);
    }

    #[tokio::test]
    async fn test_phases() {
        let request = UpdateRequest::new(SITE, PAGE, Layout::Article).unwrap();

        let client = Arc::new(sharepoint(200, 200));
        let mut phases = Vec::new();
        updater(&client)
            .run(&request, &mut |phase| phases.push(phase))
            .await
            .unwrap();
        assert_eq!(
            phases,
            vec![
                UpdatePhase::Idle,
                UpdatePhase::CheckingExistence,
                UpdatePhase::FetchingToken,
                UpdatePhase::Updating,
                UpdatePhase::Succeeded,
            ]
        );

        let client = Arc::new(sharepoint(404, 200));
        let mut phases = Vec::new();
        let _ = updater(&client)
            .run(&request, &mut |phase| phases.push(phase))
            .await;
        assert_eq!(
            phases,
            vec![
                UpdatePhase::Idle,
                UpdatePhase::CheckingExistence,
                UpdatePhase::Failed
            ]
        );
        assert!(phases.last().unwrap().is_terminal());
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_calls() {
        let client = Arc::new(sharepoint(200, 200));
        let result = updater(&client)
            .submit("not a url", PAGE, Layout::Article)
            .await;
        assert!(!result.success);
        assert!(result.message.starts_with("Invalid request"));
        assert!(client.requests().await.is_empty());
    }
}
