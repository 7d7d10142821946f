// Property: path-bearing inputs never escape the PDF directory, proxy
// targets off the whitelist are always refused, and a resolved URL always
// has the `http://localhost:{PORT}/api/pdfs/{documentId}.pdf` shape.

mod common;

use axum::http::StatusCode;
use proptest::prelude::*;
use serde_json::json;
use tokio::runtime::Runtime;
use tower::ServiceExt;

use common::{get, post_json, response_json, setup_test_app};

/// Filenames that contain `..` or an encoded path separator
fn unsafe_filename_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{0,6}\\.\\.[a-z0-9.]{0,6}",
        "[a-z0-9]{1,6}%2[Ff][a-z0-9]{1,6}\\.pdf",
        "[a-z0-9]{1,6}%5[Cc][a-z0-9]{1,6}\\.pdf",
    ]
}

/// Absolute URLs whose host is not on the default whitelist, some of them
/// carrying a whitelisted name somewhere else in the URL
fn foreign_url_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["http", "https"]),
        "[a-z]{3,10}\\.(com|example|net)",
        "[a-z0-9]{0,8}",
        prop::sample::select(vec!["", "?u=localhost", "/127.0.0.1", "#localhost"]),
    )
        .prop_map(|(scheme, host, file, trailer)| {
            format!("{}://{}/{}.pdf{}", scheme, host, file, trailer)
        })
}

fn document_id_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,32}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unsafe_filename_is_rejected(filename in unsafe_filename_strategy()) {
        let rt = Runtime::new().unwrap();

        let status = rt.block_on(async {
            let t = setup_test_app();
            let uri = format!("/api/pdfs/{}", filename);
            t.app.oneshot(get(&uri)).await.unwrap().status()
        });

        prop_assert_eq!(status, StatusCode::BAD_REQUEST, "filename {}", filename);
    }

    #[test]
    fn prop_foreign_host_is_forbidden(url in foreign_url_strategy()) {
        let rt = Runtime::new().unwrap();

        let status = rt.block_on(async {
            let t = setup_test_app();
            let uri = format!("/api/proxy-pdf?url={}", url.replace('?', "%3F").replace('#', "%23"));
            t.app.oneshot(get(&uri)).await.unwrap().status()
        });

        prop_assert_eq!(status, StatusCode::FORBIDDEN, "url {}", url);
    }

    #[test]
    fn prop_resolved_url_shape(document_id in document_id_strategy()) {
        let rt = Runtime::new().unwrap();

        let (status, body) = rt.block_on(async {
            let t = setup_test_app();
            t.add_pdf(&format!("{}.pdf", document_id), b"%PDF-1.4");

            let payload = json!({"documentId": document_id, "query": ""});
            let response = t
                .app
                .oneshot(post_json("/api/get-pdf-url", payload.to_string()))
                .await
                .unwrap();
            let status = response.status();
            (status, response_json(response.into_body()).await)
        });

        prop_assert_eq!(status, StatusCode::OK);
        prop_assert_eq!(
            body["url"].as_str().unwrap_or_default(),
            format!("http://localhost:8006/api/pdfs/{}.pdf", document_id)
        );
    }
}
