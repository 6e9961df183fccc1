use std::time::Duration;

use favicon_engine::{find_favicon_urls, FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_returns_body_status_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/doc", server.uri());

    let output = fetcher.get(&url).await.expect("fetch ok");
    assert_eq!(output.status, 200);
    assert_eq!(output.metadata.final_url, url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(output.bytes, b"<html>ok</html>");
    assert_eq!(output.metadata.byte_len, 15);
}

#[tokio::test]
async fn fetcher_reports_error_status_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let output = fetcher
        .get(&format!("{}/missing", server.uri()))
        .await
        .expect("status is not an error");
    assert_eq!(output.status, 404);
    assert_eq!(output.bytes, b"not here");
}

#[tokio::test]
async fn fetcher_follows_redirects_and_exposes_final_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old.ico"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", "/assets/new.ico"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/assets/new.ico"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 0, 1, 0]))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let output = fetcher
        .get(&format!("{}/old.ico", server.uri()))
        .await
        .unwrap();
    assert_eq!(output.status, 200);
    assert_eq!(output.metadata.final_url, format!("{}/assets/new.ico", server.uri()));
    assert_eq!(output.metadata.redirect_count, 1);
}

#[tokio::test]
async fn fetcher_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher
        .get(&format!("{}/slow", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: Some(10),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher
        .get(&format!("{}/large", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn fetcher_rejects_unparsable_url() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = fetcher.get("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn not_found_page_is_still_scanned_for_icons() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            r#"<html><head><link rel="icon" href="/404.png"></head></html>"#,
            "text/html",
        ))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let urls = find_favicon_urls(&fetcher, &format!("{}/gone", server.uri()))
        .await
        .unwrap();
    assert_eq!(urls, vec![format!("{}/404.png", server.uri())]);
}

#[tokio::test]
async fn links_resolve_against_original_url_after_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start/"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/elsewhere/"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/elsewhere/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<link rel="icon" href="icon.png">"#,
        ))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let urls = find_favicon_urls(&fetcher, &format!("{}/start/", server.uri()))
        .await
        .unwrap();
    assert_eq!(urls, vec![format!("{}/start/icon.png", server.uri())]);
}

#[tokio::test]
async fn malformed_href_fails_the_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<link rel="icon" href="http://[nope/i.ico">"#,
        ))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = find_favicon_urls(&fetcher, &server.uri()).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::InvalidHref {
            href: "http://[nope/i.ico".to_string()
        }
    );
}

#[tokio::test]
async fn scheme_less_page_url_fails_before_any_request() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = find_favicon_urls(&fetcher, "example.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
