//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use std::collections::HashSet;
use webmap::config::Config;
use webmap::crawler::{CrawlReport, Crawler};
use webmap::output::CrawlStatistics;
use webmap::state::PageState;
use webmap::WebmapError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a crawler with default settings and an optional fetch cap
fn create_crawler(max_concurrent_fetches: Option<usize>) -> Crawler {
    let mut config = Config::default();
    config.user_agent.crawler_name = "TestBot".to_string();
    config.crawler.request_timeout_secs = 5;
    config.crawler.max_concurrent_fetches = max_concurrent_fetches;
    Crawler::new(&config).expect("Failed to build crawler")
}

/// An HTML response with an explicit Content-Type
fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

/// Mounts a GET handler for `route` that must be hit exactly `times` times
async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

async fn crawl(server: &MockServer, depth: u32) -> CrawlReport {
    create_crawler(None)
        .crawl(&format!("{}/", server.uri()), depth)
        .await
        .expect("Crawl failed")
}

/// Every node identity in the tree, asserting none repeats
fn unique_identities(report: &CrawlReport) -> HashSet<String> {
    let mut seen = HashSet::new();
    for (_, page) in report.root.walk() {
        assert!(
            seen.insert(page.url.to_string()),
            "{} appears more than once in the tree",
            page.url
        );
    }
    seen
}

#[tokio::test]
async fn test_duplicate_href_and_static_at_depth_one() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html(
            r#"<html><body>
            <a href="/about">About</a>
            <a href="/about">About again</a>
            <img src="/logo.png">
            </body></html>"#,
        ),
        1,
    )
    .await;
    // Depth is exhausted at /about, so it must never be requested
    mount_page(&server, "/about", html("<html></html>"), 0).await;
    mount_page(&server, "/logo.png", ResponseTemplate::new(200), 0).await;

    let report = crawl(&server, 1).await;
    let root = &report.root;

    assert_eq!(root.state, PageState::Crawled);
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].url.as_str(), format!("{}/about", base));
    assert_eq!(root.children[0].state, PageState::DepthExhausted);
    assert!(root.children[0].is_leaf());

    assert_eq!(root.statics.len(), 1);
    assert_eq!(root.statics[0].as_str(), format!("{}/logo.png", base));

    assert_eq!(report.pages_claimed, 2);
}

#[tokio::test]
async fn test_non_html_seed_is_a_leaf() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        ResponseTemplate::new(200).set_body_raw(
            r#"{"links": ["<a href=\"/hidden\">"]}"#.to_string(),
            "application/json",
        ),
        1,
    )
    .await;
    mount_page(&server, "/hidden", html(""), 0).await;

    let report = crawl(&server, 3).await;

    assert_eq!(report.root.state, PageState::ContentMismatch);
    assert!(report.root.children.is_empty());
    assert!(report.root.statics.is_empty());
    assert_eq!(report.pages_claimed, 1);
}

#[tokio::test]
async fn test_stylesheet_link_is_claimed_but_not_parsed() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(r#"<html><head><link rel="stylesheet" href="/site.css"></head></html>"#),
        1,
    )
    .await;
    mount_page(
        &server,
        "/site.css",
        ResponseTemplate::new(200)
            .set_body_raw("body { background: url(/bg.png); }".to_string(), "text/css"),
        1,
    )
    .await;

    let report = crawl(&server, 3).await;

    assert_eq!(report.root.children.len(), 1);
    let css = &report.root.children[0];
    assert_eq!(css.state, PageState::ContentMismatch);
    assert!(css.is_leaf());
    assert!(css.statics.is_empty());
}

#[tokio::test]
async fn test_external_links_dropped_external_statics_kept() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(
            r#"<html><head>
            <script src="https://cdn.invalid/lib.js"></script>
            </head><body>
            <a href="https://elsewhere.invalid/page">External</a>
            <a href="mailto:someone@example.com">Mail</a>
            <img src="//images.invalid/banner.png">
            </body></html>"#,
        ),
        1,
    )
    .await;

    let report = crawl(&server, 2).await;
    let root = &report.root;

    assert!(root.children.is_empty());
    assert_eq!(
        root.static_urls(),
        HashSet::from([
            "https://cdn.invalid/lib.js",
            "http://images.invalid/banner.png"
        ])
    );
    assert_eq!(report.pages_claimed, 1);

    let stats = CrawlStatistics::from_report(&report);
    assert_eq!(stats.cross_host_statics, 2);
}

#[tokio::test]
async fn test_depth_bound() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html(r#"<a href="/1">1</a>"#), 1).await;
    mount_page(&server, "/1", html(r#"<a href="/2">2</a>"#), 1).await;
    mount_page(&server, "/2", html(r#"<a href="/3">3</a>"#), 0).await;
    mount_page(&server, "/3", html(""), 0).await;

    let report = crawl(&server, 2).await;

    for (distance, page) in report.root.walk() {
        assert!(
            distance <= 2,
            "{} found at distance {}",
            page.url,
            distance
        );
    }
    assert_eq!(report.root.height(), 2);

    let deepest = report
        .root
        .find(&format!("{}/2", server.uri()))
        .expect("/2 should be in the tree");
    assert_eq!(deepest.state, PageState::DepthExhausted);
    assert!(report.root.find(&format!("{}/3", server.uri())).is_none());
}

#[tokio::test]
async fn test_each_page_crawled_once_in_cyclic_site() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(r#"<a href="/a">A</a><a href="/b">B</a><a href="/">Home</a>"#),
        1,
    )
    .await;
    mount_page(
        &server,
        "/a",
        html(r#"<a href="/b">B</a><a href="/">Home</a><a href="/a">Self</a>"#),
        1,
    )
    .await;
    mount_page(
        &server,
        "/b",
        html(r#"<a href="/a">A</a><a href="/">Home</a>"#),
        1,
    )
    .await;

    let report = crawl(&server, 10).await;

    let identities = unique_identities(&report);
    assert_eq!(identities.len(), 3);
    assert_eq!(report.pages_claimed, 3);
    assert_eq!(report.root.page_count(), 3);
}

#[tokio::test]
async fn test_children_share_parent_host() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(r#"<a href="/docs">Docs</a><a href="http://other.invalid/">Other</a>"#),
        1,
    )
    .await;
    mount_page(&server, "/docs", html(r#"<a href="/docs/intro">Intro</a>"#), 1).await;
    mount_page(&server, "/docs/intro", html(""), 1).await;

    let report = crawl(&server, 3).await;

    for (_, page) in report.root.walk() {
        for child in &page.children {
            assert_eq!(child.url.host_str(), page.url.host_str());
            assert_eq!(child.url.port(), page.url.port());
        }
    }
    assert_eq!(report.root.page_count(), 3);
}

#[tokio::test]
async fn test_fragments_collapse_to_one_child() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html(r##"<a href="/a#x">X</a><a href="/a#y">Y</a><a href="#top">Top</a>"##),
        1,
    )
    .await;
    mount_page(&server, "/a", html(""), 1).await;

    let report = crawl(&server, 2).await;

    assert_eq!(
        report.root.child_urls(),
        HashSet::from([format!("{}/a", base).as_str()])
    );
}

#[tokio::test]
async fn test_statics_recorded_per_page() {
    let server = MockServer::start().await;
    let logo = format!("{}/logo.png", server.uri());

    mount_page(
        &server,
        "/",
        html(r#"<img src="/logo.png"><a href="/a">A</a>"#),
        1,
    )
    .await;
    mount_page(&server, "/a", html(r#"<img src="../logo.png#hero">"#), 1).await;

    let report = crawl(&server, 2).await;

    assert_eq!(report.root.static_urls(), HashSet::from([logo.as_str()]));
    assert_eq!(report.root.children.len(), 1);
    assert_eq!(
        report.root.children[0].static_urls(),
        HashSet::from([logo.as_str()])
    );
}

#[tokio::test]
async fn test_status_code_not_inspected() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        ResponseTemplate::new(404)
            .set_body_raw(r#"<a href="/found">Found</a>"#.to_string(), "text/html"),
        1,
    )
    .await;
    mount_page(&server, "/found", html(""), 1).await;

    let report = crawl(&server, 2).await;

    assert_eq!(report.root.state, PageState::Crawled);
    assert_eq!(report.root.children.len(), 1);
}

#[tokio::test]
async fn test_bad_reference_only_drops_itself() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(r#"<a href="http://[::1">Broken</a><img src="http://x:99999/a.png"><a href="/ok">OK</a>"#),
        1,
    )
    .await;
    mount_page(&server, "/ok", html(""), 1).await;

    let report = crawl(&server, 2).await;

    assert_eq!(report.root.state, PageState::Crawled);
    assert_eq!(report.root.children.len(), 1);
    assert!(report.root.statics.is_empty());
}

#[tokio::test]
async fn test_unreachable_seed_degrades_to_leaf() {
    // Reserve a port, then free it so connections are refused
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let report = create_crawler(None)
        .crawl(&format!("http://127.0.0.1:{}/", port), 3)
        .await
        .expect("Fetch failures must not fail the crawl");

    assert_eq!(report.root.state, PageState::FetchFailed);
    assert!(report.root.is_leaf());
    assert_eq!(report.pages_claimed, 1);
}

#[tokio::test]
async fn test_malformed_seed_is_fatal() {
    let result = create_crawler(None).crawl("not a url", 3).await;
    assert!(matches!(result, Err(WebmapError::SeedParse { .. })));
}

#[tokio::test]
async fn test_concurrency_cap_still_completes() {
    let server = MockServer::start().await;

    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", html(&links), 1).await;
    for i in 0..10 {
        mount_page(
            &server,
            &format!("/p{}", i),
            html(r#"<a href="/">Home</a><img src="/shared.png">"#),
            1,
        )
        .await;
    }

    let report = create_crawler(Some(2))
        .crawl(&format!("{}/", server.uri()), 3)
        .await
        .expect("Crawl failed");

    assert_eq!(report.root.children.len(), 10);
    assert_eq!(report.pages_claimed, 11);
    for child in &report.root.children {
        assert_eq!(child.state, PageState::Crawled);
        assert_eq!(child.statics.len(), 1);
    }
    unique_identities(&report);
}

#[tokio::test]
async fn test_wide_site_terminates() {
    let server = MockServer::start().await;

    // Every page links to every other page
    let all_links: String = (0..20)
        .map(|i| format!(r#"<a href="/n{}">{}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", html(&all_links), 1).await;
    for i in 0..20 {
        mount_page(&server, &format!("/n{}", i), html(&all_links), 1).await;
    }

    let report = tokio::time::timeout(std::time::Duration::from_secs(30), crawl(&server, 5))
        .await
        .expect("crawl should reach global completion");

    assert_eq!(report.pages_claimed, 21);
    assert_eq!(unique_identities(&report).len(), 21);
}
