//! Integration tests for the crawler
//!
//! These tests use wiremock to serve result pages with an embedded object
//! graph and run the real HTTP fetcher and crawl loop end-to-end.

use jobgraph::config::{Config, CrawlerConfig, HttpConfig, SearchConfig, SiteConfig};
use jobgraph::crawler::{crawl, CrawlController, HttpFetcher, StopReason};
use jobgraph::state::CrawlState;
use serde_json::{json, Map, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, results_wanted: usize, max_pages: u32) -> Config {
    Config {
        search: SearchConfig {
            term: "Rust Engineer".to_string(),
            location: None,
            results_wanted,
            max_pages,
        },
        site: SiteConfig {
            base_url: base_url.to_string(),
            ..SiteConfig::default()
        },
        crawler: CrawlerConfig {
            min_delay_ms: 0,
            max_delay_ms: 0,
        },
        http: HttpConfig {
            user_agent: Some("JobgraphTest/1.0".to_string()),
            timeout_secs: 5,
            max_retries: 1,
            retry_delay_ms: 0,
            ..HttpConfig::default()
        },
        ..Config::default()
    }
}

/// Renders a result page whose graph holds one listing per id
///
/// Listings point at their company through `__ref` pointers.
fn result_page(ids: &[&str]) -> String {
    let mut data = Map::new();
    for id in ids {
        data.insert(
            format!("StartupResult:{}", id),
            json!({
                "id": id,
                "title": format!("Rust Engineer {}", id),
                "slug": format!("rust-engineer-{}", id),
                "compensation": "$120k – $150k",
                "jobType": "full_time",
                "remote": true,
                "startup": {"__ref": format!("Startup:{}", id)}
            }),
        );
        data.insert(
            format!("Startup:{}", id),
            json!({"name": format!("Ferrous {}", id), "slug": format!("ferrous-{}", id)}),
        );
    }

    let state = json!({
        "props": {"pageProps": {"apolloState": {"data": Value::Object(data)}}}
    });

    format!(
        r#"<!DOCTYPE html><html><head><title>Jobs</title></head><body>
        <div id="__next"></div>
        <script id="__NEXT_DATA__" type="application/json">{}</script>
        </body></html>"#,
        state
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_paginates_until_results_wanted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Page-specific mocks go first so they win over the bare path mock
    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .and(query_param("page", "2"))
        .and(header("referer", format!("{}/role/rust-engineer", base_url).as_str()))
        .respond_with(html(result_page(&["4", "5", "6"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .and(query_param("page", "3"))
        .respond_with(html(result_page(&["7", "8", "9"])))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .and(header("user-agent", "JobgraphTest/1.0"))
        .respond_with(html(result_page(&["1", "2", "3"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 5, 10);
    let report = crawl(&config).await.expect("crawl failed");

    let ids: Vec<&str> = report.postings.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["wf-1", "wf-2", "wf-3", "wf-4", "wf-5"]);
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.stop_reason, StopReason::ResultsReached);

    let first = &report.postings[0];
    assert_eq!(first.title, "Rust Engineer 1");
    assert_eq!(first.company_name.as_deref(), Some("Ferrous 1"));
    assert_eq!(
        first.job_url,
        format!("{}/jobs/ferrous-1/rust-engineer-1", base_url)
    );
    assert_eq!(first.is_remote, Some(true));
    let compensation = first.compensation.as_ref().expect("missing compensation");
    assert_eq!(compensation.min_amount, 120_000.0);
    assert_eq!(compensation.max_amount, 150_000.0);
}

#[tokio::test]
async fn test_not_found_ends_crawl_with_partial_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .respond_with(html(result_page(&["1", "2"])))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 50, 10);
    let report = crawl(&config).await.expect("crawl failed");

    assert_eq!(report.postings.len(), 2);
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.stop_reason, StopReason::NotFound);
    assert_eq!(report.final_state, CrawlState::Done);
}

#[tokio::test]
async fn test_duplicate_listings_across_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .and(query_param("page", "2"))
        .respond_with(html(result_page(&["2", "3"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .respond_with(html(result_page(&["1", "2"])))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 50, 2);
    let report = crawl(&config).await.expect("crawl failed");

    let ids: Vec<&str> = report.postings.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["wf-1", "wf-2", "wf-3"]);
    assert_eq!(report.duplicates_skipped, 1);
    assert_eq!(report.stop_reason, StopReason::MaxPages);
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .respond_with(html(result_page(&["1"])))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 1, 10);
    let report = crawl(&config).await.expect("crawl failed");

    assert_eq!(report.postings.len(), 1);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.stop_reason, StopReason::ResultsReached);
}

#[tokio::test]
async fn test_persistent_server_error_stops_crawl() {
    let mock_server = MockServer::start().await;

    // One attempt plus one retry
    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 10, 10);
    let report = crawl(&config).await.expect("crawl failed");

    assert!(report.postings.is_empty());
    assert_eq!(report.stop_reason, StopReason::UnexpectedStatus(500));
}

#[tokio::test]
async fn test_page_without_embedded_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/role/rust-engineer"))
        .respond_with(html(
            "<html><body><h1>Please verify you are human</h1></body></html>".to_string(),
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 10, 10);
    let report = crawl(&config).await.expect("crawl failed");

    assert!(report.postings.is_empty());
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.stop_reason, StopReason::NoStructuredData);
}

#[tokio::test]
async fn test_location_search_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/role/l/rust-engineer/new-york"))
        .respond_with(html(result_page(&["1"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), 1, 10);
    config.search.location = Some("New York".to_string());

    let fetcher = HttpFetcher::new(&config.http).expect("failed to build fetcher");
    let controller = CrawlController::from_config(fetcher, &config);
    let report = controller
        .crawl(&config.search)
        .await
        .expect("crawl failed");

    assert_eq!(report.postings.len(), 1);
    assert_eq!(report.stop_reason, StopReason::ResultsReached);
}

#[tokio::test]
async fn test_unreachable_host_returns_transport_stop() {
    // Nothing listens on the discard port
    let config = create_test_config("http://127.0.0.1:9", 10, 10);
    let report = crawl(&config).await.expect("crawl failed");

    assert!(report.postings.is_empty());
    assert_eq!(report.pages_fetched, 0);
    assert_eq!(report.final_state, CrawlState::Error);
    assert!(matches!(report.stop_reason, StopReason::Transport(_)));
}
