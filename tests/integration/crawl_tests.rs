//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end: listing page, detail pages, CSV file.

use cast_harvest::config::Config;
use cast_harvest::crawler::{run_crawl, Coordinator};
use cast_harvest::output::CSV_HEADER;
use cast_harvest::Termination;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, csv_path: &str) -> Config {
    let mut config = Config::default();
    config.crawler.seed_page_url = format!("{}/chart/top/?ref_=nv_mv_250", base_url);
    config.crawler.max_concurrent_pages_open = 2;
    config.crawler.ready_timeout_ms = 2000;
    config.fetcher.user_agent = "TestBot/1.0".to_string();
    config.output.csv_path = csv_path.to_string();
    config
}

fn listing_html(titles: &[(&str, &str)]) -> String {
    let entries: String = titles
        .iter()
        .map(|(href, name)| {
            format!(
                r#"<li><div class="ipc-title ipc-title--base ipc-title--title cli-title">
                <a href="{}" class="ipc-title-link-wrapper"><h3 class="ipc-title__text">{}</h3></a>
                </div></li>"#,
                href, name
            )
        })
        .collect();
    format!(
        r#"<html><head><title>Top 250</title></head><body><ul>{}</ul></body></html>"#,
        entries
    )
}

fn cast_row(id: &str, name: &str, role: &str) -> String {
    format!(
        r#"<tr class="odd">
        <td class="primary_photo"><a href="/name/{id}/"><img alt="{name}"></a></td>
        <td><a href="/name/{id}/?ref_=ttfc_fc_cl_t1"> {name}
        </a></td>
        <td class="ellipsis"> ... </td>
        <td class="character"><a href="/title/characters/{id}">{role}</a></td>
        </tr>"#,
        id = id,
        name = name,
        role = role
    )
}

fn cast_page(rows: &[String]) -> String {
    format!(
        r#"<html><head><title>Full Cast</title></head><body>
        <table class="cast_list">
        <tr><td colspan="4" class="castlist_label">Cast overview, first billed only:</td></tr>
        {}
        </table></body></html>"#,
        rows.concat()
    )
}

fn rest_of_cast_label() -> String {
    r#"<tr><td colspan="4" class="castlist_label">Rest of cast listed alphabetically:</td></tr>"#
        .to_string()
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

async fn mount_listing(server: &MockServer, titles: &[(&str, &str)]) {
    Mock::given(method("GET"))
        .and(path("/chart/top/"))
        .respond_with(html(listing_html(titles)))
        .mount(server)
        .await;
}

fn read_csv_lines(path: &str) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("CSV file was not written")
        .lines()
        .map(str::to_string)
        .collect()
}

fn csv_path(dir: &TempDir) -> String {
    dir.path().join("cast.csv").to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_full_crawl_writes_csv() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        &[
            ("/title/tt0111161/?ref_=chttp_t_1", "1. The Shawshank Redemption"),
            ("/title/tt0068646/?ref_=chttp_t_2", "2. The Godfather"),
        ],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/title/tt0111161/fullcredits/"))
        .respond_with(html(cast_page(&[
            cast_row("nm0000209", "Tim Robbins", "Andy Dufresne"),
            cast_row("nm0000151", "Morgan Freeman", "Ellis Boyd 'Red' Redding"),
            rest_of_cast_label(),
            cast_row("nm0000001", "Not Included", "Extra"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt0068646/fullcredits/"))
        .respond_with(html(cast_page(&[cast_row(
            "nm0000008",
            "Marlon Brando",
            "Don Vito Corleone",
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv = csv_path(&dir);
    let config = create_test_config(&base_url, &csv);

    let summary = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(summary.seeds_discovered, 2);
    assert_eq!(summary.items_scheduled, 2);
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.count(Termination::SentinelReached), 1);
    assert_eq!(summary.count(Termination::Exhausted), 1);

    let lines = read_csv_lines(&csv);
    assert_eq!(lines[0], CSV_HEADER.join(","));
    assert_eq!(lines.len(), 4);
    assert!(lines.contains(&format!(
        "Tim Robbins,{}/name/nm0000209/?ref_=ttfc_fc_cl_t1,Andy Dufresne",
        base_url
    )));
    assert!(lines.contains(&format!(
        "Marlon Brando,{}/name/nm0000008/?ref_=ttfc_fc_cl_t1,Don Vito Corleone",
        base_url
    )));
    assert!(lines.iter().any(|l| l.starts_with("Morgan Freeman,")));
    assert!(!lines.iter().any(|l| l.contains("Not Included")));
}

#[tokio::test]
async fn test_slow_detail_page_is_isolated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        &[("/title/tt1/", "1. Fast"), ("/title/tt2/", "2. Slow")],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/title/tt1/fullcredits/"))
        .respond_with(html(cast_page(&[
            cast_row("nm1", "Alice", "Hero"),
            rest_of_cast_label(),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt2/fullcredits/"))
        .respond_with(
            html(cast_page(&[cast_row("nm2", "Bob", "Villain")]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, &csv_path(&dir));
    config.crawler.ready_timeout_ms = 500;

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await;

    let names: Vec<&str> = report
        .results
        .records()
        .iter()
        .map(|a| a.full_name.as_str())
        .collect();
    assert_eq!(names, ["Alice"]);
    assert_eq!(report.summary.count(Termination::SentinelReached), 1);
    assert_eq!(report.summary.count(Termination::TimedOut), 1);
}

#[tokio::test]
async fn test_missing_detail_page_is_fetcher_fault() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        &[("/title/tt1/", "1. Present"), ("/title/tt404/", "2. Missing")],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/title/tt1/fullcredits/"))
        .respond_with(html(cast_page(&[cast_row("nm1", "Alice", "Hero")])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt404/fullcredits/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv = csv_path(&dir);
    let config = create_test_config(&base_url, &csv);

    let summary = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(summary.total_records, 1);
    assert_eq!(summary.count(Termination::FetcherFault), 1);
    assert_eq!(read_csv_lines(&csv).len(), 2);
}

#[tokio::test]
async fn test_empty_listing_writes_header_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(&mock_server, &[]).await;

    let dir = TempDir::new().unwrap();
    let csv = csv_path(&dir);
    let config = create_test_config(&base_url, &csv);

    let summary = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(summary.seeds_discovered, 0);
    assert!(summary.discovery_error.is_some());
    assert_eq!(read_csv_lines(&csv), vec![CSV_HEADER.join(",")]);
}

#[tokio::test]
async fn test_limit_and_duplicates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        &[
            ("/title/tt1/?ref_=chttp_t_1", "1. Listed Twice"),
            ("/title/tt1/?ref_=chttp_t_1", "2. Listed Twice"),
            ("/title/tt3/", "3. Beyond Limit"),
        ],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/title/tt1/fullcredits/"))
        .respond_with(html(cast_page(&[cast_row("nm1", "Alice", "Hero")])))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt3/fullcredits/"))
        .respond_with(html(cast_page(&[cast_row("nm3", "Carol", "Extra")])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, &csv_path(&dir));
    config.crawler.max_items = 2;

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await;

    assert_eq!(report.summary.seeds_discovered, 3);
    assert_eq!(report.summary.items_scheduled, 2);
    assert_eq!(report.results.len(), 2);
    assert!(report
        .results
        .records()
        .iter()
        .all(|a| a.full_name == "Alice"));

    // Wiremock verifies the expect() counts when mock_server drops
}
