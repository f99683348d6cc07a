//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the shop and run the full
//! fetch, extract, filter and save cycle end-to-end.

use laptop_scout::config::{
    CacheConfig, Config, FilterConfig, OutputConfig, SelectorConfig, SiteConfig,
};
use laptop_scout::crawler::run_crawl;
use laptop_scout::{ScoutError, StopReason};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, dir: &Path, filter: FilterConfig) -> Config {
    Config {
        site: SiteConfig {
            base_url: format!("{}/", base_url),
            search_url: format!("{}/search?page={{page}}", base_url),
            user_agent: "Mozilla/5.0".to_string(),
            request_timeout_secs: 5,
        },
        cache: CacheConfig {
            directory: dir.join("cache").to_string_lossy().into_owned(),
            freshness_minutes: 60,
        },
        filter,
        output: OutputConfig {
            csv_path: dir.join("laptops.csv").to_string_lossy().into_owned(),
            flush_each_page: false,
        },
        selectors: SelectorConfig::default(),
    }
}

fn card(name: &str, cpu: &str, gpu: &str, price: Option<&str>) -> String {
    let price = price
        .map(|p| format!(r#"<a class="btn btn-success price">{}</a>"#, p))
        .unwrap_or_default();
    format!(
        r#"<div class="card product">
             <div class="p-y-10"><h3><a title="{name}" href="/laptop/{name}">{name}</a></h3></div>
             <ul class="specs">
               <li>15,6"</li><li>1920x1080</li><li>Windows 11</li><li>{cpu}</li>
               <li>{gpu}</li><li>16 GB</li><li>512 GB SSD</li>
             </ul>
             {price}
           </div>"#
    )
}

fn listing(cards: &[String]) -> String {
    format!(
        "<html><head><title>Search</title></head><body>{}</body></html>",
        cards.concat()
    )
}

/// Mounts a search page answering with `body`
async fn mount_page(server: &MockServer, page: u32, body: String, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Makes `page` redirect to the home page, which answers normally
async fn mount_redirect_home(server: &MockServer, page: u32) {
    let home = format!("{}/", server.uri());
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(302).insert_header("location", home.as_str()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Home</body></html>"))
        .mount(server)
        .await;
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open CSV");
    reader
        .records()
        .map(|r| {
            r.expect("Failed to read CSV row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn test_full_crawl_until_home_redirect() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page1 = listing(&[
        card("Aspire", "Ryzen 5", "RTX 3050", Some("999,00 â‚¬")),
        card("Nitro", "Core i7", "RTX 3050", Some("649,00 €")),
        card("NoPrice", "Core i5", "RTX 3050", None),
    ]);
    mount_page(&mock_server, 1, page1, 1).await;
    mount_redirect_home(&mock_server, 2).await;

    let config = create_test_config(&mock_server.uri(), dir.path(), FilterConfig::default());

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.stop_reason, Some(StopReason::RedirectedHome { page: 2 }));
    assert_eq!(report.pages_downloaded, 1);
    assert_eq!(report.pages_from_cache, 0);
    assert_eq!(report.cards_seen, 3);
    assert_eq!(report.cards_dropped, 1);
    assert_eq!(report.rows_saved, 2);

    let rows = read_rows(Path::new(&config.output.csv_path));
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        vec![
            "name",
            "link",
            "screen",
            "resolution",
            "os",
            "cpu",
            "gpu",
            "ram",
            "storage",
            "price",
            "date"
        ]
    );
    assert_eq!(rows[1][0], "Aspire");
    assert_eq!(rows[1][1], format!("{}/laptop/Aspire", mock_server.uri()));
    assert_eq!(rows[1][9], "999.00");
    assert_eq!(rows[2][0], "Nitro");
    assert_eq!(rows[2][9], "649.00");
    assert_eq!(rows[2][10].len(), "2024-01-01".len());
}

#[tokio::test]
async fn test_cache_holds_fetched_pages() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page1 = listing(&[card("Aspire", "Ryzen 5", "RTX 3050", Some("500,00 €"))]);
    let page2 = listing(&[card("Swift", "Core i5", "RTX 3050", Some("700,00 €"))]);
    mount_page(&mock_server, 1, page1.clone(), 1).await;
    mount_page(&mock_server, 2, page2.clone(), 1).await;
    mount_redirect_home(&mock_server, 3).await;

    let config = create_test_config(&mock_server.uri(), dir.path(), FilterConfig::default());
    run_crawl(&config).await.expect("Crawl failed");

    let cache_dir = dir.path().join("cache");
    assert_eq!(
        std::fs::read_to_string(cache_dir.join("page_1.html")).unwrap(),
        page1
    );
    assert_eq!(
        std::fs::read_to_string(cache_dir.join("page_2.html")).unwrap(),
        page2
    );
    // The redirect is never cached
    assert!(!cache_dir.join("page_3.html").exists());
    assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 2);
}

#[tokio::test]
async fn test_second_run_uses_cache_and_appends() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page1 = listing(&[
        card("Aspire", "Ryzen 5", "RTX 3050", Some("500,00 €")),
        card("Nitro", "Core i7", "RTX 3050", Some("800,00 €")),
    ]);
    // Only one download is allowed across both runs
    mount_page(&mock_server, 1, page1, 1).await;
    mount_redirect_home(&mock_server, 2).await;

    let config = create_test_config(&mock_server.uri(), dir.path(), FilterConfig::default());

    let first = run_crawl(&config).await.expect("First crawl failed");
    assert_eq!(first.pages_downloaded, 1);

    let second = run_crawl(&config).await.expect("Second crawl failed");
    assert_eq!(second.pages_downloaded, 0);
    assert_eq!(second.pages_from_cache, 1);
    assert_eq!(second.rows_saved, 2);

    let rows = read_rows(Path::new(&config.output.csv_path));
    assert_eq!(rows.len(), 5);
    assert_eq!(rows.iter().filter(|r| r[0] == "name").count(), 1);
    assert_eq!(rows[1][..10], rows[3][..10]);
    assert_eq!(rows[2][..10], rows[4][..10]);
}

#[tokio::test]
async fn test_gpu_and_price_filter() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page1 = listing(&[
        card("Match", "Ryzen 5", "NVIDIA GeForce RTX 3050", Some("1000,00 €")),
        card("WrongGpu", "Ryzen 5", "NVIDIA GeForce RTX 4060", Some("900,00 €")),
        card("TooExpensive", "Ryzen 7", "NVIDIA GeForce RTX 3050", Some("1000,01 €")),
    ]);
    mount_page(&mock_server, 1, page1, 1).await;
    mount_page(&mock_server, 2, listing(&[]), 1).await;

    let config = create_test_config(
        &mock_server.uri(),
        dir.path(),
        FilterConfig {
            target_gpu: "RTX 3050".to_string(),
            target_cpu: String::new(),
            max_price: 1000.0,
        },
    );

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.stop_reason, Some(StopReason::NoCards { page: 2 }));
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].name, "Match");
    assert_eq!(report.records[0].price, 1000.0);
    assert_eq!(report.rejections.gpu_mismatch, 1);
    assert_eq!(report.rejections.over_budget, 1);
    assert_eq!(report.rows_saved, 1);
}

#[tokio::test]
async fn test_empty_first_page_saves_nothing() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        1,
        "<html><body><p>Keine Produkte gefunden</p></body></html>".to_string(),
        1,
    )
    .await;

    let config = create_test_config(&mock_server.uri(), dir.path(), FilterConfig::default());
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.stop_reason, Some(StopReason::NoCards { page: 1 }));
    assert_eq!(report.pages_with_products(), 0);
    assert_eq!(report.rows_saved, 0);
    assert!(!Path::new(&config.output.csv_path).exists());
}

#[tokio::test]
async fn test_server_error_aborts_run() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        1,
        listing(&[card("Aspire", "Ryzen 5", "RTX 3050", Some("500,00 €"))]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), dir.path(), FilterConfig::default());
    let result = run_crawl(&config).await;

    assert!(matches!(
        result,
        Err(ScoutError::HttpStatus { status: 500, .. })
    ));
    // Matches are only written at the end of a successful run
    assert!(!Path::new(&config.output.csv_path).exists());
}

#[tokio::test]
async fn test_flush_each_page_keeps_rows_on_failure() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        1,
        listing(&[card("Aspire", "Ryzen 5", "RTX 3050", Some("500,00 €"))]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), dir.path(), FilterConfig::default());
    config.output.flush_each_page = true;

    let result = run_crawl(&config).await;
    assert!(result.is_err());

    let rows = read_rows(Path::new(&config.output.csv_path));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "Aspire");
}
