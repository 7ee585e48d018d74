//! Integration tests for TavilyKit using wiremock

use serde_json::json;
use std::time::Duration;
use tavilykit::{
    ApiClient, CancellationToken, ClientConfig, CrawlRequest, CrawlScope, ExtractRequest,
    MapRequest, SearchDepth, SearchRequest, SearchTopic, TavilyError, Tool,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("tvly-test-key").base_address(server.uri())
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&config(server)).unwrap()
}

#[tokio::test]
async fn test_usage_sends_bearer_get() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/usage"))
        .and(header("authorization", "Bearer tvly-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": {"usage": 12, "limit": 1000},
            "account": {"current_plan": "Researcher", "plan_usage": 12, "plan_limit": 1000}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let usage = client(&mock_server)
        .usage(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(usage.key_usage(), Some(12.0));
    assert_eq!(usage.plan_name(), Some("Researcher"));
    assert_eq!(usage.paygo_usage(), None);
}

#[tokio::test]
async fn test_search_posts_snake_case_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("authorization", "Bearer tvly-test-key"))
        .and(body_partial_json(json!({
            "query": "rust async",
            "search_depth": "advanced",
            "max_results": 5,
            "time_range": "week",
            "include_domains": ["rust-lang.org"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "rust async",
            "answer": "Use tokio.",
            "images": [
                "https://img.com/a.png",
                {"URL": "https://img.com/b.png", "Description": " Ferris "}
            ],
            "results": [{
                "title": "Async Book",
                "url": "https://rust-lang.github.io/async-book/",
                "content": "Asynchronous programming in Rust",
                "raw_content": null,
                "score": 0.91
            }],
            "response_time": 0.8
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = SearchRequest::new("rust async")
        .search_depth(SearchDepth::Advanced)
        .max_results(5)
        .time_range("w".parse().unwrap())
        .include_domain("rust-lang.org");

    let response = client(&mock_server)
        .search(&request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.answer.as_deref(), Some("Use tokio."));
    assert_eq!(response.images.len(), 2);
    assert_eq!(response.images[0].description, None);
    assert_eq!(response.images[1].url, "https://img.com/b.png");
    assert_eq!(response.images[1].description(), Some("Ferris"));
    assert_eq!(response.results[0].score, Some(0.91));
}

#[tokio::test]
async fn test_search_tool_renders_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"topic": "general", "country": "france"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "elections",
            "images": [{"url": "https://img.com/a.png", "description": "Ballot"}],
            "results": [{
                "title": "Result",
                "url": "https://news.fr/1",
                "content": "Snippet",
                "favicon": "https://news.fr/favicon.ico"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tool = Tool::from_config(config(&mock_server)).unwrap();
    let text = tool
        .call(
            "search",
            json!({"query": "elections", "topic": "news", "country": "france"}),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        text,
        "Detailed Results:\n\
         \nTitle: Result\n\
         URL: https://news.fr/1\n\
         Content: Snippet\n\
         Favicon: https://news.fr/favicon.ico\n\
         \nImages:\n\
         \n[1] URL: https://img.com/a.png\n   Description: Ballot"
    );
}

#[tokio::test]
async fn test_extract_tool() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/extract"))
        .and(body_partial_json(json!({
            "urls": ["https://a.com"],
            "extract_depth": "basic",
            "format": "markdown",
            "include_images": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "url": "https://a.com",
                "raw_content": "# A",
                "images": ["https://a.com/logo.png"]
            }],
            "failed_results": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tool = Tool::from_config(config(&mock_server)).unwrap();
    let text = tool
        .extract(
            ExtractRequest::new(["https://a.com"]).include_images(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        text,
        "Detailed Results:\nURL: https://a.com\nRaw Content: # A\n\n\
         Images:\n\n[1] URL: https://a.com/logo.png"
    );
}

#[tokio::test]
async fn test_crawl_tool_truncates_preview() {
    let mock_server = MockServer::start().await;
    let long = "x".repeat(250);

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(body_partial_json(json!({
            "url": "https://docs.rs",
            "max_depth": 2,
            "limit": 10,
            "instructions": "only API docs"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "base_url": "https://docs.rs",
            "results": [
                {"url": "https://docs.rs/a", "raw_content": long},
                {"url": "https://docs.rs/b", "raw_content": "short"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CrawlRequest::new("https://docs.rs").scope(
        CrawlScope::default()
            .max_depth(2)
            .limit(10)
            .instructions("only API docs"),
    );
    let tool = Tool::from_config(config(&mock_server)).unwrap();
    let text = tool.crawl(request, &CancellationToken::new()).await.unwrap();

    assert!(text.starts_with("Crawl Results:\nBase URL: https://docs.rs\n\nCrawled Pages:"));
    assert!(text.contains(&format!("Content: {}...", "x".repeat(200))));
    assert!(text.contains("[2] URL: https://docs.rs/b\nContent: short"));
}

#[tokio::test]
async fn test_map_tool_numbers_urls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/map"))
        .and(body_partial_json(json!({"url": "https://docs.rs", "max_breadth": 20})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "base_url": "https://docs.rs",
            "results": ["https://docs.rs/a", "https://docs.rs/b", "https://docs.rs/c"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tool = Tool::from_config(config(&mock_server)).unwrap();
    let text = tool
        .map(MapRequest::new("https://docs.rs"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(text.ends_with(
        "Mapped Pages:\n\n[1] URL: https://docs.rs/a\n\n\
         [2] URL: https://docs.rs/b\n\n[3] URL: https://docs.rs/c"
    ));
}

#[tokio::test]
async fn test_server_error_on_every_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let token = CancellationToken::new();

    let errors = vec![
        client.usage(&token).await.unwrap_err(),
        client
            .search(&SearchRequest::new("q"), &token)
            .await
            .unwrap_err(),
        client
            .extract(&ExtractRequest::new(["https://a.com"]), &token)
            .await
            .unwrap_err(),
        client
            .crawl(&CrawlRequest::new("https://a.com"), &token)
            .await
            .unwrap_err(),
        client
            .map(&MapRequest::new("https://a.com"), &token)
            .await
            .unwrap_err(),
    ];

    let endpoints: Vec<&str> = errors
        .iter()
        .map(|err| match err {
            TavilyError::Status { endpoint, status } => {
                assert_eq!(*status, 500);
                *endpoint
            }
            other => panic!("expected status error, got {other:?}"),
        })
        .collect();
    assert_eq!(endpoints, vec!["usage", "search", "extract", "crawl", "map"]);
}

#[tokio::test]
async fn test_client_error_status_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "bad key"})))
        .mount(&mock_server)
        .await;

    let tool = Tool::from_config(config(&mock_server)).unwrap();
    let err = tool
        .search(SearchRequest::new("q"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/map"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .map(&MapRequest::new("https://a.com"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TavilyError::Decode { endpoint: "map", .. }));
}

#[tokio::test]
async fn test_bad_image_element_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "q",
            "images": ["https://img.com/a.png", 7],
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .search(&SearchRequest::new("q"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TavilyError::Decode { endpoint: "search", .. }));
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"base_url": "https://a.com", "results": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let tool = Tool::from_config(config(&mock_server)).unwrap();
    let started = std::time::Instant::now();
    let result = tool.crawl(CrawlRequest::new("https://a.com"), &token).await;

    assert!(matches!(result, Err(TavilyError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_base_address_with_path_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new("k").base_address(format!("{}/v1", mock_server.uri()));
    let usage = ApiClient::new(&config)
        .unwrap()
        .usage(&CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(usage.key_limit(), None);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let config = ClientConfig::new("k").base_address("http://127.0.0.1:1");
    let err = ApiClient::new(&config)
        .unwrap()
        .usage(&CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TavilyError::ConnectError(_) | TavilyError::RequestError(_)
    ));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_news_topic_passes_through_without_country() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"topic": "news", "days": 7})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"query": "q", "results": []})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let tool = Tool::from_config(config(&mock_server)).unwrap();
    let text = tool
        .search(
            SearchRequest::new("q").topic(SearchTopic::News).days(7),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(text, "Detailed Results:");
}
