//! HTTP source tests against wiremock servers.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use direction_trends::aggregate::SeriesLoader;
use direction_trends::config::Config;
use direction_trends::dashboard::Dashboard;
use direction_trends::error::SourceError;
use direction_trends::models::{Direction, SourceKind, YearRange};
use direction_trends::source::{
    ApiSource, ObjectStoreSource, SeriesSource, StaticIndexSource, build_source,
};

const RANGE: YearRange = YearRange::new(2010, 2012);

fn rl() -> Direction {
    Direction::new("rl")
}

fn api_config(server: &MockServer) -> Config {
    let mut config = Config::for_testing(&server.uri());
    config.source = SourceKind::Api;
    config
}

// =============================================================================
// Object store
// =============================================================================

#[tokio::test]
async fn test_object_store_fetches_year_keyed_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"2010": 5, "2011": null, "2012": 7})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = ObjectStoreSource::new(&Config::for_testing(&server.uri())).unwrap();
    let counts = source.fetch_series(&rl(), RANGE).await.unwrap();

    assert_eq!(counts.get(&2010), Some(&5));
    assert_eq!(counts.get(&2011), Some(&0));
    assert_eq!(counts.get(&2012), Some(&7));
}

#[tokio::test]
async fn test_object_store_rejects_negative_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"2010": -1})))
        .mount(&server)
        .await;

    let source = ObjectStoreSource::new(&Config::for_testing(&server.uri())).unwrap();
    let err = source.fetch_series(&rl(), RANGE).await.unwrap_err();

    assert!(matches!(err, SourceError::Malformed { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_object_store_rejects_non_integer_year_keys() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"twenty-ten": 1})))
        .mount(&server)
        .await;

    let source = ObjectStoreSource::new(&Config::for_testing(&server.uri())).unwrap();
    let err = source.fetch_series(&rl(), RANGE).await.unwrap_err();
    assert!(matches!(err, SourceError::Malformed { .. }));
}

#[tokio::test]
async fn test_object_store_missing_object_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = ObjectStoreSource::new(&Config::for_testing(&server.uri())).unwrap();
    let err = source.fetch_series(&rl(), RANGE).await.unwrap_err();
    assert!(matches!(err, SourceError::NotFound { .. }));
}

#[tokio::test]
async fn test_loader_retries_server_error_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"2011": 4})))
        .mount(&server)
        .await;

    let config = Config::for_testing(&server.uri());
    let loader = SeriesLoader::new(build_source(&config).unwrap(), &config);
    let outcome = loader.load(&[rl()], RANGE).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.series.get("rl").unwrap().counts(), vec![0, 4, 0]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_loader_honours_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"2010": 1})))
        .mount(&server)
        .await;

    let config = Config::for_testing(&server.uri());
    let loader = SeriesLoader::new(build_source(&config).unwrap(), &config);

    assert!(loader.load_one(&rl(), RANGE).await.is_ok());
}

#[tokio::test]
async fn test_loader_does_not_retry_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::for_testing(&server.uri());
    let loader = SeriesLoader::new(build_source(&config).unwrap(), &config);
    let outcome = loader.load(&[rl()], RANGE).await;

    assert_eq!(outcome.failures.len(), 1);
}

#[tokio::test]
async fn test_partial_failure_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rl_2010_2012.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"2010": 2})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cv_2010_2012.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"2012": 3})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nlp_2010_2012.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let config = Config::for_testing(&server.uri());
    let loader = SeriesLoader::new(build_source(&config).unwrap(), &config);
    let directions: Vec<Direction> = ["rl", "nlp", "cv"].into_iter().map(Direction::from).collect();
    let outcome = loader.load(&directions, RANGE).await;

    assert_eq!(outcome.series.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].direction.as_str(), "nlp");
    assert!(matches!(outcome.failures[0].source, SourceError::Parse(_)));
}

// =============================================================================
// Backend API
// =============================================================================

#[tokio::test]
async fn test_api_single_direction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/direction/rl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "direction": "rl",
            "years": [2010, 2011],
            "counts": [1, 2]
        })))
        .mount(&server)
        .await;

    let source = ApiSource::new(&api_config(&server)).unwrap();
    let counts = source.fetch_series(&rl(), RANGE).await.unwrap();
    assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![(2010, 1), (2011, 2)]);
}

#[tokio::test]
async fn test_api_mismatched_lengths_are_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/direction/rl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "direction": "rl",
            "years": [2010, 2011],
            "counts": [1]
        })))
        .mount(&server)
        .await;

    let source = ApiSource::new(&api_config(&server)).unwrap();
    let err = source.fetch_series(&rl(), RANGE).await.unwrap_err();
    assert!(matches!(err, SourceError::Malformed { .. }));
}

#[tokio::test]
async fn test_api_bulk_and_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/all-directions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "directions": ["rl", "nlp"],
            "series": {
                "rl": [{"year": 2010, "count": 4}],
                "nlp": [{"year": 2011, "count": 6}]
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/directions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["rl", "nlp"])))
        .mount(&server)
        .await;

    let source = ApiSource::new(&api_config(&server)).unwrap();

    let bulk = source.fetch_bulk(&[rl(), Direction::new("cv")], RANGE).await.unwrap();
    assert_eq!(bulk.len(), 1);
    assert_eq!(bulk.get("rl").and_then(|c| c.get(&2010)), Some(&4));

    let listed = source.list_directions().await.unwrap();
    assert_eq!(listed, vec![rl(), Direction::new("nlp")]);
}

#[tokio::test]
async fn test_api_rankings_and_latest_year() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rankings/latest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"latest_year": 2024, "items": []})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rankings/2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"direction": "nlp", "year": 2024, "count": 3},
            {"direction": "rl", "year": 2024, "count": 8}
        ])))
        .mount(&server)
        .await;

    let source = ApiSource::new(&api_config(&server)).unwrap();
    assert_eq!(source.latest_year().await.unwrap(), Some(2024));

    let ranked = source.fetch_rankings_for_year(2024).await.unwrap();
    assert_eq!(ranked[0].direction, rl());
    assert_eq!(ranked[0].count, 8);
}

#[tokio::test]
async fn test_object_store_ranking_outside_range_keeps_configured_objects() {
    let server = MockServer::start().await;

    for (name, count) in [("rl", 12), ("nlp", 30)] {
        Mock::given(method("GET"))
            .and(path(format!("/{name}_2010_2025.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"2025": count})))
            .expect(2)
            .mount(&server)
            .await;
    }

    let mut config = Config::for_testing(&server.uri());
    config.start_year = 2010;
    config.end_year = 2025;
    let directions = vec![rl(), Direction::new("nlp")];
    let dashboard =
        Dashboard::with_directions(build_source(&config).unwrap(), &config, directions);

    let inside = dashboard.rankings(Some(2025), 5).await;
    assert!(inside.failures.is_empty());
    assert_eq!(inside.entries[0].direction.as_str(), "nlp");
    assert_eq!(inside.entries[0].count, 30);

    // no `_2010_2026` object is requested; the year simply has no counts
    let outside = dashboard.rankings(Some(2026), 5).await;
    assert!(outside.failures.is_empty());
    let ranked: Vec<(&str, u64)> =
        outside.entries.iter().map(|e| (e.direction.as_str(), e.count)).collect();
    assert_eq!(ranked, [("rl", 0), ("nlp", 0)]);
}

#[tokio::test]
async fn test_dashboard_uses_backend_rankings_when_enabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rankings/2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"direction": "rl", "year": 2024, "count": 8},
            {"direction": "nlp", "year": 2024, "count": 3},
            {"direction": "cv", "year": 2024, "count": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = api_config(&server);
    config.use_backend_rankings = true;
    let dashboard = Dashboard::new(build_source(&config).unwrap(), &config);

    let view = dashboard.rankings(Some(2024), 2).await;

    assert!(view.precomputed);
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[0].direction, rl());
}

#[tokio::test]
async fn test_dashboard_falls_back_when_backend_ranking_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rankings/2011"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/all-directions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "series": {
                "rl": [{"year": 2011, "count": 2}],
                "nlp": [{"year": 2011, "count": 9}]
            }
        })))
        .mount(&server)
        .await;

    let mut config = api_config(&server);
    config.use_backend_rankings = true;
    config.start_year = 2010;
    config.end_year = 2012;
    let dashboard = Dashboard::with_directions(
        build_source(&config).unwrap(),
        &config,
        vec![rl(), Direction::new("nlp")],
    );

    let view = dashboard.rankings(Some(2011), 5).await;

    assert!(!view.precomputed);
    assert_eq!(view.entries[0].direction.as_str(), "nlp");
    assert_eq!(view.entries[1].count, 2);
}

// =============================================================================
// Static index
// =============================================================================

#[tokio::test]
async fn test_static_index_is_fetched_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index/all.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "directions": ["rl"],
            "series": {"rl": [{"year": 2010, "count": 3}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::for_testing(&format!("{}/index/all.json", server.uri()));
    let source = StaticIndexSource::new(&config).unwrap();

    let counts = source.fetch_series(&rl(), RANGE).await.unwrap();
    assert_eq!(counts.get(&2010), Some(&3));

    let missing = source.fetch_series(&Direction::new("nlp"), RANGE).await.unwrap_err();
    assert!(matches!(missing, SourceError::NotFound { .. }));

    assert_eq!(source.list_directions().await.unwrap(), vec![rl()]);
}

#[tokio::test]
async fn test_static_index_invalidate_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "series": {"rl": [{"year": 2010, "count": 3}]}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let config = Config::for_testing(&format!("{}/all.json", server.uri()));
    let source = Arc::new(StaticIndexSource::new(&config).unwrap());

    let _ = source.fetch_bulk(&[rl()], RANGE).await.unwrap();
    source.invalidate().await;
    let bulk = source.fetch_bulk(&[rl()], RANGE).await.unwrap();

    assert_eq!(bulk.len(), 1);
}
