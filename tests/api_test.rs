mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use common::*;
use serde_json::{Value, json};
use spotistats::{api, service::StatsService};
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:3000";

fn app(source: FakeSource) -> Router {
    api::router(Arc::new(StatsService::new(source)), &[ORIGIN.to_string()])
}

fn populated() -> FakeSource {
    FakeSource {
        top_tracks: vec![
            raw_track("t1", "Idioteque", "Radiohead", 66),
            raw_track("t2", "Cosmogony", "Björk", 38),
        ],
        top_artists: vec![raw_artist("Radiohead"), raw_artist("Björk"), raw_artist("Air")],
        plays: vec![
            raw_play("Idioteque", "Radiohead", "2024-02-02T08:00:00Z"),
            raw_play("Cosmogony", "Björk", "2024-02-01T20:00:00Z"),
        ],
        features: vec![("t1".to_string(), raw_feature("t1", 0.4))],
        ..FakeSource::default()
    }
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_needs_no_credential() {
    let (status, body) = send(app(FakeSource::default()), get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_bearer_is_unauthorized() {
    let (status, body) = send(app(populated()), get("/top-artists", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized: Not authenticated" }));
}

#[tokio::test]
async fn test_top_artists_with_query() {
    let (status, body) = send(
        app(populated()),
        get("/top-artists?window=long_term&limit=2", Some("abc")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "top_artists_all_time": ["Radiohead", "Björk"] }));
}

#[tokio::test]
async fn test_fixed_window_routes() {
    let (_, body) = send(app(populated()), get("/top-artists-medium", Some("abc"))).await;
    assert!(body.get("top_artists_last_6_months").is_some());

    let (_, body) = send(app(populated()), get("/top-artists-long", Some("abc"))).await;
    assert!(body.get("top_artists_all_time").is_some());
}

#[tokio::test]
async fn test_time_of_day_routes() {
    let (status, body) = send(
        app(populated()),
        get("/top-artist-by-time-of-day?period=evening", Some("abc")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "top_artist_evening": "Björk" }));

    let (_, body) = send(app(populated()), get("/top-artist-morning", Some("abc"))).await;
    assert_eq!(body, json!({ "top_artist_morning": "Radiohead" }));
}

#[tokio::test]
async fn test_invalid_query_is_rejected() {
    let response = app(populated())
        .oneshot(get("/top-artists?window=forever", Some("abc")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upstream_unavailable_is_bad_gateway() {
    let source = FakeSource {
        unavailable: true,
        ..populated()
    };
    let (status, body) = send(app(source), get("/avg-popularity", Some("abc"))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().starts_with("Upstream unavailable"));
}

#[tokio::test]
async fn test_malformed_upstream_is_unprocessable() {
    let mut source = populated();
    source.top_tracks[1].popularity = Some(250);
    let (status, body) = send(app(source), get("/popularity-distribution", Some("abc"))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("track[1] (id t2)"));
}

#[tokio::test]
async fn test_credential_is_forwarded() {
    let service = Arc::new(StatsService::new(populated()));
    let app = api::router(service.clone(), &[ORIGIN.to_string()]);

    let (status, _) = send(app, get("/longest-listening-streak", Some("user-token"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        *service.source().seen_credentials.lock().unwrap(),
        vec!["user-token".to_string()]
    );
}

#[tokio::test]
async fn test_dashboard_route() {
    let (status, body) = send(app(populated()), get("/dashboard", Some("abc"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["longest_streak_days"], 2);
    assert_eq!(body["happiest_track"]["track"], "Idioteque");
    assert_eq!(body["top_tracks_averages"]["tracks_analyzed"], 1);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let request = Request::builder()
        .uri("/mood-distribution")
        .header(header::ORIGIN, ORIGIN)
        .header(header::AUTHORIZATION, "Bearer abc")
        .body(Body::empty())
        .unwrap();
    let response = app(populated()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ORIGIN
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}
