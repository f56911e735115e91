use axum::body::{to_bytes, Body};
use axum::http::Request;
use gramlens_browser::fixture::{FixtureDriver, FixturePageData};
use gramlens_collector::{profile_url, CollectorTuning, StaticRoster};
use gramlens_core::roster::{CompetitorEntry, CompetitorRoster};
use gramlens_core::UuidIdGenerator;
use serde_json::json;
use tower::ServiceExt;

use super::*;

const LISTING_SELECTOR: &str = "article a";
const CAPTION_SELECTOR: &str = r#"h1, [data-testid="caption"]"#;
const ENGAGEMENT_SELECTOR: &str = "section";

fn listing(hrefs: &[&str]) -> FixturePageData {
    FixturePageData::new().with_attrs(
        LISTING_SELECTOR,
        "href",
        hrefs.iter().map(|h| (*h).to_string()),
    )
}

fn post_page(caption: &str, engagement: &str) -> FixturePageData {
    FixturePageData::new()
        .with_texts(CAPTION_SELECTOR, [caption])
        .with_texts(ENGAGEMENT_SELECTOR, [engagement])
}

fn fixture_world() -> FixtureDriver {
    FixtureDriver::new()
        .with_page(
            profile_url("nightpulse"),
            listing(&[
                "https://www.instagram.com/p/T1/",
                "https://www.instagram.com/p/T2/",
            ]),
        )
        .with_page(
            "https://www.instagram.com/p/T1/",
            post_page("LOVE this #vibe @friend", "300 likes"),
        )
        .with_page(
            "https://www.instagram.com/p/T2/",
            post_page("another #vibe post", "100 likes"),
        )
        .with_page(
            profile_url("rival_one"),
            listing(&["https://www.instagram.com/p/C1/"]),
        )
        .with_page(
            "https://www.instagram.com/p/C1/",
            post_page("vibe vibe music all night", "200 likes"),
        )
        .with_page(
            profile_url("rival_two"),
            listing(&["https://www.instagram.com/p/C2/"]),
        )
        .with_page(
            "https://www.instagram.com/p/C2/",
            post_page("pure energy, pure vibe", "100 likes"),
        )
}

fn test_app(driver: FixtureDriver) -> Router {
    let roster = CompetitorRoster {
        competitors: ["rival_one", "rival_two"]
            .iter()
            .map(|h| CompetitorEntry {
                handle: (*h).to_string(),
                tags: vec!["music".to_string()],
                notes: None,
            })
            .collect(),
    };
    let tuning = CollectorTuning {
        navigation_timeout: Duration::from_secs(1),
        scroll_steps: 3,
        scroll_step_delay: Duration::ZERO,
        scroll_amount_px: 1_080,
    };
    let pipeline = Pipeline::new(
        Arc::new(driver),
        Arc::new(UuidIdGenerator),
        Arc::new(StaticRoster::new(roster)),
        tuning,
    );

    build_app(
        AppState {
            pipeline: Arc::new(pipeline),
        },
        AuthState::disabled(),
        default_rate_limit_state(),
    )
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json parse")
}

#[tokio::test]
async fn health_returns_ok_envelope() {
    let app = test_app(FixtureDriver::new());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["service"], "gramlens");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn analyze_without_target_handle_is_bad_request() {
    let app = test_app(FixtureDriver::new());
    let response = app
        .oneshot(json_request("/api/v1/analyze", json!({})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "targetHandle is required");
}

#[tokio::test]
async fn analyze_blank_target_handle_is_bad_request() {
    let app = test_app(FixtureDriver::new());
    let response = app
        .oneshot(json_request(
            "/api/v1/analyze",
            json!({ "targetHandle": "   " }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_unreachable_target_is_not_found() {
    let driver = FixtureDriver::new().with_page(
        profile_url("ghosthandle"),
        FixturePageData::new().with_final_url("https://www.instagram.com/404/"),
    );
    let app = test_app(driver);

    let response = app
        .oneshot(json_request(
            "/api/v1/analyze",
            json!({ "targetHandle": "ghosthandle" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "target_inaccessible");
    assert!(
        json["error"]["message"]
            .as_str()
            .expect("message")
            .contains("not_found"),
        "reason should be attached: {json}"
    );
}

#[tokio::test]
async fn analyze_empty_collection_is_not_found() {
    let driver =
        FixtureDriver::new().with_page(profile_url("nightpulse"), FixturePageData::new());
    let app = test_app(driver);

    let response = app
        .oneshot(json_request(
            "/api/v1/analyze",
            json!({ "targetHandle": "nightpulse" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "no_artifacts_found");
}

#[tokio::test]
async fn analyze_happy_path_returns_full_report() {
    let app = test_app(fixture_world());

    let response = app
        .oneshot(json_request(
            "/api/v1/analyze",
            json!({
                "targetHandle": "@nightpulse",
                "competitorCount": 2,
                "generatePostCount": 3
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let data = &json["data"];
    assert_eq!(data["targetHandle"], "nightpulse");
    assert_eq!(data["brandDna"]["observed"][0], "2 recent posts analyzed");
    assert_eq!(
        data["competitorInsights"]
            .as_array()
            .expect("insights")
            .len(),
        2
    );
    assert_eq!(
        data["generatedPosts"].as_array().expect("posts").len(),
        3
    );
    assert_eq!(data["metadata"]["artifactsCollected"], 2);
    assert_eq!(data["metadata"]["competitorsAnalyzed"], 2);
    assert_eq!(data["metadata"]["postsGenerated"], 3);
    assert_eq!(data["metadata"]["likeCommentVisible"], true);
    assert!(data["metadata"]["timestamp"].is_string());
}

#[tokio::test]
async fn incoming_request_id_is_echoed() {
    let app = test_app(FixtureDriver::new());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-12345")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(
        response.headers().get("x-request-id").expect("header"),
        "req-12345"
    );
    let json = body_json(response).await;
    assert_eq!(json["meta"]["request_id"], "req-12345");
}

fn sample_report_payload() -> serde_json::Value {
    json!({
        "targetHandle": "nightpulse",
        "brandDna": {
            "observed": ["2 recent posts analyzed"],
            "inferred": ["Tone: Measured"],
            "artifactRefs": ["artifact_0001"]
        },
        "competitorInsights": [{
            "handle": "rival_one",
            "topFormats": ["carousel", "reel"],
            "commonThemes": ["vibe"],
            "engagementAvg": 200
        }],
        "generatedPosts": [{
            "caption": "Exploring vibe in our latest carousel.",
            "hashtags": ["#EDM"],
            "format": "carousel",
            "reasoning": "Format \"carousel\" chosen."
        }],
        "metadata": {
            "artifactsCollected": 2,
            "competitorsAnalyzed": 1,
            "postsGenerated": 1,
            "likeCommentVisible": true,
            "timestamp": "2024-06-01T12:00:00Z"
        }
    })
}

#[tokio::test]
async fn report_with_missing_fields_is_bad_request() {
    let app = test_app(FixtureDriver::new());
    let response = app
        .oneshot(json_request(
            "/api/v1/report",
            json!({ "targetHandle": "nightpulse" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn report_renders_a_downloadable_document() {
    let app = test_app(FixtureDriver::new());
    let response = app
        .oneshot(json_request("/api/v1/report", sample_report_payload()))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type"),
        "text/html; charset=utf-8"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .expect("disposition")
        .to_str()
        .expect("header str");
    assert!(disposition.starts_with("attachment; filename=\"gramlens-nightpulse-"));

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let html = String::from_utf8(bytes.to_vec()).expect("utf8");
    assert!(html.contains("Brand report: @nightpulse"));
    assert!(html.contains("Tone: Measured"));
}

#[tokio::test]
async fn report_timestamp_defaults_when_absent() {
    let mut payload = sample_report_payload();
    payload["metadata"]
        .as_object_mut()
        .expect("metadata")
        .remove("timestamp");

    let app = test_app(FixtureDriver::new());
    let response = app
        .oneshot(json_request("/api/v1/report", payload))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}
