use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pulse_core::youtube::{CatalogError, VideoCatalog};
use pulse_core::{ChannelSummary, VideoStatistics, VideoSummary};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StubCatalog {
    popular: Vec<VideoSummary>,
    channel: Option<ChannelSummary>,
    videos: Vec<VideoSummary>,
    fail: bool,
    last_popular_args: Mutex<Option<(String, Option<String>)>>,
    last_max_results: Mutex<Option<u32>>,
}

impl StubCatalog {
    fn check(&self) -> Result<(), CatalogError> {
        if self.fail {
            Err(CatalogError::Status { status: 403, body: "quotaExceeded".into() })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VideoCatalog for StubCatalog {
    async fn channel(&self, _channel_id: &str) -> Result<Option<ChannelSummary>, CatalogError> {
        self.check()?;
        Ok(self.channel.clone())
    }

    async fn channel_videos(&self, _channel_id: &str, max_results: u32) -> Result<Vec<VideoSummary>, CatalogError> {
        self.check()?;
        *self.last_max_results.lock().unwrap() = Some(max_results);
        Ok(self.videos.clone())
    }

    async fn search(&self, _query: &str, max_results: u32) -> Result<Vec<VideoSummary>, CatalogError> {
        self.check()?;
        *self.last_max_results.lock().unwrap() = Some(max_results);
        Ok(self.videos.clone())
    }

    async fn most_popular(&self, region_code: &str, category_id: Option<&str>) -> Result<Vec<VideoSummary>, CatalogError> {
        self.check()?;
        *self.last_popular_args.lock().unwrap() = Some((region_code.to_string(), category_id.map(str::to_string)));
        Ok(self.popular.clone())
    }
}

fn video(id: &str, tags: &[&str], views: &str, category: &str) -> VideoSummary {
    VideoSummary {
        id: id.into(),
        title: format!("Video {id}"),
        statistics: VideoStatistics { view_count: views.into(), like_count: "10".into(), comment_count: "2".into(), ..Default::default() },
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        category_id: category.into(),
        ..Default::default()
    }
}

fn app(stub: Arc<StubCatalog>) -> Router {
    pulse_server::build_app_with_catalog(stub, None)
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = tower::ServiceExt::oneshot(app, req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = call(app, Request::get(uri).body(Body::empty()).unwrap()).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = call(app(Arc::default()), Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn trending_aggregates_popular_videos() {
    let stub = Arc::new(StubCatalog {
        popular: vec![
            video("v1", &["#AI", "Tech"], "1000", "28"),
            video("v2", &["Tech"], "2000", "24"),
            video("v3", &[], "5", "10"),
        ],
        ..Default::default()
    });
    let (status, json) = get(app(stub.clone()), "/trending").await;
    assert_eq!(status, StatusCode::OK);

    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["hashtag"], "#Tech");
    assert_eq!(arr[0]["count"], 2);
    assert_eq!(arr[0]["searchVolume"], "3.0K");
    assert_eq!(arr[0]["category"], "Science & Technology");
    assert_eq!(arr[0]["status"], "up");
    assert_eq!(arr[1]["hashtag"], "#AI");
    let growth = arr[1]["growth"].as_u64().unwrap();
    assert!((50..=349).contains(&growth));

    let args = stub.last_popular_args.lock().unwrap().clone();
    assert_eq!(args, Some(("US".to_string(), None)));
}

#[tokio::test]
async fn trending_forwards_region_and_category() {
    let stub = Arc::new(StubCatalog::default());
    let (status, json) = get(app(stub.clone()), "/trending?regionCode=JP&categoryId=20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
    let args = stub.last_popular_args.lock().unwrap().clone();
    assert_eq!(args, Some(("JP".to_string(), Some("20".to_string()))));
}

#[tokio::test]
async fn trending_filter_params() {
    let stub = Arc::new(StubCatalog {
        popular: vec![video("v1", &["speedrun"], "10", "20"), video("v2", &["lofi"], "10", "10")],
        ..Default::default()
    });
    let (_, json) = get(app(stub.clone()), "/trending?category=Music").await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["hashtag"], "#lofi");

    let (_, json) = get(app(stub), "/trending?q=SPEED").await;
    assert_eq!(json[0]["hashtag"], "#speedrun");
}

#[tokio::test]
async fn trending_upstream_failure_is_500() {
    let stub = Arc::new(StubCatalog { fail: true, ..Default::default() });
    let (status, json) = get(app(stub), "/trending").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "Failed to fetch trending data" }));
}

#[tokio::test]
async fn channel_requires_id() {
    let (status, json) = get(app(Arc::default()), "/channel").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Channel ID is required");

    let (status, _) = get(app(Arc::default()), "/channel?channelId=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn channel_not_found_is_404() {
    let (status, json) = get(app(Arc::default()), "/channel?channelId=UCx").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Channel not found");
}

#[tokio::test]
async fn channel_found() {
    let stub = Arc::new(StubCatalog {
        channel: Some(ChannelSummary { id: "UCx".into(), title: "Chan".into(), ..Default::default() }),
        ..Default::default()
    });
    let (status, json) = get(app(stub), "/channel?channelId=UCx").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Chan");
    assert_eq!(json["statistics"]["subscriberCount"], "0");
}

#[tokio::test]
async fn videos_default_and_custom_page_size() {
    let stub = Arc::new(StubCatalog { videos: vec![video("a", &["x"], "1", "1")], ..Default::default() });
    let (status, json) = get(app(stub.clone()), "/videos?channelId=UCx").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["id"], "a");
    assert_eq!(json[0]["tags"], json!(["x"]));
    assert_eq!(*stub.last_max_results.lock().unwrap(), Some(50));

    get(app(stub.clone()), "/videos?channelId=UCx&maxResults=7").await;
    assert_eq!(*stub.last_max_results.lock().unwrap(), Some(7));
}

#[tokio::test]
async fn videos_upstream_failure_is_500() {
    let stub = Arc::new(StubCatalog { fail: true, ..Default::default() });
    let (status, json) = get(app(stub), "/videos?channelId=UCx").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch videos");
}

#[tokio::test]
async fn channel_summary_totals() {
    let stub = Arc::new(StubCatalog {
        channel: Some(ChannelSummary { id: "UCx".into(), ..Default::default() }),
        videos: vec![video("a", &[], "100", "1"), video("b", &[], "300", "1")],
        ..Default::default()
    });
    let (status, json) = get(app(stub), "/channel/summary?channelId=UCx").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totals"], json!({ "videos": 2, "totalViews": 400, "totalLikes": 20, "totalComments": 4 }));
    assert_eq!(json["recentActivity"][1]["views"], 3.0);
}

#[tokio::test]
async fn search_requires_query() {
    let (status, json) = get(app(Arc::default()), "/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Query is required");

    let stub = Arc::new(StubCatalog::default());
    let (status, _) = get(app(stub.clone()), "/search?q=rust").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(*stub.last_max_results.lock().unwrap(), Some(25));
}

#[tokio::test]
async fn seo_analyze_scores_draft() {
    let body = json!({ "title": "x".repeat(55), "description": "short", "tags": "a,b,c,d,e" });
    let req = Request::post("/seo/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = call(app(Arc::default()), req).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["titleScore"], 100);
    assert_eq!(json["descriptionScore"], 50);
    assert_eq!(json["tagsScore"], 80);
    assert_eq!(json["overallScore"], 77);
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 4);
}
