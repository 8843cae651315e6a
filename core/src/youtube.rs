//! Video catalog provider backed by the YouTube Data API v3.

use crate::{ChannelStatistics, ChannelSummary, Thumbnail, Thumbnails, VideoStatistics, VideoSummary, MAX_PAGE_SIZE};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_REGION: &str = "US";
pub const DEFAULT_SEARCH_RESULTS: u32 = 25;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("YOUTUBE_API_KEY is not configured")]
    MissingApiKey,
    #[error("invalid api url: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of channel and video records.
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    async fn channel(&self, channel_id: &str) -> Result<Option<ChannelSummary>, CatalogError>;

    /// Most recent uploads of a channel.
    async fn channel_videos(&self, channel_id: &str, max_results: u32) -> Result<Vec<VideoSummary>, CatalogError>;

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoSummary>, CatalogError>;

    /// One page of the "most popular" chart for a region, optionally narrowed to a category.
    async fn most_popular(&self, region_code: &str, category_id: Option<&str>) -> Result<Vec<VideoSummary>, CatalogError>;
}

// --- wire shapes ---

#[derive(Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawThumb {
    url: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawThumbs {
    default: Option<RawThumb>,
    medium: Option<RawThumb>,
    high: Option<RawThumb>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawResourceId {
    video_id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawSnippet {
    title: Option<String>,
    description: Option<String>,
    custom_url: Option<String>,
    published_at: Option<String>,
    thumbnails: Option<RawThumbs>,
    tags: Option<Vec<String>>,
    category_id: Option<String>,
    resource_id: Option<RawResourceId>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
    favorite_count: Option<String>,
    subscriber_count: Option<String>,
    video_count: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawRelatedPlaylists {
    uploads: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawContentDetails {
    related_playlists: Option<RawRelatedPlaylists>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawResource {
    id: Option<String>,
    snippet: Option<RawSnippet>,
    statistics: Option<RawStatistics>,
    content_details: Option<RawContentDetails>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSearchItem {
    id: Option<RawResourceId>,
}

fn thumbnails(raw: Option<RawThumbs>) -> Thumbnails {
    let raw = raw.unwrap_or_default();
    let pick = |t: Option<RawThumb>| Thumbnail { url: t.and_then(|t| t.url).unwrap_or_default() };
    Thumbnails { default: pick(raw.default), medium: pick(raw.medium), high: pick(raw.high) }
}

fn counter(v: Option<String>) -> String {
    v.unwrap_or_else(|| "0".to_string())
}

fn to_video(raw: RawResource) -> VideoSummary {
    let snippet = raw.snippet.unwrap_or_default();
    let stats = raw.statistics.unwrap_or_default();
    VideoSummary {
        id: raw.id.unwrap_or_default(),
        title: snippet.title.unwrap_or_default(),
        description: snippet.description.unwrap_or_default(),
        published_at: snippet.published_at.unwrap_or_default(),
        thumbnails: thumbnails(snippet.thumbnails),
        statistics: VideoStatistics {
            view_count: counter(stats.view_count),
            like_count: counter(stats.like_count),
            comment_count: counter(stats.comment_count),
            favorite_count: counter(stats.favorite_count),
        },
        tags: snippet.tags,
        category_id: snippet.category_id.unwrap_or_default(),
    }
}

fn to_channel(raw: RawResource) -> ChannelSummary {
    let snippet = raw.snippet.unwrap_or_default();
    let stats = raw.statistics.unwrap_or_default();
    ChannelSummary {
        id: raw.id.unwrap_or_default(),
        title: snippet.title.unwrap_or_default(),
        description: snippet.description.unwrap_or_default(),
        custom_url: snippet.custom_url.unwrap_or_default(),
        published_at: snippet.published_at.unwrap_or_default(),
        thumbnails: thumbnails(snippet.thumbnails),
        statistics: ChannelStatistics {
            view_count: counter(stats.view_count),
            subscriber_count: counter(stats.subscriber_count),
            video_count: counter(stats.video_count),
        },
    }
}

fn page_size(max_results: u32) -> String {
    max_results.clamp(1, MAX_PAGE_SIZE).to_string()
}

#[derive(Clone)]
pub struct YouTubeClient {
    http: Client,
    base: Url,
    api_key: Option<String>,
}

impl YouTubeClient {
    pub fn new(api_key: Option<String>) -> Result<Self, CatalogError> {
        Self::with_base_url(DEFAULT_API_BASE, api_key)
    }

    pub fn with_base_url(base: &str, api_key: Option<String>) -> Result<Self, CatalogError> {
        // Resource names are joined onto the base, which needs a trailing slash to keep its last segment.
        let base = if base.ends_with('/') { Url::parse(base)? } else { Url::parse(&format!("{base}/"))? };
        let http = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self { http, base, api_key: api_key.filter(|k| !k.is_empty()) })
    }

    async fn list<T: DeserializeOwned>(&self, resource: &str, params: &[(&str, String)]) -> Result<Vec<T>, CatalogError> {
        let key = self.api_key.as_deref().ok_or(CatalogError::MissingApiKey)?;
        let url = self.base.join(resource)?;
        tracing::debug!(%url, ?params, "youtube request");
        let resp = self.http.get(url).query(params).query(&[("key", key)]).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Status { status: status.as_u16(), body });
        }
        let bytes = resp.bytes().await?;
        let page: ListResponse<T> = serde_json::from_slice(&bytes)?;
        Ok(page.items)
    }

    async fn videos_by_id(&self, ids: &[String]) -> Result<Vec<VideoSummary>, CatalogError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let items: Vec<RawResource> = self
            .list("videos", &[("part", "snippet,statistics".into()), ("id", ids.join(","))])
            .await?;
        Ok(items.into_iter().map(to_video).collect())
    }
}

#[async_trait]
impl VideoCatalog for YouTubeClient {
    async fn channel(&self, channel_id: &str) -> Result<Option<ChannelSummary>, CatalogError> {
        let items: Vec<RawResource> = self
            .list("channels", &[("part", "snippet,statistics".into()), ("id", channel_id.into())])
            .await?;
        Ok(items.into_iter().next().map(to_channel))
    }

    async fn channel_videos(&self, channel_id: &str, max_results: u32) -> Result<Vec<VideoSummary>, CatalogError> {
        let channels: Vec<RawResource> = self
            .list("channels", &[("part", "contentDetails".into()), ("id", channel_id.into())])
            .await?;
        let uploads = channels
            .into_iter()
            .next()
            .and_then(|c| c.content_details)
            .and_then(|d| d.related_playlists)
            .and_then(|p| p.uploads);
        let Some(playlist_id) = uploads else {
            return Ok(vec![]);
        };

        let entries: Vec<RawResource> = self
            .list(
                "playlistItems",
                &[("part", "snippet".into()), ("playlistId", playlist_id), ("maxResults", page_size(max_results))],
            )
            .await?;
        let ids: Vec<String> = entries
            .into_iter()
            .filter_map(|e| e.snippet?.resource_id?.video_id)
            .filter(|id| !id.is_empty())
            .collect();
        self.videos_by_id(&ids).await
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoSummary>, CatalogError> {
        let hits: Vec<RawSearchItem> = self
            .list(
                "search",
                &[
                    ("part", "snippet".into()),
                    ("q", query.into()),
                    ("type", "video".into()),
                    ("maxResults", page_size(max_results)),
                    ("order", "relevance".into()),
                ],
            )
            .await?;
        let ids: Vec<String> = hits
            .into_iter()
            .filter_map(|h| h.id?.video_id)
            .filter(|id| !id.is_empty())
            .collect();
        self.videos_by_id(&ids).await
    }

    async fn most_popular(&self, region_code: &str, category_id: Option<&str>) -> Result<Vec<VideoSummary>, CatalogError> {
        let mut params = vec![
            ("part", "snippet,statistics".to_string()),
            ("chart", "mostPopular".to_string()),
            ("regionCode", region_code.to_string()),
            ("maxResults", MAX_PAGE_SIZE.to_string()),
        ];
        if let Some(category) = category_id {
            params.push(("videoCategoryId", category.to_string()));
        }
        let items: Vec<RawResource> = self.list("videos", &params).await?;
        tracing::info!(region = region_code, count = items.len(), "fetched most popular videos");
        Ok(items.into_iter().map(to_video).collect())
    }
}
