use serde::{Deserialize, Serialize};

pub mod category;
pub mod format;
pub mod seo;
pub mod stats;
pub mod trending;
pub mod youtube;

/// Largest page the upstream API hands out for a single list call.
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thumbnails {
    pub default: Thumbnail,
    pub medium: Thumbnail,
    pub high: Thumbnail,
}

/// Counters exactly as the platform reports them: decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
    pub favorite_count: String,
}

impl Default for VideoStatistics {
    fn default() -> Self {
        Self {
            view_count: "0".into(),
            like_count: "0".into(),
            comment_count: "0".into(),
            favorite_count: "0".into(),
        }
    }
}

impl VideoStatistics {
    pub fn views(&self) -> u64 { parse_count(&self.view_count) }
    pub fn likes(&self) -> u64 { parse_count(&self.like_count) }
    pub fn comments(&self) -> u64 { parse_count(&self.comment_count) }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO-8601, carried through untouched.
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub statistics: VideoStatistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub category_id: String,
}

impl VideoSummary {
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    pub view_count: String,
    pub subscriber_count: String,
    pub video_count: String,
}

impl Default for ChannelStatistics {
    fn default() -> Self {
        Self { view_count: "0".into(), subscriber_count: "0".into(), video_count: "0".into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub custom_url: String,
    pub published_at: String,
    pub thumbnails: Thumbnails,
    pub statistics: ChannelStatistics,
}

/// Parse a platform counter; anything that is not a plain non-negative integer counts as zero.
///
/// Deliberately stricter than a leading-digits parse: `"12abc"` is 0, not 12.
/// The platform only ever sends plain digit strings, so a suffix means the
/// value is not a counter at all.
pub fn parse_count(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}
