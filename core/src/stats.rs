use crate::VideoSummary;
use serde::Serialize;

/// Points shown on the dashboard activity chart.
pub const ACTIVITY_POINTS: usize = 7;

/// Sums over a channel's uploads, shown on the dashboard header cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTotals {
    pub videos: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

impl ChannelTotals {
    pub fn from_videos(videos: &[VideoSummary]) -> Self {
        videos.iter().fold(Self::default(), |mut acc, v| {
            acc.videos += 1;
            acc.total_views = acc.total_views.saturating_add(v.statistics.views());
            acc.total_likes = acc.total_likes.saturating_add(v.statistics.likes());
            acc.total_comments = acc.total_comments.saturating_add(v.statistics.comments());
            acc
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPoint {
    pub video_id: String,
    /// Divided by 100 so views share an axis with likes and comments.
    pub views: f64,
    pub likes: u64,
    pub comments: u64,
}

pub fn recent_activity(videos: &[VideoSummary]) -> Vec<ActivityPoint> {
    videos
        .iter()
        .take(ACTIVITY_POINTS)
        .map(|v| ActivityPoint {
            video_id: v.id.clone(),
            views: v.statistics.views() as f64 / 100.0,
            likes: v.statistics.likes(),
            comments: v.statistics.comments(),
        })
        .collect()
}
