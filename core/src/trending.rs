//! Trending hashtags derived from the tags on a most-popular video snapshot.
//!
//! The pipeline is normalize → tally → rank → truncate. Everything here is
//! synchronous and request-scoped; the only non-deterministic input is the
//! cosmetic `growth` figure, which comes from a [`GrowthSource`].

use crate::category::category_name;
use crate::format::format_magnitude;
use crate::VideoSummary;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of entries returned by [`aggregate`].
pub const TOP_N: usize = 20;

pub const HASH_MARKER: char = '#';

/// Inclusive lower and exclusive upper bound of the simulated growth percentage.
const GROWTH_RANGE: std::ops::Range<u32> = 50..350;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    High,
}

impl Difficulty {
    pub fn from_count(count: u32) -> Self {
        if count < 5 {
            Difficulty::Easy
        } else if count < 15 {
            Difficulty::Medium
        } else {
            Difficulty::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStatus {
    Up,
}

/// Running totals for one hashtag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagAggregate {
    pub count: u32,
    pub total_views: u64,
    pub category: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingEntry {
    pub hashtag: String,
    pub category: String,
    pub growth: u32,
    pub status: TrendStatus,
    pub search_volume: String,
    pub difficulty: Difficulty,
    pub count: u32,
}

/// Supplies the presentation-only growth percentage, one value per entry.
pub trait GrowthSource {
    fn next_growth(&mut self) -> u32;
}

/// Uniform draw from `[50, 349]`.
pub struct RandomGrowth<R: Rng = ThreadRng> {
    rng: R,
}

impl RandomGrowth<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl Default for RandomGrowth<ThreadRng> {
    fn default() -> Self { Self::new() }
}

impl RandomGrowth<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> GrowthSource for RandomGrowth<R> {
    fn next_growth(&mut self) -> u32 {
        self.rng.gen_range(GROWTH_RANGE)
    }
}

/// Always the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedGrowth(pub u32);

impl GrowthSource for FixedGrowth {
    fn next_growth(&mut self) -> u32 { self.0 }
}

/// `foo` becomes `#foo`; `#foo` is kept. No trimming, no case folding.
pub fn normalize_tag(tag: &str) -> String {
    if tag.starts_with(HASH_MARKER) {
        tag.to_string()
    } else {
        format!("{HASH_MARKER}{tag}")
    }
}

/// Group tag occurrences by normalized hashtag, in first-encounter order.
///
/// Every occurrence counts, so a tag repeated inside one video's list is
/// counted (and its views added) once per repetition. The category is taken
/// from the first video carrying the hashtag and never overwritten.
pub fn tally(videos: &[VideoSummary]) -> Vec<(String, HashtagAggregate)> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut ordered: Vec<(String, HashtagAggregate)> = Vec::new();
    for video in videos {
        let views = video.statistics.views();
        for tag in video.tags() {
            let hashtag = normalize_tag(tag);
            let idx = match slots.get(&hashtag) {
                Some(&idx) => idx,
                None => {
                    ordered.push((
                        hashtag.clone(),
                        HashtagAggregate { count: 0, total_views: 0, category: category_name(&video.category_id) },
                    ));
                    slots.insert(hashtag, ordered.len() - 1);
                    ordered.len() - 1
                }
            };
            let agg = &mut ordered[idx].1;
            agg.count += 1;
            agg.total_views = agg.total_views.saturating_add(views);
        }
    }
    ordered
}

/// Turn tallied hashtags into ranked entries: stable sort by count, top [`TOP_N`].
pub fn rank<G: GrowthSource + ?Sized>(tallied: Vec<(String, HashtagAggregate)>, growth: &mut G) -> Vec<TrendingEntry> {
    let mut entries: Vec<TrendingEntry> = tallied
        .into_iter()
        .map(|(hashtag, agg)| TrendingEntry {
            hashtag,
            category: agg.category.to_string(),
            growth: growth.next_growth(),
            status: TrendStatus::Up,
            search_volume: format_magnitude(agg.total_views),
            difficulty: Difficulty::from_count(agg.count),
            count: agg.count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(TOP_N);
    entries
}

/// Full pipeline over one snapshot of popular videos.
pub fn aggregate<G: GrowthSource + ?Sized>(videos: &[VideoSummary], growth: &mut G) -> Vec<TrendingEntry> {
    rank(tally(videos), growth)
}

/// Optional narrowing of an already ranked list, as the trending table's filter box does.
#[derive(Debug, Clone, Default)]
pub struct TrendingFilter {
    /// Exact category name; `All` disables it.
    pub category: Option<String>,
    /// Case-insensitive substring of the hashtag or the category.
    pub q: Option<String>,
}

impl TrendingFilter {
    pub fn is_empty(&self) -> bool {
        self.category_name().is_none() && self.needle().is_none()
    }

    fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty() && *c != "All")
    }

    fn needle(&self) -> Option<String> {
        self.q.as_deref().filter(|q| !q.is_empty()).map(str::to_lowercase)
    }

    pub fn apply(&self, entries: Vec<TrendingEntry>) -> Vec<TrendingEntry> {
        if self.is_empty() {
            return entries;
        }
        let category = self.category_name();
        let needle = self.needle();
        entries
            .into_iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .filter(|e| {
                needle.as_ref().map_or(true, |n| {
                    e.hashtag.to_lowercase().contains(n) || e.category.to_lowercase().contains(n)
                })
            })
            .collect()
    }
}
