use serde::{Deserialize, Serialize};

pub const TITLE_TIP: &str = "Optimize your title length (50-60 characters recommended)";
pub const DESCRIPTION_TIP: &str = "Add more details to your description (200+ characters)";
pub const TAGS_TIP: &str = "Include more relevant tags (10+ recommended)";

const GENERAL_TIPS: [&str; 3] = [
    "Add timestamps in your description for better engagement",
    "Include a clear call-to-action",
    "Use trending keywords in your niche",
];

/// Draft video metadata as typed into the optimizer form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeoInput {
    pub title: String,
    pub description: String,
    /// Comma-separated.
    pub tags: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    pub overall_score: u32,
    pub title_score: u32,
    pub description_score: u32,
    pub tags_score: u32,
    pub recommendations: Vec<String>,
}

/// Length in UTF-16 code units, the way the optimizer form measures it, so an
/// emoji counts as two.
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn title_score(title: &str) -> u32 {
    let len = text_len(title);
    if (50..=60).contains(&len) {
        100
    } else if len >= 40 {
        80
    } else {
        60
    }
}

pub fn description_score(description: &str) -> u32 {
    let len = text_len(description);
    if len >= 200 {
        100
    } else if len >= 100 {
        80
    } else {
        50
    }
}

/// Comma-separated entries that are not blank.
pub fn tag_count(tags: &str) -> usize {
    tags.split(',').filter(|t| !t.trim().is_empty()).count()
}

pub fn tags_score(tags: &str) -> u32 {
    let n = tag_count(tags);
    if n >= 10 {
        100
    } else if n >= 5 {
        80
    } else {
        40
    }
}

/// Threshold heuristics over title length, description length and tag count.
pub fn analyze(input: &SeoInput) -> SeoReport {
    let title_score = title_score(&input.title);
    let description_score = description_score(&input.description);
    let tags_score = tags_score(&input.tags);
    let overall_score = ((title_score + description_score + tags_score) as f64 / 3.0).round() as u32;

    let mut recommendations = Vec::new();
    if title_score < 80 {
        recommendations.push(TITLE_TIP.to_string());
    }
    if description_score < 80 {
        recommendations.push(DESCRIPTION_TIP.to_string());
    }
    if tags_score < 80 {
        recommendations.push(TAGS_TIP.to_string());
    }
    recommendations.extend(GENERAL_TIPS.iter().map(|s| s.to_string()));

    SeoReport { overall_score, title_score, description_score, tags_score, recommendations }
}
