use lazy_static::lazy_static;
use std::collections::HashMap;

/// Name used for any category id outside the platform taxonomy.
pub const DEFAULT_CATEGORY: &str = "Technology";

lazy_static! {
    static ref CATEGORIES: HashMap<&'static str, &'static str> = {
        let pairs: &[(&str, &str)] = &[
            ("1", "Film & Animation"),
            ("2", "Autos & Vehicles"),
            ("10", "Music"),
            ("15", "Pets & Animals"),
            ("17", "Sports"),
            ("19", "Travel & Events"),
            ("20", "Gaming"),
            ("22", "People & Blogs"),
            ("23", "Comedy"),
            ("24", "Entertainment"),
            ("25", "News & Politics"),
            ("26", "Howto & Style"),
            ("27", "Education"),
            ("28", "Science & Technology"),
        ];
        pairs.iter().copied().collect()
    };
}

/// Display name for a platform category id.
pub fn category_name(category_id: &str) -> &'static str {
    CATEGORIES.get(category_id).copied().unwrap_or(DEFAULT_CATEGORY)
}
