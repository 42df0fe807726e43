//! Catalog activity records
//!
//! One record per (activity, language) pair. The numeric `id` is the join key
//! across languages.

use serde::Deserialize;

/// A single rhetoric teaching exercise, already translated.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u32,
    pub age: String,
    pub level: String,
    pub icon: String,
    pub title: String,
    pub theme: String,
    pub concept: String,
    pub materials: String,
    pub duration: String,
    /// Short focus keyword shown in compact listings
    #[serde(default)]
    pub focus: String,
    pub description: String,
    pub focus_points: Vec<String>,
    pub examples: Vec<String>,
    pub rhetoric: String,
}

impl Activity {
    /// Format for the compact list row (truncate title if too long)
    pub fn format_row(&self, max_width: usize) -> String {
        let prefix = format!("{} ", self.icon);
        let available = max_width.saturating_sub(prefix.chars().count());
        let char_count = self.title.chars().count();
        let title = if char_count > available {
            let take_chars = available.saturating_sub(3);
            let truncated: String = self.title.chars().take(take_chars).collect();
            format!("{}...", truncated)
        } else {
            self.title.clone()
        };
        format!("{}{}", prefix, title)
    }

    /// Theme followed by the focus keyword when present
    pub fn theme_line(&self) -> String {
        if self.focus.is_empty() {
            self.theme.clone()
        } else {
            format!("{} ({})", self.theme, self.focus)
        }
    }

    /// Case-insensitive substring match over title or theme
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.theme.to_lowercase().contains(needle_lower)
    }
}

/// Find an activity by id in a catalog slice
pub fn find_activity(catalog: &[Activity], id: u32) -> Option<&Activity> {
    catalog.iter().find(|a| a.id == id)
}

#[cfg(test)]
pub(crate) fn sample(id: u32, title: &str, theme: &str, age: &str, level: &str) -> Activity {
    Activity {
        id,
        age: age.to_string(),
        level: level.to_string(),
        icon: "🎤".to_string(),
        title: title.to_string(),
        theme: theme.to_string(),
        concept: "Concept".to_string(),
        materials: "Paper".to_string(),
        duration: "20 min".to_string(),
        focus: "Voice".to_string(),
        description: "Description".to_string(),
        focus_points: vec!["One".to_string(), "Two".to_string()],
        examples: vec!["Example".to_string()],
        rhetoric: "Quote".to_string(),
    }
}
