//! Enums used throughout the card generator
//!
//! This module contains the filter buckets and the view-state enums used by
//! the terminal UI.

/// A bucket filter (age or level): everything, or one exact label
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BucketFilter {
    #[default]
    All,
    Only(String),
}

impl BucketFilter {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            BucketFilter::All => true,
            BucketFilter::Only(bucket) => bucket == value,
        }
    }

    /// Step to the next choice: All -> first bucket -> ... -> last -> All
    pub fn cycle(&self, buckets: &[String]) -> Self {
        match self {
            BucketFilter::All => buckets
                .first()
                .map(|b| BucketFilter::Only(b.clone()))
                .unwrap_or(BucketFilter::All),
            BucketFilter::Only(current) => match buckets.iter().position(|b| b == current) {
                Some(i) if i + 1 < buckets.len() => BucketFilter::Only(buckets[i + 1].clone()),
                _ => BucketFilter::All,
            },
        }
    }

    pub fn from_option(value: Option<String>) -> Self {
        match value {
            Some(v) if v != "all" => BucketFilter::Only(v),
            _ => BucketFilter::All,
        }
    }
}

/// Which pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Catalog, // Activity list with selection toggles
    Cards,   // Generated card preview
}

impl Focus {
    pub fn toggle(&self) -> Self {
        match self {
            Focus::Catalog => Focus::Cards,
            Focus::Cards => Focus::Catalog,
        }
    }
}

/// Keyboard input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search, // Typing into the search box
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets() -> Vec<String> {
        vec!["11-13".to_string(), "8-10".to_string()]
    }

    #[test]
    fn test_bucket_filter_cycle() {
        let f = BucketFilter::All.cycle(&buckets());
        assert_eq!(f, BucketFilter::Only("11-13".to_string()));
        let f = f.cycle(&buckets());
        assert_eq!(f, BucketFilter::Only("8-10".to_string()));
        assert_eq!(f.cycle(&buckets()), BucketFilter::All);
    }

    #[test]
    fn test_bucket_filter_cycle_stale_value_resets() {
        let f = BucketFilter::Only("gone".to_string());
        assert_eq!(f.cycle(&buckets()), BucketFilter::All);
    }

    #[test]
    fn test_bucket_filter_accepts() {
        assert!(BucketFilter::All.accepts("anything"));
        assert!(BucketFilter::Only("8-10".to_string()).accepts("8-10"));
        assert!(!BucketFilter::Only("8-10".to_string()).accepts("11-13"));
    }

    #[test]
    fn test_from_option_all_keyword() {
        let all = BucketFilter::from_option(Some("all".to_string()));
        assert_eq!(all, BucketFilter::All);
        assert_eq!(BucketFilter::from_option(None), BucketFilter::All);
    }

    #[test]
    fn test_focus_toggle() {
        assert_eq!(Focus::Catalog.toggle(), Focus::Cards);
        assert_eq!(Focus::default(), Focus::Catalog);
    }
}
