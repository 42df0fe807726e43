//! Catalog filtering
//!
//! The visible list is recomputed from the catalog on every access; catalogs
//! hold tens of items so nothing is cached.

use crate::models::{Activity, BucketFilter};

/// Age bucket, level bucket and free-text search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub age: BucketFilter,
    pub level: BucketFilter,
    pub search: String,
}

impl FilterState {
    pub fn accepts(&self, act: &Activity) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = self.search.is_empty() || act.matches_text(&needle);
        self.age.accepts(&act.age) && self.level.accepts(&act.level) && matches_search
    }

    /// Ordered subsequence of `catalog` passing all three predicates
    pub fn apply<'a>(&self, catalog: &'a [Activity]) -> Vec<&'a Activity> {
        catalog.iter().filter(|act| self.accepts(act)).collect()
    }

    pub fn visible_ids(&self, catalog: &[Activity]) -> Vec<u32> {
        self.apply(catalog).iter().map(|a| a.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.age == BucketFilter::All && self.level == BucketFilter::All && self.search.is_empty()
    }
}

/// Sorted, de-duplicated age buckets present in the catalog
pub fn unique_ages(catalog: &[Activity]) -> Vec<String> {
    unique_sorted(catalog.iter().map(|a| a.age.clone()))
}

/// Sorted, de-duplicated level labels present in the catalog
pub fn unique_levels(catalog: &[Activity]) -> Vec<String> {
    unique_sorted(catalog.iter().map(|a| a.level.clone()))
}

fn unique_sorted(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = values.collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::sample;

    fn catalog() -> Vec<Activity> {
        vec![
            sample(1, "Brave Voice", "Confidence", "8-10", "Beginner"),
            sample(2, "Ethos & Pathos!", "Appeals", "11-13", "Intermediate"),
            sample(3, "Debate Duel", "Argumentation", "14-16", "Advanced"),
            sample(4, "Story Power", "Narrative", "8-10", "Beginner"),
            sample(5, "Question Time", "Rhetoric", "8-10", "Intermediate"),
        ]
    }

    #[test]
    fn test_empty_filter_returns_full_catalog_in_order() {
        let cat = catalog();
        let ids = FilterState::default().visible_ids(&cat);
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_every_member_satisfies_all_predicates() {
        let cat = catalog();
        let ages = unique_ages(&cat);
        let levels = unique_levels(&cat);
        let mut age_choices = vec![BucketFilter::All];
        age_choices.extend(ages.iter().cloned().map(BucketFilter::Only));
        let mut level_choices = vec![BucketFilter::All];
        level_choices.extend(levels.iter().cloned().map(BucketFilter::Only));

        for age in &age_choices {
            for level in &level_choices {
                for search in ["", "o", "DUEL", "xyz"] {
                    let f = FilterState {
                        age: age.clone(),
                        level: level.clone(),
                        search: search.to_string(),
                    };
                    let result = f.apply(&cat);
                    for act in &result {
                        assert!(cat.iter().any(|c| c.id == act.id));
                        assert!(age.accepts(&act.age));
                        assert!(level.accepts(&act.level));
                        if !search.is_empty() {
                            assert!(act.matches_text(&search.to_lowercase()));
                        }
                    }
                    let ids: Vec<u32> = result.iter().map(|a| a.id).collect();
                    let mut sorted = ids.clone();
                    sorted.sort();
                    assert_eq!(ids, sorted, "catalog order not preserved");
                }
            }
        }
    }

    #[test]
    fn test_search_matches_theme_only() {
        let cat = catalog();
        let f = FilterState {
            search: "NARRAT".to_string(),
            ..Default::default()
        };
        assert_eq!(f.visible_ids(&cat), vec![4]);
    }

    #[test]
    fn test_combined_filters() {
        let cat = catalog();
        let f = FilterState {
            age: BucketFilter::Only("8-10".to_string()),
            level: BucketFilter::Only("Beginner".to_string()),
            search: "story".to_string(),
        };
        assert_eq!(f.visible_ids(&cat), vec![4]);
    }

    #[test]
    fn test_unique_buckets_sorted() {
        let cat = catalog();
        assert_eq!(unique_ages(&cat), vec!["11-13", "14-16", "8-10"]);
        let levels = unique_levels(&cat);
        assert_eq!(levels, vec!["Advanced", "Beginner", "Intermediate"]);
    }
}
