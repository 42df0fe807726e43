//! Interface string tables
//!
//! One table per [`Language`], embedded at build time. Every table carries the
//! same fixed set of keys; serde rejects a table with a missing key.

use serde::Deserialize;

use crate::error::CatalogError;
use crate::models::Language;

/// Named interface strings (labels, buttons, alerts, card captions)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UiStrings {
    pub title: String,
    pub subtitle: String,
    pub badge_title: String,
    pub badge_desc: String,
    pub badge_sub: String,
    pub stats_total: String,
    pub stats_selected: String,
    pub stats_generated: String,
    pub stats_downloaded: String,
    pub filter_title: String,
    pub label_age: String,
    pub label_level: String,
    pub label_search: String,
    pub opt_all_ages: String,
    pub opt_all_levels: String,
    pub btn_select_all: String,
    pub btn_deselect_all: String,
    pub btn_generate: String,
    pub btn_download: String,
    pub card_overview: String,
    pub card_theme: String,
    pub card_duration: String,
    pub card_level: String,
    pub card_age: String,
    pub card_concept: String,
    pub card_materials: String,
    pub card_desc_title: String,
    pub card_focus_title: String,
    pub card_examples_title: String,
    pub card_rhetoric_title: String,
    pub card_footer_age: String,
    pub card_footer_credit: String,
    pub card_footer_author: String,
    pub years_short: String,
    pub years_full: String,
    pub loading: String,
    pub no_results: String,
    pub download_single: String,
    pub alert_select: String,
    pub alert_generate: String,
    pub alert_complete: String,
    pub confirm_download: String,
}

fn embedded_table(lang: Language) -> &'static str {
    match lang {
        Language::En => include_str!("../data/ui/en.json"),
        Language::El => include_str!("../data/ui/el.json"),
        Language::Es => include_str!("../data/ui/es.json"),
        Language::Sv => include_str!("../data/ui/sv.json"),
        Language::It => include_str!("../data/ui/it.json"),
    }
}

fn parse_table(lang: Language) -> Result<UiStrings, CatalogError> {
    let parse_error = |source| CatalogError::Parse {
        lang: lang.code().to_string(),
        source,
    };
    serde_json::from_str(embedded_table(lang)).map_err(parse_error)
}

/// All string tables, indexed in switcher order
#[derive(Debug, Clone)]
pub struct Translations {
    tables: Vec<UiStrings>,
}

impl Translations {
    /// Parse every embedded table
    pub fn builtin() -> Result<Self, CatalogError> {
        let tables = Language::ALL
            .iter()
            .map(|&lang| parse_table(lang))
            .collect::<Result<Vec<UiStrings>, _>>()?;
        Ok(Self { tables })
    }

    pub fn get(&self, lang: Language) -> &UiStrings {
        let idx = Language::ALL.iter().position(|l| *l == lang).unwrap_or(0);
        &self.tables[idx]
    }
}

impl UiStrings {
    /// "<age> <yearsShort>" badge text
    pub fn age_badge(&self, age: &str) -> String {
        format!("{} {}", age, self.years_short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_parse() {
        let t = Translations::builtin().unwrap();
        assert_eq!(t.get(Language::En).btn_generate, "Generate cards");
        assert_eq!(t.get(Language::Sv).years_short, "år");
    }

    #[test]
    fn test_builtin_tables_have_no_empty_strings() {
        let t = Translations::builtin().unwrap();
        for lang in Language::ALL {
            let value = serde_json::from_str::<serde_json::Value>(embedded_table(lang)).unwrap();
            let map = value.as_object().unwrap();
            assert_eq!(map.len(), 42, "table {} has unexpected key count", lang);
            for (key, v) in map {
                assert!(
                    !v.as_str().unwrap_or("").trim().is_empty(),
                    "{}:{} is empty",
                    lang,
                    key
                );
            }
            assert!(!t.get(lang).alert_select.is_empty());
        }
    }

    #[test]
    fn test_age_badge() {
        let t = Translations::builtin().unwrap();
        assert_eq!(t.get(Language::En).age_badge("8-10"), "8-10 yrs");
    }
}
