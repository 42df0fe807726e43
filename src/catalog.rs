//! Catalog providers
//!
//! A provider maps a [`Language`] to the full, ordered list of activities
//! translated into that language. The built-in catalog is embedded in the
//! binary; a directory catalog reads `<dir>/<lang>.json` so an instructor can
//! ship their own activity set.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::CatalogError;
use crate::models::{Activity, Language};

/// Source of translated activity records
pub trait CatalogProvider: Send + Sync {
    /// Full ordered catalog for `lang`
    fn activities(&self, lang: Language) -> Result<Vec<Activity>, CatalogError>;

    /// Human readable origin, used in logs and the header
    fn describe(&self) -> String;
}

/// Parse a JSON array of activities and reject duplicate ids
pub fn parse_catalog(lang: Language, json: &str) -> Result<Vec<Activity>, CatalogError> {
    let parse_error = |source| CatalogError::Parse {
        lang: lang.code().to_string(),
        source,
    };
    let activities: Vec<Activity> = serde_json::from_str(json).map_err(parse_error)?;

    let mut seen = HashSet::new();
    for act in &activities {
        if !seen.insert(act.id) {
            return Err(CatalogError::DuplicateId {
                lang: lang.code().to_string(),
                id: act.id,
            });
        }
    }
    Ok(activities)
}

/// Catalog compiled into the binary
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    fn source(lang: Language) -> &'static str {
        match lang {
            Language::En => include_str!("../data/activities/en.json"),
            Language::El => include_str!("../data/activities/el.json"),
            Language::Es => include_str!("../data/activities/es.json"),
            Language::Sv => include_str!("../data/activities/sv.json"),
            Language::It => include_str!("../data/activities/it.json"),
        }
    }
}

impl CatalogProvider for BuiltinCatalog {
    fn activities(&self, lang: Language) -> Result<Vec<Activity>, CatalogError> {
        parse_catalog(lang, Self::source(lang))
    }

    fn describe(&self) -> String {
        "built-in".to_string()
    }
}

/// Catalog read from `<dir>/<lang>.json` on every language switch
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, lang: Language) -> PathBuf {
        self.dir.join(format!("{}.json", lang.code()))
    }
}

impl CatalogProvider for DirectoryCatalog {
    fn activities(&self, lang: Language) -> Result<Vec<Activity>, CatalogError> {
        let path = self.path_for(lang);
        let content = std::fs::read_to_string(&path)
            .map_err(|source| CatalogError::Read { path, source })?;
        parse_catalog(lang, &content)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Languages whose id sequence differs from the English catalog.
///
/// Selections survive language switches, so this is checked at startup and
/// any mismatch is logged.
pub fn languages_with_mismatched_ids(provider: &dyn CatalogProvider) -> Vec<Language> {
    let reference: Vec<u32> = match provider.activities(Language::En) {
        Ok(acts) => acts.iter().map(|a| a.id).collect(),
        Err(_) => return Language::ALL.to_vec(),
    };

    Language::ALL
        .iter()
        .copied()
        .filter(|&lang| match provider.activities(lang) {
            Ok(acts) => acts.iter().map(|a| a.id).collect::<Vec<_>>() != reference,
            Err(_) => true,
        })
        .collect()
}
