//! Application state and the reducer that mutates it
//!
//! Every user intent, from the TUI or the headless CLI, goes through
//! [`AppState::dispatch`]. Side effects the state cannot perform itself
//! (alerts, confirmation prompts, spawning exports) are returned as
//! [`Effect`]s for the caller to carry out.

use std::sync::Arc;

use log::{error, info, warn};

use crate::card::CardLayout;
use crate::catalog::CatalogProvider;
use crate::error::CatalogError;
use crate::export::{BatchReport, ExportJob, ExportOutcome, ExportUpdate};
use crate::filter::{FilterState, unique_ages, unique_levels};
use crate::i18n::{Translations, UiStrings};
use crate::models::{Activity, BucketFilter, Language, find_activity};
use crate::selection::Selection;

/// User intents and export notifications
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLanguage(Language),
    /// Re-read the current language from the provider
    ReloadCatalog,
    SetAgeFilter(BucketFilter),
    SetLevelFilter(BucketFilter),
    SetSearch(String),
    Toggle(u32),
    /// Add to the selection; selecting twice keeps the id
    Select(u32),
    SelectAllVisible,
    DeselectAll,
    Generate,
    ExportCard(u32),
    /// Ask to export every generated card
    RequestExportAll,
    /// Answer to the confirmation raised by `RequestExportAll`
    ConfirmExportAll(bool),
    CardExported { id: u32, outcome: ExportOutcome },
    BatchProgress(u8),
    BatchFinished(BatchReport),
}

impl From<ExportUpdate> for Action {
    fn from(update: ExportUpdate) -> Self {
        match update {
            ExportUpdate::Card { id, outcome } => Action::CardExported { id, outcome },
            ExportUpdate::Progress(p) => Action::BatchProgress(p),
            ExportUpdate::BatchFinished(report) => Action::BatchFinished(report),
        }
    }
}

/// Work the caller must perform after a dispatch
#[derive(Debug, Clone)]
pub enum Effect {
    /// Blocking message for the user
    Alert(String),
    /// Yes/no question; answer with `ConfirmExportAll`
    Confirm(String),
    /// Bring the first generated card into view
    ScrollToCards,
    ExportOne(ExportJob),
    StartBatch(Vec<ExportJob>),
}

/// Everything the generator knows about the current session
pub struct AppState {
    provider: Arc<dyn CatalogProvider>,
    translations: Translations,
    language: Language,
    catalog: Vec<Activity>,
    pub filters: FilterState,
    selection: Selection,
    generated: Vec<u32>,
    download_count: u32,
    batch_in_progress: bool,
    /// Set by `RequestExportAll`, consumed by `ConfirmExportAll`
    awaiting_confirmation: bool,
    progress: u8,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        translations: Translations,
        language: Language,
    ) -> Result<Self, CatalogError> {
        let catalog = provider.activities(language)?;
        info!(
            "Loaded {} activities for '{}' from {}",
            catalog.len(),
            language,
            provider.describe()
        );
        Ok(Self {
            provider,
            translations,
            language,
            catalog,
            filters: FilterState::default(),
            selection: Selection::new(),
            generated: Vec::new(),
            download_count: 0,
            batch_in_progress: false,
            awaiting_confirmation: false,
            progress: 0,
        })
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SetLanguage(lang) => self.load_language(lang),
            Action::ReloadCatalog => self.load_language(self.language),
            Action::SetAgeFilter(f) => {
                self.filters.age = f;
                None
            }
            Action::SetLevelFilter(f) => {
                self.filters.level = f;
                None
            }
            Action::SetSearch(text) => {
                self.filters.search = text;
                None
            }
            Action::Toggle(id) => {
                self.selection.toggle(id);
                None
            }
            Action::Select(id) => {
                self.selection.add(id);
                None
            }
            Action::SelectAllVisible => {
                let visible = self.filters.visible_ids(&self.catalog);
                self.selection.select_all(&visible);
                None
            }
            Action::DeselectAll => {
                self.selection.clear();
                None
            }
            Action::Generate => self.generate(),
            Action::ExportCard(id) => Some(Effect::ExportOne(self.export_job(id))),
            Action::RequestExportAll => {
                if self.generated.is_empty() || self.batch_in_progress {
                    return None;
                }
                self.awaiting_confirmation = true;
                Some(Effect::Confirm(self.ui().confirm_download.clone()))
            }
            Action::ConfirmExportAll(accepted) => self.start_batch(accepted),
            Action::CardExported { id, outcome } => {
                if outcome.is_saved() {
                    self.download_count += 1;
                } else if let ExportOutcome::Failed(msg) = outcome {
                    warn!("Card {} was not exported: {}", id, msg);
                }
                None
            }
            Action::BatchProgress(p) => {
                self.progress = p.min(100);
                None
            }
            Action::BatchFinished(report) => {
                info!(
                    "Batch report: {} attempted, {} saved, {} failed",
                    report.attempted,
                    report.saved,
                    report.failed.len()
                );
                self.batch_in_progress = false;
                Some(Effect::Alert(self.ui().alert_complete.clone()))
            }
        }
    }

    fn load_language(&mut self, lang: Language) -> Option<Effect> {
        match self.provider.activities(lang) {
            Ok(catalog) => {
                info!(
                    "Switched catalog to '{}' ({} activities)",
                    lang,
                    catalog.len()
                );
                self.language = lang;
                self.catalog = catalog;
                None
            }
            Err(e) => {
                error!("Failed to load catalog for '{}': {}", lang, e);
                Some(Effect::Alert(e.to_string()))
            }
        }
    }

    fn generate(&mut self) -> Option<Effect> {
        if self.selection.is_empty() {
            return Some(Effect::Alert(self.ui().alert_select.clone()));
        }
        self.generated = self.selection.ids().to_vec();
        info!("Generated {} cards", self.generated.len());
        Some(Effect::ScrollToCards)
    }

    fn start_batch(&mut self, accepted: bool) -> Option<Effect> {
        let pending = std::mem::take(&mut self.awaiting_confirmation);
        if !pending {
            warn!("Ignoring export confirmation with no pending request");
            return None;
        }
        if !accepted || self.generated.is_empty() || self.batch_in_progress {
            return None;
        }
        self.batch_in_progress = true;
        self.progress = 0;
        let jobs = self
            .generated
            .iter()
            .map(|&id| self.export_job(id))
            .collect();
        Some(Effect::StartBatch(jobs))
    }

    /// Job for `id`; `card` is empty unless `id` is generated and in the catalog
    pub fn export_job(&self, id: u32) -> ExportJob {
        ExportJob {
            id,
            card: self.rendered_card(id),
            title: find_activity(&self.catalog, id).map(|a| a.title.clone()),
        }
    }

    /// Card for a generated id that still resolves in the current catalog
    pub fn rendered_card(&self, id: u32) -> Option<CardLayout> {
        if !self.generated.contains(&id) {
            return None;
        }
        find_activity(&self.catalog, id)
            .map(|act| CardLayout::build(act, self.ui()))
    }

    /// Cards for the generated snapshot in order; unknown ids are dropped
    pub fn rendered_cards(&self) -> Vec<CardLayout> {
        self.generated
            .iter()
            .filter_map(|&id| find_activity(&self.catalog, id))
            .map(|act| CardLayout::build(act, self.ui()))
            .collect()
    }

    pub fn visible(&self) -> Vec<&Activity> {
        self.filters.apply(&self.catalog)
    }

    pub fn age_buckets(&self) -> Vec<String> {
        unique_ages(&self.catalog)
    }

    pub fn level_buckets(&self) -> Vec<String> {
        unique_levels(&self.catalog)
    }

    pub fn ui(&self) -> &UiStrings {
        self.translations.get(self.language)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn catalog(&self) -> &[Activity] {
        &self.catalog
    }

    pub fn provider(&self) -> &dyn CatalogProvider {
        self.provider.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, id: u32) -> bool {
        self.selection.contains(id)
    }

    pub fn generated(&self) -> &[u32] {
        &self.generated
    }

    pub fn download_count(&self) -> u32 {
        self.download_count
    }

    pub fn batch_in_progress(&self) -> bool {
        self.batch_in_progress
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }
}
