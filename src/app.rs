//! Application state and key handling for the terminal UI.
//!
//! `App` wraps the [`AppState`] reducer with view state (focus, cursors,
//! modals), turns key presses into actions and carries out the effects the
//! reducer returns.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::export::{ExportOutcome, ExportUpdate, Exporter, run_batch, spawn_single};
use crate::models::{BucketFilter, Focus, InputMode};
use crate::state::{Action, AppState, Effect};
use crate::watcher::take_flag;

/// Blocking dialog shown over the main view
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Alert(String),
    /// Answered with y/n; only raised for the bulk export
    Confirm(String),
}

/// Application state
pub struct App {
    pub state: AppState,
    exporter: Arc<Exporter>,
    throttle: Duration,
    updates_tx: UnboundedSender<ExportUpdate>,
    updates_rx: UnboundedReceiver<ExportUpdate>,
    pub focus: Focus,
    pub input_mode: InputMode,
    // Cursor into the filtered activity list
    pub list_cursor: usize,
    // Index into the generated cards
    pub card_cursor: usize,
    pub modals: VecDeque<Modal>,
    pub catalog_needs_reload: Arc<Mutex<bool>>,
    pub output_dir: PathBuf,
    // Last export result shown in the status line
    pub status: Option<String>,
    pub session_start: Instant,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        state: AppState,
        exporter: Arc<Exporter>,
        throttle: Duration,
        output_dir: PathBuf,
    ) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Self {
            state,
            exporter,
            throttle,
            updates_tx,
            updates_rx,
            focus: Focus::default(),
            input_mode: InputMode::default(),
            list_cursor: 0,
            card_cursor: 0,
            modals: VecDeque::new(),
            catalog_needs_reload: Arc::new(Mutex::new(false)),
            output_dir,
            status: None,
            session_start: Instant::now(),
            should_quit: false,
        }
    }

    pub fn active_modal(&self) -> Option<&Modal> {
        self.modals.front()
    }

    /// Id of the activity under the list cursor
    pub fn cursor_activity_id(&self) -> Option<u32> {
        self.state.visible().get(self.list_cursor).map(|a| a.id)
    }

    /// Id of the generated card under the card cursor
    pub fn cursor_card_id(&self) -> Option<u32> {
        let cards = self.state.rendered_cards();
        cards.get(self.card_cursor).map(|c| c.id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(modal) = self.modals.front().cloned() {
            self.handle_modal_key(modal, key.code);
            return;
        }

        match self.input_mode {
            InputMode::Search => self.handle_search_key(key.code),
            InputMode::Normal => self.handle_normal_key(key.code),
        }
    }

    fn handle_modal_key(&mut self, modal: Modal, code: KeyCode) {
        match modal {
            Modal::Alert(_) => {
                if let KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ' | 'q') = code {
                    self.modals.pop_front();
                }
            }
            Modal::Confirm(_) => {
                let answer = match code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
                    _ => return,
                };
                self.modals.pop_front();
                self.dispatch(Action::ConfirmExportAll(answer));
            }
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                let mut search = self.state.filters.search.clone();
                search.pop();
                self.dispatch(Action::SetSearch(search));
            }
            KeyCode::Char(c) => {
                let mut search = self.state.filters.search.clone();
                search.push(c);
                self.dispatch(Action::SetSearch(search));
            }
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.toggle(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Char(' ') | KeyCode::Enter if self.focus == Focus::Catalog => {
                if let Some(id) = self.cursor_activity_id() {
                    self.dispatch(Action::Toggle(id));
                }
            }
            KeyCode::Enter | KeyCode::Char('e') if self.focus == Focus::Cards => {
                if let Some(id) = self.cursor_card_id() {
                    self.dispatch(Action::ExportCard(id));
                }
            }
            KeyCode::Char('s') => self.dispatch(Action::SelectAllVisible),
            KeyCode::Char('d') => self.dispatch(Action::DeselectAll),
            KeyCode::Char('g') => self.dispatch(Action::Generate),
            KeyCode::Char('x') => self.dispatch(Action::RequestExportAll),
            KeyCode::Char('l') => {
                let next = self.state.language().next();
                self.dispatch(Action::SetLanguage(next));
            }
            KeyCode::Char('a') => {
                let buckets = self.state.age_buckets();
                let next = self.state.filters.age.cycle(&buckets);
                self.dispatch(Action::SetAgeFilter(next));
            }
            KeyCode::Char('v') => {
                let buckets = self.state.level_buckets();
                let next = self.state.filters.level.cycle(&buckets);
                self.dispatch(Action::SetLevelFilter(next));
            }
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Esc => self.clear_filters(),
            _ => {}
        }
    }

    fn clear_filters(&mut self) {
        if self.state.filters.is_empty() {
            return;
        }
        self.dispatch(Action::SetAgeFilter(BucketFilter::All));
        self.dispatch(Action::SetLevelFilter(BucketFilter::All));
        self.dispatch(Action::SetSearch(String::new()));
    }

    fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.focus {
            Focus::Catalog => (&mut self.list_cursor, self.state.visible().len()),
            Focus::Cards => (&mut self.card_cursor, self.state.rendered_cards().len()),
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Keep cursors inside their lists after the lists change
    fn clamp_cursors(&mut self) {
        let visible = self.state.visible().len();
        self.list_cursor = self.list_cursor.min(visible.saturating_sub(1));
        let cards = self.state.rendered_cards().len();
        self.card_cursor = self.card_cursor.min(cards.saturating_sub(1));
    }

    pub fn dispatch(&mut self, action: Action) {
        let effect = self.state.dispatch(action);
        self.clamp_cursors();
        if let Some(effect) = effect {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Alert(msg) => self.modals.push_back(Modal::Alert(msg)),
            Effect::Confirm(question) => self.modals.push_back(Modal::Confirm(question)),
            Effect::ScrollToCards => {
                // Skipped silently when nothing resolved to a card
                if !self.state.rendered_cards().is_empty() {
                    self.focus = Focus::Cards;
                    self.card_cursor = 0;
                }
            }
            Effect::ExportOne(job) => {
                spawn_single(self.exporter.clone(), job, self.updates_tx.clone());
            }
            Effect::StartBatch(jobs) => {
                info!(
                    "Queued {} cards for export to {}",
                    jobs.len(),
                    self.output_dir.display()
                );
                tokio::spawn(run_batch(
                    self.exporter.clone(),
                    jobs,
                    self.throttle,
                    self.updates_tx.clone(),
                ));
            }
        }
    }

    /// Apply every export update received since the last call
    pub fn poll_exports(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            if let ExportUpdate::Card { id, outcome } = &update {
                self.status = Some(match outcome {
                    ExportOutcome::Saved(path) => format!("#{} → {}", id, path.display()),
                    ExportOutcome::Skipped => format!("#{} -", id),
                    ExportOutcome::Failed(msg) => format!("#{} ✗ {}", id, msg),
                });
            }
            self.dispatch(update.into());
        }
    }

    /// Reload the directory catalog if the watcher flagged a change
    pub fn reload_catalog_if_needed(&mut self) {
        if take_flag(&self.catalog_needs_reload) {
            let source = self.state.provider().describe();
            info!("Reloading catalog from {}", source);
            self.dispatch(Action::ReloadCatalog);
        }
    }
}
