//! `list` and `export` without the terminal UI
//!
//! Both commands drive the same [`AppState`] reducer as the interactive UI;
//! effects are answered on stdin/stdout instead of with modals.

use std::sync::Arc;
use std::time::Duration;

use log::error;
use tokio::sync::mpsc;

use super::args::FilterArgs;
use super::prompts::{confirm, print_activities};
use crate::error::Result;
use crate::export::{ExportOutcome, ExportUpdate, Exporter, run_batch};
use crate::state::{Action, AppState, Effect};

pub fn run_list(mut state: AppState, filters: &FilterArgs) {
    state.filters = filters.to_filter_state();
    let ui = state.ui();
    let title = format!("{} ({})", ui.title, state.language());
    print_activities(&title, &state.visible(), &ui.no_results);
}

/// Select, generate and bulk-export. Returns the number of saved cards.
pub async fn run_export(
    mut state: AppState,
    exporter: Arc<Exporter>,
    throttle: Duration,
    filters: &FilterArgs,
    ids: &[u32],
    all: bool,
    yes: bool,
) -> Result<u32> {
    state.filters = filters.to_filter_state();
    if !ids.is_empty() {
        for &id in ids {
            state.dispatch(Action::Select(id));
        }
    } else if all {
        state.dispatch(Action::SelectAllVisible);
    }

    if let Some(Effect::Alert(msg)) = state.dispatch(Action::Generate) {
        eprintln!("{}", msg);
        return Ok(0);
    }

    let accepted = match state.dispatch(Action::RequestExportAll) {
        Some(Effect::Confirm(question)) => {
            let question = format!("{} ({})", question, state.generated().len());
            yes || confirm(&question)?
        }
        _ => false,
    };

    let jobs = match state.dispatch(Action::ConfirmExportAll(accepted)) {
        Some(Effect::StartBatch(jobs)) => jobs,
        _ => return Ok(0),
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let batch = tokio::spawn(run_batch(exporter, jobs, throttle, tx));

    while let Some(update) = rx.recv().await {
        match &update {
            ExportUpdate::Card { id, outcome } => match outcome {
                ExportOutcome::Saved(path) => println!("  ✓ #{} {}", id, path.display()),
                ExportOutcome::Skipped => println!("  - #{} skipped", id),
                ExportOutcome::Failed(msg) => println!("  ✗ #{} {}", id, msg),
            },
            ExportUpdate::Progress(p) => println!("  {}%", p),
            ExportUpdate::BatchFinished(_) => {}
        }
        if let Some(Effect::Alert(msg)) = state.dispatch(update.into()) {
            println!();
            println!("{}", msg);
        }
    }

    if let Err(e) = batch.await {
        error!("Bulk export task failed: {}", e);
    }
    Ok(state.download_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuiltinCatalog;
    use crate::export::testing::{MemorySink, exporter};
    use crate::i18n::Translations;
    use crate::models::Language;

    fn state() -> AppState {
        AppState::new(
            Arc::new(BuiltinCatalog),
            Translations::builtin().unwrap(),
            Language::En,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_export_selected_ids_in_order() {
        let sink = Arc::new(MemorySink::default());
        let exp = Arc::new(exporter(None, sink.clone()));

        let saved = run_export(
            state(),
            exp,
            Duration::from_millis(1),
            &FilterArgs::default(),
            &[7, 2],
            false,
            true,
        )
        .await
        .unwrap();

        assert_eq!(saved, 2);
        let expected = [
            "rhetoric_card_7_question_time.jpg",
            "rhetoric_card_2_ethos___pathos_.jpg",
        ];
        assert_eq!(sink.names(), expected);
    }

    #[tokio::test]
    async fn test_repeated_ids_export_once() {
        let sink = Arc::new(MemorySink::default());
        let exp = Arc::new(exporter(None, sink.clone()));

        let saved = run_export(
            state(),
            exp,
            Duration::from_millis(1),
            &FilterArgs::default(),
            &[3, 3],
            false,
            true,
        )
        .await
        .unwrap();

        assert_eq!(saved, 1);
        assert_eq!(sink.names(), ["rhetoric_card_3_the_perfect_hook.jpg"]);
    }

    #[tokio::test]
    async fn test_export_all_honours_filters() {
        let sink = Arc::new(MemorySink::default());
        let exp = Arc::new(exporter(None, sink.clone()));
        let filters = FilterArgs {
            level: Some("Advanced".to_string()),
            ..Default::default()
        };

        let throttle = Duration::from_millis(1);
        let saved = run_export(state(), exp, throttle, &filters, &[], true, true)
            .await
            .unwrap();

        assert_eq!(saved, 2);
        assert_eq!(sink.saved.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_export_without_selection_does_nothing() {
        let sink = Arc::new(MemorySink::default());
        let exp = Arc::new(exporter(None, sink.clone()));

        let saved = run_export(
            state(),
            exp,
            Duration::from_millis(1),
            &FilterArgs::default(),
            &[],
            false,
            true,
        )
        .await
        .unwrap();

        assert_eq!(saved, 0);
        assert!(sink.saved.lock().unwrap().is_empty());
    }
}
