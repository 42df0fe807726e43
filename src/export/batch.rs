//! Sequential bulk export
//!
//! Cards are exported one at a time in snapshot order with a fixed pause
//! after each attempt. Progress and outcomes are streamed to the UI loop
//! over an unbounded channel.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{ExportJob, ExportOutcome, Exporter};
use crate::utils::percent;

/// Messages from export tasks to the event loop
#[derive(Debug, Clone, PartialEq)]
pub enum ExportUpdate {
    /// One card finished, single or batch
    Card { id: u32, outcome: ExportOutcome },
    /// Batch progress, 0..=100
    Progress(u8),
    BatchFinished(BatchReport),
}

/// Tally of a finished batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub attempted: usize,
    pub saved: usize,
    pub skipped: usize,
    pub failed: Vec<u32>,
}

impl BatchReport {
    fn record(&mut self, id: u32, outcome: &ExportOutcome) {
        self.attempted += 1;
        match outcome {
            ExportOutcome::Saved(_) => self.saved += 1,
            ExportOutcome::Skipped => self.skipped += 1,
            ExportOutcome::Failed(_) => self.failed.push(id),
        }
    }
}

/// Run the export on the blocking pool; a panicked worker counts as a failure
async fn export_blocking(exporter: Arc<Exporter>, job: ExportJob) -> ExportOutcome {
    let id = job.id;
    match tokio::task::spawn_blocking(move || exporter.export(&job)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Export worker for card {} died: {}", id, e);
            ExportOutcome::Failed(e.to_string())
        }
    }
}

/// Export every job in order, pausing `throttle` after each attempt.
///
/// Sends one `Card` and one `Progress` update per job, then `BatchFinished`.
/// A closed channel does not stop the batch.
pub async fn run_batch(
    exporter: Arc<Exporter>,
    jobs: Vec<ExportJob>,
    throttle: Duration,
    updates: mpsc::UnboundedSender<ExportUpdate>,
) -> BatchReport {
    let total = jobs.len();
    let mut report = BatchReport::default();
    info!("Starting bulk export of {} cards", total);

    for (i, job) in jobs.into_iter().enumerate() {
        let id = job.id;
        let outcome = export_blocking(exporter.clone(), job).await;
        report.record(id, &outcome);

        let _ = updates.send(ExportUpdate::Card { id, outcome });
        let _ = updates.send(ExportUpdate::Progress(percent(i + 1, total)));

        tokio::time::sleep(throttle).await;
    }

    if report.failed.is_empty() {
        info!(
            "Bulk export finished: {} saved, {} skipped",
            report.saved, report.skipped
        );
    } else {
        warn!(
            "Bulk export finished: {} saved, {} skipped, failed ids {:?}",
            report.saved, report.skipped, report.failed
        );
    }
    let _ = updates.send(ExportUpdate::BatchFinished(report.clone()));
    report
}

/// Export one card in the background and report it as a `Card` update
pub fn spawn_single(
    exporter: Arc<Exporter>,
    job: ExportJob,
    updates: mpsc::UnboundedSender<ExportUpdate>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let id = job.id;
        let outcome = export_blocking(exporter, job).await;
        let _ = updates.send(ExportUpdate::Card { id, outcome });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardLayout;
    use crate::export::testing::{MemorySink, exporter};
    use crate::i18n::Translations;
    use crate::models::Language;
    use crate::models::activity::sample;

    fn jobs(titles: &[(u32, &str)]) -> Vec<ExportJob> {
        let tr = Translations::builtin().unwrap();
        titles
            .iter()
            .map(|&(id, title)| {
                let act = sample(id, title, "Theme", "8-10", "Beginner");
                ExportJob {
                    id,
                    card: Some(CardLayout::build(&act, tr.get(Language::En))),
                    title: Some(title.to_string()),
                }
            })
            .collect()
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ExportUpdate>) -> Vec<ExportUpdate> {
        let mut out = Vec::new();
        while let Ok(update) = rx.try_recv() {
            out.push(update);
        }
        out
    }

    #[tokio::test]
    async fn test_batch_progress_sequence() {
        let sink = Arc::new(MemorySink::default());
        let exp = Arc::new(exporter(None, sink.clone()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let batch = jobs(&[(1, "a"), (2, "b"), (3, "c")]);
        let report = run_batch(exp, batch, Duration::from_millis(1), tx).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.saved, 3);

        let progress: Vec<u8> = drain(&mut rx)
            .into_iter()
            .filter_map(|u| match u {
                ExportUpdate::Progress(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![33, 67, 100]);

        let expected = [
            "rhetoric_card_1_a.jpg",
            "rhetoric_card_2_b.jpg",
            "rhetoric_card_3_c.jpg",
        ];
        assert_eq!(sink.names(), expected);
    }

    #[tokio::test]
    async fn test_batch_failure_does_not_halt() {
        let sink = Arc::new(MemorySink::default());
        let exp = Arc::new(exporter(Some("Broken"), sink.clone()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut batch = jobs(&[(1, "ok"), (2, "Broken"), (3, "fine")]);
        batch.push(ExportJob {
            id: 4,
            card: None,
            title: None,
        });
        let report = run_batch(exp, batch, Duration::from_millis(1), tx).await;

        assert_eq!(report.attempted, 4);
        assert_eq!(report.saved, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, vec![2]);
        assert_eq!(sink.saved.lock().unwrap().len(), 2);

        let updates = drain(&mut rx);
        let finished = ExportUpdate::BatchFinished(report);
        assert_eq!(updates.last(), Some(&finished));
        let cards = updates
            .iter()
            .filter(|u| matches!(u, ExportUpdate::Card { .. }))
            .count();
        assert_eq!(cards, 4);
    }

    #[tokio::test]
    async fn test_batch_of_eight_reaches_full_progress() {
        let sink = Arc::new(MemorySink::default());
        let exp = Arc::new(exporter(None, sink));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let titles: Vec<(u32, &str)> = (1..=8).map(|i| (i, "card")).collect();
        run_batch(exp, jobs(&titles), Duration::from_millis(1), tx).await;

        let progress: Vec<u8> = drain(&mut rx)
            .into_iter()
            .filter_map(|u| match u {
                ExportUpdate::Progress(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![13, 25, 38, 50, 63, 75, 88, 100]);
    }

    #[tokio::test]
    async fn test_batch_waits_between_items() {
        let sink = Arc::new(MemorySink::default());
        let exp = Arc::new(exporter(None, sink));
        let (tx, _rx) = mpsc::unbounded_channel();

        let start = std::time::Instant::now();
        let batch = jobs(&[(1, "a"), (2, "b")]);
        run_batch(exp, batch, Duration::from_millis(50), tx).await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_spawn_single_reports_outcome() {
        let sink = Arc::new(MemorySink::default());
        let exp = Arc::new(exporter(None, sink));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let job = jobs(&[(5, "Solo")]).remove(0);
        spawn_single(exp, job, tx).await.unwrap();

        match rx.recv().await {
            Some(ExportUpdate::Card { id, outcome }) => {
                assert_eq!(id, 5);
                assert!(outcome.is_saved());
            }
            other => panic!("unexpected update {:?}", other),
        }
    }
}
