//! UI module for rhetoric-cards
//!
//! Screen layout plus the widgets for the header, stat cards, filter bar,
//! activity list, card preview and dialogs.

mod cards;
mod header;
mod list;
mod modal;
mod stats;

use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph},
};

use crate::app::App;
use crate::models::InputMode;
use crate::theme::{BG_PRIMARY, BG_SECONDARY, CYAN_PRIMARY, GREEN_ACTIVE, RED_ERROR, TEXT_MUTED};
use crate::utils::format_duration;

pub use cards::render_card_preview;
pub use header::{render_filter_bar, render_header};
pub use list::render_activity_list;
pub use modal::render_modal;
pub use stats::render_stat_cards;

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(
        ratatui::widgets::Block::default().style(Style::default().bg(BG_PRIMARY)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(4), // Stat cards
            Constraint::Length(1), // Filter bar
            Constraint::Min(6),    // Activity list + card preview
            Constraint::Length(1), // Progress / status
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_header(rows[0], app, frame);

    let ui = app.state.ui();
    let downloaded = app.state.download_count() as usize;
    let stats = [
        (app.state.catalog().len(), ui.stats_total.as_str()),
        (app.state.selection().len(), ui.stats_selected.as_str()),
        (app.state.generated().len(), ui.stats_generated.as_str()),
        (downloaded, ui.stats_downloaded.as_str()),
    ];
    render_stat_cards(rows[1], &stats, frame);

    render_filter_bar(rows[2], app, frame);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[3]);
    render_activity_list(panels[0], app, frame);
    render_card_preview(panels[1], app, frame);

    render_status(rows[4], app, frame);
    render_key_hints(rows[5], app, frame);

    if let Some(modal) = app.active_modal() {
        render_modal(modal, area, frame);
    }
}

/// Bulk export gauge while a batch runs, otherwise the last export result
fn render_status(area: Rect, app: &App, frame: &mut Frame) {
    if app.state.batch_in_progress() {
        let ui = app.state.ui();
        let progress = app.state.progress();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(GREEN_ACTIVE).bg(BG_SECONDARY))
            .percent(progress as u16)
            .label(format!("{} {}%", ui.btn_download, progress));
        frame.render_widget(gauge, area);
        return;
    }

    let (text, color) = match &app.status {
        Some(s) if s.contains('✗') => (s.clone(), RED_ERROR),
        Some(s) => (s.clone(), TEXT_MUTED),
        None => (format!("→ {}", app.output_dir.display()), TEXT_MUTED),
    };
    let elapsed = format_duration(app.session_start.elapsed());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(7)])
        .split(area);
    let status = Paragraph::new(Span::styled(format!(" {}", text), color));
    frame.render_widget(status, columns[0]);
    let clock = Paragraph::new(Span::styled(elapsed, TEXT_MUTED)).alignment(Alignment::Right);
    frame.render_widget(clock, columns[1]);
}

fn render_key_hints(area: Rect, app: &App, frame: &mut Frame) {
    let ui = app.state.ui();
    let hints = match app.input_mode {
        InputMode::Search => format!(" {}: type | Enter/Esc: done ", ui.label_search),
        InputMode::Normal => format!(
            " q: Quit | Tab: Focus | Space: Toggle | s: {} | d: {} | g: {} | x: {} | a/v: Filters | /: Search | l: Language ",
            ui.btn_select_all, ui.btn_deselect_all, ui.btn_generate, ui.btn_download
        ),
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::Black).bg(CYAN_PRIMARY)),
        area,
    );
}
