//! Header, language switcher and filter bar

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::App;
use crate::models::{BucketFilter, InputMode, Language};
use crate::theme::{
    AMBER_WARNING, BG_SECONDARY, CYAN_DIM, CYAN_PRIMARY, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};

/// Title, subtitle and badge on the left, language switcher on the right
pub fn render_header(area: Rect, app: &App, frame: &mut Frame) {
    let ui = app.state.ui();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(22)])
        .split(area);

    let title = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", ui.title),
                Style::default()
                    .fg(CYAN_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {} ", ui.badge_title), TEXT_MUTED),
        ]),
        Line::styled(format!(" {}", ui.subtitle), TEXT_SECONDARY),
    ];
    frame.render_widget(Paragraph::new(title), columns[0]);

    let switcher: Vec<Span> = Language::ALL
        .iter()
        .map(|&lang| {
            let label = format!(" {} ", lang.code().to_uppercase());
            if lang == app.state.language() {
                Span::styled(
                    label,
                    Style::default()
                        .fg(BG_SECONDARY)
                        .bg(CYAN_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(label, Style::default().fg(CYAN_DIM))
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(switcher)).alignment(Alignment::Right),
        columns[1],
    );
}

fn bucket_label<'a>(filter: &'a BucketFilter, all_label: &'a str) -> &'a str {
    match filter {
        BucketFilter::All => all_label,
        BucketFilter::Only(bucket) => bucket,
    }
}

/// One-line filter summary: age, level and search box
pub fn render_filter_bar(area: Rect, app: &App, frame: &mut Frame) {
    let ui = app.state.ui();
    let filters = &app.state.filters;
    let label = Style::default().fg(TEXT_MUTED);
    let value = Style::new().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD);

    let searching = app.input_mode == InputMode::Search;
    let search_style = if searching {
        Style::default().fg(AMBER_WARNING)
    } else {
        value
    };
    let cursor = if searching { "▏" } else { "" };

    let age = bucket_label(&filters.age, &ui.opt_all_ages);
    let level = bucket_label(&filters.level, &ui.opt_all_levels);
    let mut spans = vec![
        Span::styled(format!(" {} ", ui.filter_title), CYAN_PRIMARY),
        Span::styled(format!("{}: ", ui.label_age), label),
        Span::styled(age.to_string(), value),
        Span::styled(format!("   {}: ", ui.label_level), label),
        Span::styled(level.to_string(), value),
        Span::styled(format!("   {}: ", ui.label_search), label),
        Span::styled(format!("{}{}", filters.search, cursor), search_style),
    ];
    if !filters.is_empty() && !searching {
        spans.push(Span::styled("   Esc: clear filters", label));
    }
    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(BG_SECONDARY));
    frame.render_widget(bar, area);
}
