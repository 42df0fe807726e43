//! Stat card rendering functions

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::theme::{BG_SECONDARY, BORDER_SUBTLE, CYAN_PRIMARY, ROUNDED_BORDERS, TEXT_MUTED};

/// Render one stat card per `(value, label)` pair, splitting `area` evenly
pub fn render_stat_cards(area: Rect, stats: &[(usize, &str)], frame: &mut Frame) {
    if stats.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, stats.len() as u32); stats.len()];
    let card_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (&(value, label), &card_area) in stats.iter().zip(card_layout.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED_BORDERS)
            .border_style(Style::default().fg(BORDER_SUBTLE))
            .style(Style::default().bg(BG_SECONDARY));

        let content = vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default()
                    .fg(CYAN_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                label.to_uppercase(),
                Style::default().fg(TEXT_MUTED),
            )),
        ];

        let paragraph = Paragraph::new(content)
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, card_area);
    }
}
