//! Alert and confirmation dialogs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::Modal;
use crate::theme::{
    AMBER_WARNING, BG_SECONDARY, CYAN_PRIMARY, ROUNDED_BORDERS, TEXT_MUTED, TEXT_PRIMARY,
};

/// Rect of `width` x `height` centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

pub fn render_modal(modal: &Modal, area: Rect, frame: &mut Frame) {
    let (message, hint, border) = match modal {
        Modal::Alert(msg) => (msg.as_str(), "[Enter] OK", CYAN_PRIMARY),
        Modal::Confirm(msg) => (msg.as_str(), "[y] yes   [n] no", AMBER_WARNING),
    };

    let popup = centered_rect(area.width.saturating_mul(3) / 5, 7, area);
    frame.render_widget(Clear, popup);

    let footer = Line::from(Span::styled(format!(" {} ", hint), TEXT_MUTED)).centered();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(BG_SECONDARY))
        .title_bottom(footer);

    let text = Paragraph::new(Span::styled(message, TEXT_PRIMARY))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, popup);
}
