//! Activity list with selection checkboxes

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::models::Focus;
use crate::theme::{
    BG_TERTIARY, ROUNDED_BORDERS, SELECTED_MARK, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
    panel_border,
};

/// Lines per activity entry
const ROW_HEIGHT: usize = 2;

/// First entry to draw so that `cursor` stays on screen
pub fn scroll_offset(cursor: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return cursor;
    }
    cursor.saturating_sub(visible_rows - 1)
}

pub fn render_activity_list(area: Rect, app: &App, frame: &mut Frame) {
    let ui = app.state.ui();
    let visible = app.state.visible();
    let focused = app.focus == Focus::Catalog;

    let block = Block::default()
        .title(format!(" {} ({}) ", ui.stats_total, visible.len()))
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(panel_border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if visible.is_empty() {
        let empty = Paragraph::new(Span::styled(ui.no_results.as_str(), TEXT_MUTED))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let rows = inner.height as usize / ROW_HEIGHT;
    let offset = scroll_offset(app.list_cursor, rows);
    let width = inner.width.saturating_sub(8) as usize;

    let bold = Style::new().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD);
    let mut lines = Vec::with_capacity(rows * ROW_HEIGHT);
    for (i, act) in visible.iter().enumerate().skip(offset).take(rows) {
        let selected = app.state.is_selected(act.id);
        let (mark, mark_color) = if selected {
            ("[x]", SELECTED_MARK)
        } else {
            ("[ ]", TEXT_MUTED)
        };
        let row_bg = if focused && i == app.list_cursor {
            BG_TERTIARY
        } else {
            Color::Reset
        };

        let row_style = Style::default().bg(row_bg);

        let title_line = Line::from(vec![
            Span::styled(format!("{} ", mark), mark_color),
            Span::styled(act.format_row(width), bold),
        ]);
        lines.push(title_line.style(row_style));

        let meta = format!(
            "    #{} · {} · {} · {}",
            act.id,
            ui.age_badge(&act.age),
            act.level,
            act.theme_line()
        );
        let meta_line = Line::from(Span::styled(meta, TEXT_SECONDARY));
        lines.push(meta_line.style(row_style));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(5, 5), 1);
        assert_eq!(scroll_offset(9, 5), 5);
        assert_eq!(scroll_offset(3, 0), 3);
    }
}
