//! Generated card preview
//!
//! Text rendition of the same [`CardLayout`] that gets rasterized on export.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::card::CardLayout;
use crate::models::Focus;
use crate::theme::{
    CARD_ACCENT, CARD_HEADER, CYAN_PRIMARY, ROUNDED_BORDERS, TEXT_MUTED, TEXT_PRIMARY,
    TEXT_SECONDARY, panel_border,
};
use crate::utils::wrap_text;

fn section_label(text: &str) -> Line<'static> {
    let style = Style::new().fg(CARD_ACCENT).add_modifier(Modifier::BOLD);
    Line::styled(text.to_uppercase(), style)
}

fn wrapped(text: &str, width: usize, indent: &str, style: Style) -> Vec<Line<'static>> {
    let width = width.saturating_sub(indent.chars().count());
    wrap_text(text, width)
        .into_iter()
        .map(|l| Line::styled(format!("{indent}{l}"), style))
        .collect()
}

/// Lines for one card at the given inner width
pub fn card_lines(card: &CardLayout, width: usize) -> Vec<Line<'static>> {
    let body = Style::new().fg(TEXT_PRIMARY);
    let bold = body.add_modifier(Modifier::BOLD);
    let italic = body.add_modifier(Modifier::ITALIC);
    let muted = Style::new().fg(TEXT_SECONDARY);
    let faint = Style::new().fg(TEXT_MUTED);
    let banner = Style::new()
        .fg(Color::White)
        .bg(CARD_HEADER)
        .add_modifier(Modifier::BOLD);
    let h = &card.header;
    let p = &card.primary;
    let s = &card.secondary;

    let badges = format!("[{}] [{}]", h.level_badge, h.age_badge);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} {} ", h.icon, h.title), banner),
            Span::styled(format!(" {}", h.watermark), faint),
        ]),
        Line::from(vec![
            Span::styled(format!(" {} ", h.theme), muted),
            Span::styled(badges, Style::new().fg(CYAN_PRIMARY)),
        ]),
        Line::default(),
        section_label(&p.concept_label),
    ];
    lines.extend(wrapped(&p.concept, width, "  ", bold));
    lines.push(Line::default());
    lines.push(section_label(&p.description_label));
    lines.extend(wrapped(&p.description, width, "  ", body));
    lines.push(Line::default());
    lines.push(section_label(&p.rhetoric_label));
    lines.extend(wrapped(&p.rhetoric, width, "  ", italic));
    lines.push(Line::default());

    lines.push(section_label(&s.focus_label));
    for point in &s.focus_points {
        let point_lines = wrap_text(point, width.saturating_sub(4));
        for (i, l) in point_lines.into_iter().enumerate() {
            let prefix = if i == 0 { "  • " } else { "    " };
            lines.push(Line::styled(format!("{prefix}{l}"), body));
        }
    }
    lines.push(Line::default());
    lines.push(section_label(&s.examples_label));
    for example in &s.examples {
        let quoted = format!("\u{201c}{}\u{201d}", example);
        lines.extend(wrapped(&quoted, width, "  ", italic));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", s.materials_label), muted),
        Span::styled(s.materials.clone(), body),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", s.duration_label), muted),
        Span::styled(s.duration.clone(), body),
    ]));
    lines.push(Line::default());
    let credit = format!("{} · {}", card.footer.credit, card.footer.author);
    lines.push(Line::styled(credit, faint));
    lines
}

pub fn render_card_preview(area: Rect, app: &App, frame: &mut Frame) {
    let ui = app.state.ui();
    let cards = app.state.rendered_cards();
    let position = app.card_cursor + 1;

    let title = if cards.is_empty() {
        format!(" {} ", ui.card_overview)
    } else {
        format!(" {} {}/{} ", ui.card_overview, position, cards.len())
    };
    let footer = Line::from(format!(" [e] {} ", ui.download_single)).right_aligned();
    let block = Block::default()
        .title(title)
        .title_bottom(footer)
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(panel_border(app.focus == Focus::Cards));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(card) = cards.get(app.card_cursor) else {
        let muted = Style::new().fg(TEXT_MUTED);
        let hint = Paragraph::new(Span::styled(ui.alert_generate.as_str(), muted))
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    };

    let lines = card_lines(card, inner.width as usize);
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Translations;
    use crate::models::Language;
    use crate::models::activity::sample;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_card_lines_contain_sections() {
        let tr = Translations::builtin().unwrap();
        let act = sample(5, "Story Power", "Narrative", "8-10", "Beginner");
        let card = CardLayout::build(&act, tr.get(Language::En));
        let text = plain(&card_lines(&card, 60));

        assert!(text[0].contains("Story Power"));
        assert!(text[0].contains("#5"));
        assert!(text.iter().any(|l| l == "KEY CONCEPT"));
        assert!(text.iter().any(|l| l.contains("• One")));
        assert!(text.iter().any(|l| l.contains("\u{201c}Example\u{201d}")));
    }

    #[test]
    fn test_card_lines_respect_width() {
        let tr = Translations::builtin().unwrap();
        let mut act = sample(1, "T", "Theme", "8-10", "Beginner");
        act.description = "word ".repeat(40);
        let card = CardLayout::build(&act, tr.get(Language::En));
        let text = plain(&card_lines(&card, 30));
        let desc_lines: Vec<&String> = text.iter().filter(|l| l.starts_with("  word")).collect();
        assert!(desc_lines.len() > 1);
        assert!(desc_lines.iter().all(|l| l.chars().count() <= 30));
    }
}
