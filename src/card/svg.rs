//! SVG markup for a card
//!
//! Fixed 800x566 landscape template (about 1.414:1). Text is wrapped by an
//! estimated glyph width, so long content may run past its region.

use std::fmt::Write;

use super::CardLayout;
use crate::utils::wrap_text;

pub const CARD_WIDTH: u32 = 800;
pub const CARD_HEIGHT: u32 = 566;

const CARD_W: i32 = CARD_WIDTH as i32;
const CARD_H: i32 = CARD_HEIGHT as i32;
const HEADER_HEIGHT: i32 = 120;
const FOOTER_HEIGHT: i32 = 24;
const PAD: i32 = 32;
const LEFT_X: i32 = PAD;
const LEFT_W: i32 = 410;
const DIVIDER_X: i32 = LEFT_X + LEFT_W + 16;
const RIGHT_X: i32 = DIVIDER_X + 16;
const RIGHT_W: i32 = CARD_W - PAD - RIGHT_X;
const BODY_TOP: i32 = HEADER_HEIGHT + PAD;
const BODY_BOTTOM: i32 = CARD_H - FOOTER_HEIGHT - 24;

const FONT: &str = "sans-serif";

/// Escape text for XML content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Characters that fit in `width` pixels at `size`
fn chars_for(width: i32, size: f32) -> usize {
    ((width as f32) / (size * 0.55)).floor().max(1.0) as usize
}

#[derive(Clone, Copy)]
struct TextStyle<'a> {
    size: f32,
    fill: &'a str,
    weight: &'a str,
    italic: bool,
    anchor: &'a str,
    opacity: f32,
    /// Distance between wrapped lines
    leading: i32,
}

impl<'a> TextStyle<'a> {
    fn new(size: f32, fill: &'a str) -> Self {
        Self {
            size,
            fill,
            weight: "normal",
            italic: false,
            anchor: "start",
            opacity: 1.0,
            leading: 0,
        }
    }

    fn bold(mut self) -> Self {
        self.weight = "bold";
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn end(mut self) -> Self {
        self.anchor = "end";
        self
    }

    fn middle(mut self) -> Self {
        self.anchor = "middle";
        self
    }

    fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    fn leading(mut self, leading: i32) -> Self {
        self.leading = leading;
        self
    }
}

struct SvgWriter {
    out: String,
}

impl SvgWriter {
    fn new() -> Self {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CARD_WIDTH}" height="{CARD_HEIGHT}" viewBox="0 0 {CARD_WIDTH} {CARD_HEIGHT}">"#
        );
        Self { out }
    }

    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, fill: &str, rx: i32, opacity: f32) {
        let _ = write!(
            self.out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" fill="{fill}" fill-opacity="{opacity}"/>"#
        );
    }

    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, stroke: &str) {
        let _ = write!(
            self.out,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="1"/>"#
        );
    }

    fn circle(&mut self, cx: i32, cy: i32, r: i32, fill: &str, opacity: f32) {
        let _ = write!(
            self.out,
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" fill-opacity="{opacity}"/>"#
        );
    }

    /// Write pre-wrapped lines; returns the baseline after the last line
    fn text(&mut self, x: i32, y: i32, lines: &[String], style: TextStyle) -> i32 {
        let TextStyle {
            size,
            fill,
            weight,
            italic,
            anchor,
            opacity,
            leading,
        } = style;
        let font_style = if italic { "italic" } else { "normal" };
        let _ = write!(
            self.out,
            r#"<text x="{x}" y="{y}" font-family="{FONT}" font-size="{size}" font-weight="{weight}" font-style="{font_style}" fill="{fill}" fill-opacity="{opacity}" text-anchor="{anchor}">"#
        );
        for (i, line) in lines.iter().enumerate() {
            let dy = if i == 0 { 0 } else { leading };
            let line = escape_xml(line);
            let _ = write!(self.out, r#"<tspan x="{x}" dy="{dy}">{line}</tspan>"#);
        }
        self.out.push_str("</text>");
        y + leading * (lines.len() as i32 - 1).max(0)
    }

    fn text_line(&mut self, x: i32, y: i32, text: &str, style: TextStyle) {
        self.text(x, y, &[text.to_string()], style);
    }

    /// Section label, uppercased
    fn caption(&mut self, x: i32, y: i32, text: &str, style: TextStyle) {
        self.text_line(x, y, &text.to_uppercase(), style);
    }

    fn finish(mut self) -> String {
        self.out.push_str("</svg>");
        self.out
    }
}

/// Render the full card document
pub fn render_svg(card: &CardLayout) -> String {
    let mut svg = SvgWriter::new();
    svg.rect(0, 0, CARD_W, CARD_H, "#ffffff", 0, 1.0);

    render_header(&mut svg, card);
    render_primary(&mut svg, card);
    svg.line(DIVIDER_X, BODY_TOP, DIVIDER_X, BODY_BOTTOM, "#f1f5f9");
    render_secondary(&mut svg, card);
    render_footer(&mut svg, card);

    svg.finish()
}

fn render_header(svg: &mut SvgWriter, card: &CardLayout) {
    let h = &card.header;
    let right = CARD_W - PAD;
    let icon_x = PAD + 32;
    let mid_y = HEADER_HEIGHT / 2;

    svg.rect(0, 0, CARD_W, HEADER_HEIGHT, "#1e3a8a", 0, 1.0);
    svg.circle(icon_x, mid_y, 32, "#ffffff", 0.1);
    let icon_style = TextStyle::new(36.0, "#ffffff").middle();
    svg.text_line(icon_x, mid_y + 13, &h.icon, icon_style);

    let title_lines = wrap_text(&h.title, chars_for(420, 28.0));
    let title_y = if title_lines.len() > 1 { 44 } else { 56 };
    let title_style = TextStyle::new(28.0, "#ffffff").bold().leading(30);
    let after_title = svg.text(PAD + 84, title_y, &title_lines, title_style);
    let theme_style = TextStyle::new(16.0, "#bfdbfe");
    svg.text_line(PAD + 84, after_title + 26, &h.theme, theme_style);

    let mark_style = TextStyle::new(44.0, "#ffffff").bold().end().opacity(0.2);
    svg.text_line(right, 58, &h.watermark, mark_style);

    let badge_w = |text: &str| text.chars().count() as i32 * 8 + 24;
    let age_w = badge_w(&h.age_badge);
    let age_x = right - age_w;
    let level_w = badge_w(&h.level_badge);
    let level_x = age_x - 8 - level_w;
    let badge_style = TextStyle::new(13.0, "#ffffff").bold().middle();
    let badges = [
        (level_x, level_w, &h.level_badge),
        (age_x, age_w, &h.age_badge),
    ];
    for (x, w, text) in badges {
        svg.rect(x, 72, w, 26, "#ffffff", 4, 0.2);
        svg.text_line(x + w / 2, 90, text, badge_style);
    }
}

fn render_primary(svg: &mut SvgWriter, card: &CardLayout) {
    let p = &card.primary;
    let caption = TextStyle::new(11.0, "#64748b").bold();
    let body = TextStyle::new(14.0, "#334155").leading(20);
    let mut y = BODY_TOP;

    // Concept callout
    let concept_lines = wrap_text(&p.concept, chars_for(LEFT_W - 40, 18.0));
    let callout_h = 20 + 16 + concept_lines.len() as i32 * 24 + 8;
    svg.rect(LEFT_X, y, LEFT_W, callout_h, "#eff6ff", 12, 1.0);
    svg.rect(LEFT_X, y, 4, callout_h, "#2563eb", 0, 1.0);
    let navy = TextStyle::new(11.0, "#1e40af").bold();
    svg.caption(LEFT_X + 20, y + 24, &p.concept_label, navy);
    let concept_style = TextStyle::new(18.0, "#1e293b").leading(24);
    svg.text(LEFT_X + 20, y + 50, &concept_lines, concept_style);
    y += callout_h + 24;

    // Description
    svg.caption(LEFT_X, y + 12, &p.description_label, caption);
    svg.line(LEFT_X, y + 20, LEFT_X + LEFT_W, y + 20, "#e2e8f0");
    let desc_lines = wrap_text(&p.description, chars_for(LEFT_W, 14.0));
    svg.text(LEFT_X, y + 42, &desc_lines, body);

    // Rhetorical device, pinned to the bottom of the column
    let rhetoric_lines = wrap_text(&p.rhetoric, chars_for(LEFT_W - 32, 14.0));
    let box_h = 16 + 22 + rhetoric_lines.len() as i32 * 19 + 8;
    let box_y = BODY_BOTTOM - box_h;
    svg.rect(LEFT_X, box_y, LEFT_W, box_h, "#f1f5f9", 8, 1.0);
    let heading = format!("✦ {}", p.rhetoric_label);
    svg.text_line(LEFT_X + 16, box_y + 26, &heading, body.bold());
    let quote = TextStyle::new(14.0, "#1e293b").italic().leading(19);
    svg.text(LEFT_X + 16, box_y + 50, &rhetoric_lines, quote);
}

fn render_secondary(svg: &mut SvgWriter, card: &CardLayout) {
    let s = &card.secondary;
    let caption = TextStyle::new(11.0, "#64748b").bold();
    let body = TextStyle::new(14.0, "#334155").leading(19);
    let mut y = BODY_TOP;

    // Focus points
    svg.caption(RIGHT_X, y + 12, &s.focus_label, caption);
    y += 36;
    let bullet = TextStyle::new(14.0, "#3b82f6");
    for point in &s.focus_points {
        let lines = wrap_text(point, chars_for(RIGHT_W - 18, 14.0));
        svg.text_line(RIGHT_X, y, "•", bullet);
        let last = svg.text(RIGHT_X + 16, y, &lines, body);
        y = last + 25;
    }
    y += 4;

    // Examples box
    let example_width = chars_for(RIGHT_W - 52, 14.0);
    let example_lines: Vec<Vec<String>> = s
        .examples
        .iter()
        .map(|ex| wrap_text(ex, example_width))
        .collect();
    let line_count: usize = example_lines.iter().map(Vec::len).sum();
    let body_h = line_count as i32 * 19 + example_lines.len() as i32 * 8;
    let box_h = 20 + 24 + body_h + 8;
    svg.rect(RIGHT_X, y, RIGHT_W, box_h, "#fefce8", 12, 1.0);
    let amber = TextStyle::new(11.0, "#a16207").bold();
    svg.caption(RIGHT_X + 20, y + 26, &s.examples_label, amber);
    let open_quote = TextStyle::new(16.0, "#eab308");
    let quote = TextStyle::new(14.0, "#1e293b").italic().leading(19);
    let mut ey = y + 52;
    for lines in &example_lines {
        svg.text_line(RIGHT_X + 20, ey, "\u{201c}", open_quote);
        let last = svg.text(RIGHT_X + 34, ey, lines, quote);
        ey = last + 27;
    }

    // Materials and duration, pinned to the bottom
    let half = RIGHT_W / 2;
    let materials = wrap_text(&s.materials, chars_for(half - 8, 12.0));
    let block_h = 18 + materials.len() as i32 * 16;
    let top = BODY_BOTTOM - block_h;
    let small_caption = TextStyle::new(10.0, "#94a3b8").bold();
    let small = TextStyle::new(12.0, "#64748b").leading(16);
    svg.caption(RIGHT_X, top + 10, &s.materials_label, small_caption);
    svg.text(RIGHT_X, top + 28, &materials, small);
    let dur_x = RIGHT_X + half;
    svg.caption(dur_x, top + 10, &s.duration_label, small_caption);
    svg.text_line(dur_x, top + 28, &s.duration, small);
}

fn render_footer(svg: &mut SvgWriter, card: &CardLayout) {
    let top = CARD_H - FOOTER_HEIGHT;
    let muted = TextStyle::new(10.0, "#94a3b8");
    svg.rect(0, top, CARD_W, FOOTER_HEIGHT, "#f8fafc", 0, 1.0);
    svg.line(0, top, CARD_W, top, "#e2e8f0");
    svg.text_line(24, top + 16, &card.footer.credit, muted);
    svg.text_line(CARD_W - 24, top + 16, &card.footer.author, muted.end());
}
