use crate::config::SourceKind;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

pub struct HeaderBar<'a> {
    pub date: &'a str,
    pub offset: &'a str,
    pub source: SourceKind,
    pub checking: bool,
}

impl<'a> Widget for HeaderBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::HEADER_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        let spans = vec![
            Span::styled(
                " \u{f09b} rollcall",
                Style::default()
                    .fg(theme::ACCENT)
                    .bg(theme::HEADER_BG)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " \u{2503} ",
                Style::default().fg(theme::SEPARATOR).bg(theme::HEADER_BG),
            ),
            Span::styled(
                format!("today {} ", self.date),
                Style::default().bg(theme::HEADER_BG),
            ),
            Span::styled(
                format!("(UTC{}) ", self.offset),
                Style::default().fg(theme::DIM_TEXT).bg(theme::HEADER_BG),
            ),
            Span::styled(
                format!("via {}", self.source),
                Style::default().fg(theme::DIM_TEXT).bg(theme::HEADER_BG),
            ),
        ];
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let right = if self.checking {
            "\u{27f3} checking\u{2026} ".to_string()
        } else {
            "idle ".to_string()
        };
        let right_w = UnicodeWidthStr::width(right.as_str());
        let area_w = area.width as usize;
        if area_w > right_w {
            let right_x = area.x + (area_w - right_w) as u16;
            let color = if self.checking {
                theme::WARN_FG
            } else {
                theme::DIM_TEXT
            };
            let right_span = Span::styled(right, Style::default().fg(color).bg(theme::HEADER_BG));
            buf.set_line(right_x, area.y, &Line::from(right_span), right_w as u16);
        }
    }
}
