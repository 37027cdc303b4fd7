use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBar<'a> {
    pub last_sync: &'a str,
    pub committed: usize,
    pub errors: usize,
    pub total: usize,
    pub rate_limit: Option<u32>,
}

fn separator() -> Span<'static> {
    Span::styled(
        "\u{2502}",
        Style::default().fg(theme::BORDER_COLOR).bg(theme::STATUS_BG),
    )
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::STATUS_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        let mut spans = vec![
            Span::styled(
                format!(" {}/{} committed ", self.committed, self.total),
                bg.fg(theme::COMMITTED_FG),
            ),
            separator(),
        ];

        if self.errors > 0 {
            spans.push(Span::styled(
                format!(" {} errors ", self.errors),
                bg.fg(theme::ERROR_FG),
            ));
            spans.push(separator());
        }

        spans.push(Span::styled(format!(" synced: {} ", self.last_sync), bg));

        if let Some(remaining) = self.rate_limit {
            spans.push(separator());
            spans.push(Span::styled(format!(" API: {remaining} "), bg));
        }

        spans.push(separator());
        spans.push(Span::styled(" r", bg.fg(theme::KEY_COLOR)));
        spans.push(Span::styled(" refresh ", bg.fg(theme::DIM_TEXT)));
        spans.push(Span::styled("?", bg.fg(theme::KEY_COLOR)));
        spans.push(Span::styled(" help ", bg.fg(theme::DIM_TEXT)));
        spans.push(Span::styled("q", bg.fg(theme::KEY_COLOR)));
        spans.push(Span::styled(" quit", bg.fg(theme::DIM_TEXT)));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
