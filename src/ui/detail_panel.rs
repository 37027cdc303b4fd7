use crate::check::CheckSnapshot;
use crate::ui::roster_panel::RowState;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

pub struct DetailPanel<'a> {
    pub login: &'a str,
    pub snapshot: Option<&'a CheckSnapshot>,
}

impl<'a> Widget for DetailPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let popup = super::centered_rect(60, 40, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" {} ", self.login))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        let label = Style::default().fg(theme::ACCENT);
        let state = RowState::of(self.snapshot, self.login);
        let mut lines = vec![Line::from(vec![
            Span::styled("Status  ", label),
            Span::raw(state.label()),
        ])];

        if let Some(snap) = self.snapshot {
            if let Some(e) = snap.error(self.login) {
                lines.push(Line::from(vec![
                    Span::styled("Cause   ", label),
                    Span::styled(e.detail(), Style::default().fg(theme::ERROR_FG)),
                ]));
            }
            lines.push(Line::from(vec![
                Span::styled("From    ", label),
                Span::raw(snap.window.start_rfc3339()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("To      ", label),
                Span::raw(snap.window.end_rfc3339()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Started ", label),
                Span::raw(
                    snap.started_at
                        .with_timezone(&snap.window.offset())
                        .format("%H:%M:%S")
                        .to_string(),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Checked ", label),
                Span::raw(
                    snap.finished_at
                        .with_timezone(&snap.window.offset())
                        .format("%H:%M:%S")
                        .to_string(),
                ),
            ]));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(popup, buf);
    }
}
