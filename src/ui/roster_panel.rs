use crate::check::CheckSnapshot;
use crate::ui::{theme, truncate_with_ellipsis};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

const MAX_LOGIN_W: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    Pending,
    Committed,
    NotYet,
    Error(String),
}

impl RowState {
    pub fn of(snapshot: Option<&CheckSnapshot>, login: &str) -> Self {
        let Some(snap) = snapshot else {
            return RowState::Pending;
        };
        match (snap.status(login), snap.error(login)) {
            (Some(true), _) => RowState::Committed,
            (Some(false), _) => RowState::NotYet,
            (None, Some(e)) => RowState::Error(e.to_string()),
            (None, None) => RowState::Pending,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RowState::Pending => "\u{2026}",
            RowState::Committed => "\u{2714}",
            RowState::NotYet => "\u{2718}",
            RowState::Error(_) => "!",
        }
    }

    pub fn label(&self) -> String {
        match self {
            RowState::Pending => "waiting for first check".to_string(),
            RowState::Committed => "committed today".to_string(),
            RowState::NotYet => "no commit yet".to_string(),
            RowState::Error(msg) => format!("error: {msg}"),
        }
    }

    fn color(&self) -> Color {
        match self {
            RowState::Pending => theme::DIM_TEXT,
            RowState::Committed => theme::COMMITTED_FG,
            RowState::NotYet => theme::MISSING_FG,
            RowState::Error(_) => theme::ERROR_FG,
        }
    }
}

pub struct RosterPanel<'a> {
    pub roster: &'a [String],
    pub snapshot: Option<&'a CheckSnapshot>,
    pub selected: usize,
    pub scroll: usize,
}

impl<'a> Widget for RosterPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let block = Block::default()
            .title(" participants ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::SEPARATOR));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 8 {
            return;
        }

        let login_w = self
            .roster
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0)
            .min(MAX_LOGIN_W);

        for (row, (idx, login)) in self
            .roster
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let state = RowState::of(self.snapshot, login);
            let color = state.color();

            let bg = if idx == self.selected {
                Style::default().bg(theme::SELECTED_BG)
            } else {
                Style::default()
            };
            for x in inner.x..inner.right() {
                buf[(x, y)].set_style(bg);
            }

            let name = truncate_with_ellipsis(login, login_w);
            let pad = login_w.saturating_sub(UnicodeWidthStr::width(name.as_str()));
            let line = Line::from(vec![
                Span::styled(format!(" {} ", state.icon()), bg.fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(format!("{name}{}  ", " ".repeat(pad)), bg),
                Span::styled(state.label(), bg.fg(color)),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
