use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("j/k  \u{2191}/\u{2193}", "Move selection"),
    ("g/G", "First / last participant"),
    ("Enter", "Participant detail"),
    ("r  F5", "Check again"),
    ("?", "This help"),
    ("q / Esc", "Quit / Close"),
];

pub struct HelpPanel;

impl Widget for HelpPanel {
    fn render(self, area: Rect, buf: &mut Buf) {
        let popup = super::centered_rect(50, 50, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Keybindings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = Style::default()
            .fg(theme::KEY_COLOR)
            .add_modifier(Modifier::BOLD);
        for (i, (key, desc)) in BINDINGS.iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }
            let y = inner.y + i as u16;
            let line = Line::from(vec![
                Span::styled(format!(" {key:<12}"), key_style),
                Span::raw(*desc),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
