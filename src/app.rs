use crate::check::window::DateWindow;
use crate::check::CheckSnapshot;
use crate::config::SourceKind;
use crate::event::AppEvent;
use crate::ui::{
    detail_panel::DetailPanel,
    header_bar::HeaderBar,
    help_panel::HelpPanel,
    input::{self, Action},
    roster_panel::RosterPanel,
    status_bar::StatusBar,
};
use chrono::{FixedOffset, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Idle,
    Checking,
}

pub struct App {
    pub roster: Vec<String>,
    pub source: SourceKind,
    pub offset: FixedOffset,

    pub snapshot: Option<CheckSnapshot>,
    pub state: CheckState,
    refresh_requested: bool,

    pub selected: usize,
    pub scroll: usize,
    pub show_help: bool,
    pub show_detail: bool,

    pub last_sync: String,
    pub rate_limit: Option<u32>,

    pub should_quit: bool,
}

impl App {
    /// Starts with a pending refresh so the first check runs on startup.
    pub fn new(roster: Vec<String>, source: SourceKind, offset: FixedOffset) -> Self {
        Self {
            roster,
            source,
            offset,
            snapshot: None,
            state: CheckState::Idle,
            refresh_requested: true,
            selected: 0,
            scroll: 0,
            show_help: false,
            show_detail: false,
            last_sync: "never".to_string(),
            rate_limit: None,
            should_quit: false,
        }
    }

    pub fn request_refresh(&mut self) {
        if self.state == CheckState::Idle {
            self.refresh_requested = true;
        }
    }

    /// Idle -> Checking. Returns true when the caller should start a cycle.
    pub fn begin_check(&mut self) -> bool {
        if !self.refresh_requested || self.state == CheckState::Checking {
            return false;
        }
        self.refresh_requested = false;
        self.state = CheckState::Checking;
        true
    }

    /// Checking -> Idle. A snapshot older than the one shown is dropped.
    pub fn apply_snapshot(&mut self, snapshot: CheckSnapshot, rate_limit: Option<u32>) {
        self.state = CheckState::Idle;
        if rate_limit.is_some() {
            self.rate_limit = rate_limit;
        }
        if self.snapshot.as_ref().is_some_and(|s| s.seq >= snapshot.seq) {
            return;
        }
        self.last_sync = snapshot
            .finished_at
            .with_timezone(&self.offset)
            .format("%H:%M:%S")
            .to_string();
        self.snapshot = Some(snapshot);
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                let action = input::map_key(key, self.show_help || self.show_detail);
                self.handle_action(action);
            }
            AppEvent::Resize => {}
            AppEvent::RefreshTick => self.request_refresh(),
            AppEvent::CheckFinished {
                snapshot,
                rate_limit,
            } => self.apply_snapshot(snapshot, rate_limit),
        }
    }

    fn handle_action(&mut self, action: Action) {
        let last = self.roster.len().saturating_sub(1);
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.selected = (self.selected + 1).min(last),
            Action::ScrollUp => self.selected = self.selected.saturating_sub(1),
            Action::Top => self.selected = 0,
            Action::Bottom => self.selected = last,
            Action::Select => self.show_detail = !self.roster.is_empty(),
            Action::Refresh => self.request_refresh(),
            Action::Help => self.show_help = true,
            Action::ClosePopup => {
                self.show_help = false;
                self.show_detail = false;
            }
            Action::None => {}
        }
    }

    fn today(&self) -> String {
        match self.snapshot {
            Some(ref s) => s.window.date_str(),
            None => DateWindow::today(Utc::now(), self.offset).date_str(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(size);

        // borders take two rows
        self.ensure_scroll_bounds(chunks[1].height.saturating_sub(2) as usize);

        let date = self.today();
        let offset = self.offset.to_string();
        let header = HeaderBar {
            date: &date,
            offset: &offset,
            source: self.source,
            checking: self.state == CheckState::Checking,
        };
        frame.render_widget(header, chunks[0]);

        let roster = RosterPanel {
            roster: &self.roster,
            snapshot: self.snapshot.as_ref(),
            selected: self.selected,
            scroll: self.scroll,
        };
        frame.render_widget(roster, chunks[1]);

        let status = StatusBar {
            last_sync: &self.last_sync,
            committed: self.snapshot.as_ref().map_or(0, |s| s.committed_count()),
            errors: self.snapshot.as_ref().map_or(0, |s| s.error_count()),
            total: self.roster.len(),
            rate_limit: self.rate_limit,
        };
        frame.render_widget(status, chunks[2]);

        if self.show_detail {
            if let Some(login) = self.roster.get(self.selected) {
                let detail = DetailPanel {
                    login,
                    snapshot: self.snapshot.as_ref(),
                };
                frame.render_widget(detail, size);
            }
        }
        if self.show_help {
            frame.render_widget(HelpPanel, size);
        }
    }

    fn ensure_scroll_bounds(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected >= self.scroll + visible_height {
            self.scroll = self.selected - visible_height + 1;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
    }
}
