use crate::check::CheckSnapshot;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// Auto-refresh tick from the poller.
    RefreshTick,
    CheckFinished {
        snapshot: CheckSnapshot,
        rate_limit: Option<u32>,
    },
}
