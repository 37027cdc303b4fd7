use crate::check::window::DateWindow;
use crate::error::CheckError;
use crate::github::types::{CalendarResponse, UserEvent, PUSH_EVENT};

/// True iff some push event falls on the window's civil date.
pub fn pushed_today(events: &[UserEvent], window: &DateWindow) -> bool {
    events
        .iter()
        .any(|e| e.kind == PUSH_EVENT && window.contains(&e.created_at))
}

/// Errors win over data; a missing calendar is an error, a missing day is
/// simply "no contributions".
pub fn contributed_today(resp: &CalendarResponse, window: &DateWindow) -> Result<bool, CheckError> {
    if let Some(first) = resp.errors.as_ref().and_then(|errs| errs.first()) {
        return Err(CheckError::Upstream(first.message.clone()));
    }

    let calendar = resp.calendar().ok_or(CheckError::DataNotFound)?;
    let today = window.date_str();
    Ok(calendar
        .days()
        .find(|d| d.date == today)
        .is_some_and(|d| d.contribution_count > 0))
}
