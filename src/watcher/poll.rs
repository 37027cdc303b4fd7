use crate::event::AppEvent;
use std::time::Duration;
use tokio::sync::mpsc;

pub const MIN_INTERVAL_SECS: u64 = 5;

pub async fn start_refresh_poller(tx: mpsc::UnboundedSender<AppEvent>, interval_secs: u64) {
    let secs = interval_secs.max(MIN_INTERVAL_SECS);
    let mut interval = tokio::time::interval(Duration::from_secs(secs));
    // first tick is immediate; startup already runs a check
    interval.tick().await;

    loop {
        interval.tick().await;
        if tx.send(AppEvent::RefreshTick).is_err() {
            break;
        }
    }
}
