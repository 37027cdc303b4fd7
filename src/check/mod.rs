pub mod classify;
pub mod window;

use crate::error::CheckError;
use chrono::{DateTime, FixedOffset, Utc};
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use window::DateWindow;

/// Answers "did `login` contribute inside `window`?" for one participant.
pub trait ContributionSource {
    fn check(
        &self,
        login: &str,
        window: &DateWindow,
    ) -> impl Future<Output = std::result::Result<bool, CheckError>> + Send;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Committed(bool),
    Failed(CheckError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub login: String,
    pub outcome: Outcome,
}

/// Result of one complete cycle. Replaces the previous snapshot wholesale.
#[derive(Clone, Debug)]
pub struct CheckSnapshot {
    pub seq: u64,
    pub window: DateWindow,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub entries: Vec<Entry>,
}

impl CheckSnapshot {
    pub fn entry(&self, login: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.login == login)
    }

    pub fn status(&self, login: &str) -> Option<bool> {
        match self.entry(login)?.outcome {
            Outcome::Committed(b) => Some(b),
            Outcome::Failed(_) => None,
        }
    }

    pub fn error(&self, login: &str) -> Option<&CheckError> {
        match &self.entry(login)?.outcome {
            Outcome::Failed(e) => Some(e),
            Outcome::Committed(_) => None,
        }
    }

    pub fn committed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == Outcome::Committed(true))
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Failed(_)))
            .count()
    }
}

pub struct Checker<S> {
    source: S,
    roster: Vec<String>,
    offset: FixedOffset,
    max_concurrency: usize,
    timeout: Option<Duration>,
    cycle: Mutex<()>,
    last_seq: AtomicU64,
}

impl<S: ContributionSource> Checker<S> {
    pub fn new(source: S, roster: Vec<String>, offset: FixedOffset) -> Self {
        Self {
            source,
            roster,
            offset,
            max_concurrency: 1,
            timeout: None,
            cycle: Mutex::new(()),
            last_seq: AtomicU64::new(0),
        }
    }

    pub fn with_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Runs one full cycle over the roster. Cycles are serialized: a call
    /// made while another is in flight waits for it to finish first.
    pub async fn run_check(&self, now: DateTime<Utc>) -> CheckSnapshot {
        let _cycle = self.cycle.lock().await;
        let seq = self.last_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let window = DateWindow::today(now, self.offset);
        log::debug!(
            "cycle {seq}: checking {} participants for {}",
            self.roster.len(),
            window.date_str()
        );

        let window_ref = &window;
        let entries: Vec<Entry> = stream::iter(self.roster.iter().cloned())
            .map(|login| async move { self.check_one(&login, window_ref).await })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let snapshot = CheckSnapshot {
            seq,
            window,
            started_at: now,
            finished_at: Utc::now(),
            entries,
        };
        log::debug!(
            "cycle {seq}: {} committed, {} errors",
            snapshot.committed_count(),
            snapshot.error_count()
        );
        snapshot
    }

    async fn check_one(&self, login: &str, window: &DateWindow) -> Entry {
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.check(login, window))
                .await
                .unwrap_or(Err(CheckError::TimedOut)),
            None => self.source.check(login, window).await,
        };

        let outcome = match result {
            Ok(committed) => Outcome::Committed(committed),
            Err(e) => {
                log::warn!("{login}: {}", e.detail());
                Outcome::Failed(e)
            }
        };

        Entry {
            login: login.to_string(),
            outcome,
        }
    }
}
