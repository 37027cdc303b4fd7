#![cfg(test)]

use crate::check::window::DateWindow;
use crate::check::ContributionSource;
use crate::error::CheckError;
use crate::github::types::*;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn window_in(date: &str, offset: FixedOffset) -> DateWindow {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    DateWindow::for_date(date, offset)
}

pub fn kst_window(date: &str) -> DateWindow {
    window_in(date, kst())
}

pub fn utc_window(date: &str) -> DateWindow {
    window_in(date, FixedOffset::east_opt(0).unwrap())
}

pub fn make_event(kind: &str, created_at: &str) -> UserEvent {
    UserEvent {
        kind: kind.to_string(),
        created_at: at(created_at),
    }
}

pub fn make_calendar(days: &[(&str, u32)]) -> CalendarResponse {
    let contribution_days: Vec<ContributionDay> = days
        .iter()
        .map(|(date, count)| ContributionDay {
            contribution_count: *count,
            date: date.to_string(),
        })
        .collect();
    CalendarResponse {
        data: Some(CalendarData {
            user: Some(CalendarUser {
                contributions_collection: Some(ContributionsCollection {
                    contribution_calendar: Some(ContributionCalendar {
                        total_contributions: days.iter().map(|(_, c)| c).sum(),
                        weeks: vec![ContributionWeek { contribution_days }],
                    }),
                }),
            }),
        }),
        errors: None,
    }
}

type Scripted = (Result<bool, CheckError>, Duration);

/// Scripted source; logins without a script answer `UserNotFound`.
#[derive(Default)]
pub struct FakeSource {
    answers: HashMap<String, Scripted>,
    calls: Arc<Mutex<Vec<String>>>,
    windows: Arc<Mutex<Vec<DateWindow>>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, login: &str, answer: Result<bool, CheckError>) -> Self {
        self.with_delay(login, answer, Duration::ZERO)
    }

    pub fn with_delay(
        mut self,
        login: &str,
        answer: Result<bool, CheckError>,
        delay: Duration,
    ) -> Self {
        self.answers.insert(login.to_string(), (answer, delay));
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    pub fn windows(&self) -> Arc<Mutex<Vec<DateWindow>>> {
        self.windows.clone()
    }
}

impl ContributionSource for FakeSource {
    async fn check(&self, login: &str, window: &DateWindow) -> Result<bool, CheckError> {
        self.calls.lock().unwrap().push(login.to_string());
        self.windows.lock().unwrap().push(window.clone());
        let (answer, delay) = self
            .answers
            .get(login)
            .cloned()
            .unwrap_or((Err(CheckError::UserNotFound), Duration::ZERO));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        answer
    }
}

/// Serves the same canned JSON response to every request on a local port.
/// Returns the base URI to hand to `GitHubClient::new`.
pub async fn serve_canned(status: u16, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut sock, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request(&mut sock).await;
                let resp = format!(
                    "HTTP/1.1 {status} Canned\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = sock.write_all(resp.as_bytes()).await;
                let _ = sock.shutdown().await;
            });
        }
    });
    format!("http://{addr}")
}

async fn read_request(sock: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match sock.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
        let body_len = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= head_end + 4 + body_len {
            return;
        }
    }
}
