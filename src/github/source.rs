use crate::check::window::DateWindow;
use crate::check::{classify, ContributionSource};
use crate::config::SourceKind;
use crate::error::CheckError;
use crate::github::client::GitHubClient;

pub struct EventsSource {
    client: GitHubClient,
}

impl ContributionSource for EventsSource {
    async fn check(&self, login: &str, window: &DateWindow) -> Result<bool, CheckError> {
        let events = self.client.fetch_events(login).await?;
        Ok(classify::pushed_today(&events, window))
    }
}

pub struct CalendarSource {
    client: GitHubClient,
}

impl ContributionSource for CalendarSource {
    async fn check(&self, login: &str, window: &DateWindow) -> Result<bool, CheckError> {
        let resp = self.client.fetch_calendar(login, window).await?;
        classify::contributed_today(&resp, window)
    }
}

pub enum Source {
    Events(EventsSource),
    Calendar(CalendarSource),
}

impl Source {
    pub fn new(kind: SourceKind, client: GitHubClient) -> Self {
        match kind {
            SourceKind::Events => Source::Events(EventsSource { client }),
            SourceKind::Graphql => Source::Calendar(CalendarSource { client }),
        }
    }
}

impl ContributionSource for Source {
    async fn check(&self, login: &str, window: &DateWindow) -> Result<bool, CheckError> {
        match self {
            Source::Events(s) => s.check(login, window).await,
            Source::Calendar(s) => s.check(login, window).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    async fn source_for(kind: SourceKind, status: u16, body: &'static str) -> Source {
        let base = serve_canned(status, body).await;
        let client = GitHubClient::new(Some("ghp_test"), Some(&base)).unwrap();
        Source::new(kind, client)
    }

    #[tokio::test]
    async fn events_source_reads_push_today() {
        let source = source_for(
            SourceKind::Events,
            200,
            r#"[{"type":"PushEvent","created_at":"2024-03-06T01:00:00Z"}]"#,
        )
        .await;
        assert_eq!(source.check("octocat", &kst_window("2024-03-06")).await, Ok(true));
        assert_eq!(source.check("octocat", &kst_window("2024-03-07")).await, Ok(false));
    }

    #[tokio::test]
    async fn events_source_reports_unknown_user() {
        let source = source_for(SourceKind::Events, 404, r#"{"message":"Not Found"}"#).await;
        assert_eq!(
            source.check("nobody", &kst_window("2024-03-06")).await,
            Err(CheckError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn calendar_source_reads_today_count() {
        let body = r#"{"data":{"user":{"contributionsCollection":{"contributionCalendar":{
            "totalContributions":2,
            "weeks":[{"contributionDays":[{"contributionCount":2,"date":"2024-03-06"}]}]
        }}}}}"#;
        let source = source_for(SourceKind::Graphql, 200, body).await;
        assert_eq!(source.check("octocat", &kst_window("2024-03-06")).await, Ok(true));
    }

    #[tokio::test]
    async fn calendar_source_reports_first_graphql_error() {
        let body = r#"{"data":{"user":null},"errors":[
            {"type":"NOT_FOUND","message":"Could not resolve"},
            {"message":"second"}
        ]}"#;
        let source = source_for(SourceKind::Graphql, 200, body).await;
        assert_eq!(
            source.check("nobody", &kst_window("2024-03-06")).await,
            Err(CheckError::Upstream("Could not resolve".to_string()))
        );
    }

    #[tokio::test]
    async fn calendar_source_server_error_is_fetch_failure() {
        let source = source_for(SourceKind::Graphql, 500, r#"{"message":"boom"}"#).await;
        let err = source.check("octocat", &kst_window("2024-03-06")).await.unwrap_err();
        assert!(matches!(err, CheckError::FetchFailed { .. }));
        assert!(err.detail().contains("boom"), "{}", err.detail());
    }
}
