use crate::check::window::DateWindow;
use crate::error::{CheckError, Result, RollcallError};
use crate::github::types::{CalendarResponse, UserEvent, CALENDAR_QUERY};
use octocrab::Octocrab;
use serde_json::json;

#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, api_base: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }
        if let Some(base) = api_base {
            builder = builder
                .base_uri(base)
                .map_err(|e| RollcallError::GitHub(e.to_string()))?;
        }
        let octo = builder
            .build()
            .map_err(|e| RollcallError::GitHub(e.to_string()))?;

        Ok(Self { octo })
    }

    pub async fn fetch_events(&self, login: &str) -> std::result::Result<Vec<UserEvent>, CheckError> {
        self.octo
            .get(format!("/users/{login}/events"), None::<&()>)
            .await
            .map_err(classify_transport)
    }

    pub async fn fetch_calendar(
        &self,
        login: &str,
        window: &DateWindow,
    ) -> std::result::Result<CalendarResponse, CheckError> {
        self.octo
            .graphql(&calendar_payload(login, window))
            .await
            .map_err(classify_transport)
    }

    pub async fn rate_limit(&self) -> Option<u32> {
        self.octo
            .ratelimit()
            .get()
            .await
            .ok()
            .and_then(|r| u32::try_from(r.rate.remaining).ok())
    }
}

pub fn calendar_payload(login: &str, window: &DateWindow) -> serde_json::Value {
    json!({
        "query": CALENDAR_QUERY,
        "variables": {
            "login": login,
            "from": window.start_rfc3339(),
            "to": window.end_rfc3339(),
        }
    })
}

fn classify_transport(err: octocrab::Error) -> CheckError {
    match err {
        octocrab::Error::GitHub { ref source, .. } if source.status_code.as_u16() == 404 => {
            CheckError::UserNotFound
        }
        octocrab::Error::GitHub { ref source, .. } => {
            CheckError::fetch_failed(format!("{} {}", source.status_code, source.message))
        }
        other => CheckError::fetch_failed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn payload_carries_login_and_window() {
        let payload = calendar_payload("octocat", &kst_window("2024-03-06"));
        assert_eq!(payload["variables"]["login"], "octocat");
        assert_eq!(payload["variables"]["from"], "2024-03-06T00:00:00+09:00");
        assert_eq!(payload["variables"]["to"], "2024-03-06T23:59:59+09:00");
        assert!(payload["query"]
            .as_str()
            .unwrap()
            .contains("contributionsCollection(from: $from, to: $to)"));
    }

    async fn client_for(status: u16, body: &'static str) -> GitHubClient {
        let base = serve_canned(status, body).await;
        GitHubClient::new(Some("ghp_test"), Some(&base)).unwrap()
    }

    #[tokio::test]
    async fn missing_user_maps_to_user_not_found() {
        let client = client_for(404, r#"{"message":"Not Found"}"#).await;
        let err = client.fetch_events("nobody").await.unwrap_err();
        assert_eq!(err, CheckError::UserNotFound);
        assert_eq!(err.to_string(), "user not found");
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_message() {
        let client = client_for(500, r#"{"message":"boom"}"#).await;
        let err = client.fetch_events("octocat").await.unwrap_err();
        match err {
            CheckError::FetchFailed { ref detail } => {
                assert!(detail.contains("500"), "{detail}");
                assert!(detail.contains("boom"), "{detail}");
                assert_ne!(detail, "GitHub");
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
        assert_eq!(err.to_string(), "failed to fetch");
    }

    #[tokio::test]
    async fn bad_credentials_surface_in_detail() {
        let client = client_for(401, r#"{"message":"Bad credentials"}"#).await;
        let err = client
            .fetch_calendar("octocat", &kst_window("2024-03-06"))
            .await
            .unwrap_err();
        assert!(err.detail().contains("Bad credentials"), "{}", err.detail());
        assert!(err.detail().contains("401"), "{}", err.detail());
    }

    #[tokio::test]
    async fn rate_limit_is_none_when_unavailable() {
        let client = client_for(500, r#"{"message":"boom"}"#).await;
        assert_eq!(client.rate_limit().await, None);
    }
}
