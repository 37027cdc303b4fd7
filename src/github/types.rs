use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const PUSH_EVENT: &str = "PushEvent";

/// The two fields of a `/users/{login}/events` entry we care about.
#[derive(Clone, Debug, Deserialize)]
pub struct UserEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

pub const CALENDAR_QUERY: &str = r#"query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}"#;

/// GraphQL envelope. Every level is optional: GitHub answers 200 with
/// `errors` and a null `user` for unknown logins.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CalendarResponse {
    pub data: Option<CalendarData>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CalendarData {
    pub user: Option<CalendarUser>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarUser {
    pub contributions_collection: Option<ContributionsCollection>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: Option<ContributionCalendar>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub total_contributions: u32,
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u32,
    pub date: String,
}

impl CalendarResponse {
    pub fn calendar(&self) -> Option<&ContributionCalendar> {
        self.data
            .as_ref()?
            .user
            .as_ref()?
            .contributions_collection
            .as_ref()?
            .contribution_calendar
            .as_ref()
    }
}

impl ContributionCalendar {
    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|w| w.contribution_days.iter())
    }
}
