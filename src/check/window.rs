use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Midnight-to-midnight span of one civil date in a fixed offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub date: NaiveDate,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DateWindow {
    pub fn today(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let date = now.with_timezone(&offset).date_naive();
        Self::for_date(date, offset)
    }

    pub fn for_date(date: NaiveDate, offset: FixedOffset) -> Self {
        // Fixed offsets have no gaps or folds, so both ends are unambiguous.
        let start = offset.from_utc_datetime(&(date.and_time(NaiveTime::MIN) - offset));
        let end = start + chrono::Duration::seconds(86_399);
        Self { date, start, end }
    }

    pub fn offset(&self) -> FixedOffset {
        *self.start.offset()
    }

    pub fn start_rfc3339(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    pub fn end_rfc3339(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// `YYYY-MM-DD`, the form the contribution calendar uses for `date`.
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Civil date of `instant` seen from this window's offset.
    pub fn civil_date_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset()).date_naive()
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.civil_date_of(instant) == self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn late_utc_evening_is_next_day_in_kst() {
        let window = DateWindow::today(utc("2024-03-05T23:30:00Z"), kst());
        assert_eq!(window.date_str(), "2024-03-06");
        assert_eq!(window.start_rfc3339(), "2024-03-06T00:00:00+09:00");
        assert_eq!(window.end_rfc3339(), "2024-03-06T23:59:59+09:00");
    }

    #[test]
    fn window_edges_are_inclusive_of_the_civil_day() {
        let window = DateWindow::today(utc("2024-03-06T03:00:00Z"), kst());
        assert_eq!(window.date_str(), "2024-03-06");
        assert!(window.contains(&utc("2024-03-05T15:00:00Z")));
        assert!(window.contains(&utc("2024-03-06T14:59:59Z")));
        assert!(!window.contains(&utc("2024-03-05T14:59:59Z")));
        assert!(!window.contains(&utc("2024-03-06T15:00:00Z")));
    }

    #[test]
    fn negative_offset_rolls_back() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let window = DateWindow::today(utc("2024-03-06T02:00:00Z"), offset);
        assert_eq!(window.date_str(), "2024-03-05");
        assert_eq!(window.start_rfc3339(), "2024-03-05T00:00:00-05:00");
    }

    #[test]
    fn utc_offset_renders_numeric() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let window = DateWindow::today(utc("2024-12-31T23:59:59Z"), offset);
        assert_eq!(window.start_rfc3339(), "2024-12-31T00:00:00+00:00");
        assert_eq!(window.end_rfc3339(), "2024-12-31T23:59:59+00:00");
    }
}
