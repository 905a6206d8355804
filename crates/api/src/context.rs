use chrono::{DateTime, SecondsFormat, Utc};

/// Moment the request entered the middleware chain.
///
/// Attached as a request extension by [`crate::middleware::stamp_request_time`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestTime(DateTime<Utc>);

impl RequestTime {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// ISO-8601 in UTC with millisecond precision, e.g. `2024-03-01T09:30:00.000Z`.
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
