use serde::Deserialize;

use crate::error::MalformedDuration;

/// One element of the catalog's author-content response. Unknown response
/// fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCourse {
    pub id: String,
    pub title: String,
    pub duration: String,
    pub content_url: String,
    pub is_retired: bool,
}

impl RemoteCourse {
    /// Whole minutes in the reported duration, floored. The catalog formats
    /// durations as `HH:MM:SS` with a fractional-seconds suffix
    /// (e.g. `"01:08:54.9613330"`); the fraction is truncated.
    pub fn duration_in_minutes(&self) -> Result<i64, MalformedDuration> {
        let malformed = || MalformedDuration(self.duration.clone());

        let mut parts = self.duration.splitn(3, ':');
        let hours: i64 = parts
            .next()
            .ok_or_else(malformed)?
            .parse()
            .map_err(|_| malformed())?;
        let minutes: i64 = parts
            .next()
            .ok_or_else(malformed)?
            .parse()
            .map_err(|_| malformed())?;
        let seconds: i64 = parts
            .next()
            .ok_or_else(malformed)?
            .split('.')
            .next()
            .ok_or_else(malformed)?
            .parse()
            .map_err(|_| malformed())?;

        // Time-of-day ranges: the catalog never reports a course as a
        // duration of a day or more.
        if !(0..24).contains(&hours) || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
            return Err(malformed());
        }

        Ok(hours * 60 + minutes)
    }
}
