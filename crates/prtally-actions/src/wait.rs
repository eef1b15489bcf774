use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, TimeZone};

/// Sleep for `milliseconds` before continuing.
pub async fn wait(milliseconds: u64) {
    tokio::time::sleep(Duration::from_millis(milliseconds)).await;
}

/// Wall-clock time as `HH:MM:SS GMT+hhmm`.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use prtally_actions::time_string;
///
/// let tz = FixedOffset::east_opt(2 * 3600).unwrap();
/// let now = tz.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
/// assert_eq!(time_string(&now), "09:30:00 GMT+0200");
/// ```
pub fn time_string<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%H:%M:%S GMT%z").to_string()
}
