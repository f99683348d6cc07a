//! Cache freshness policy

use chrono::{DateTime, Duration, Utc};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used outside of tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Returns true if a page written at `last_write` may still be served at `now`
///
/// A page is fresh while its age is strictly below `window`. A write time in
/// the future (clock skew, touched files) counts as fresh.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use laptop_scout::cache::is_fresh;
///
/// let written = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
/// let window = Duration::hours(1);
///
/// assert!(is_fresh(written + Duration::minutes(59), written, window));
/// assert!(!is_fresh(written + Duration::hours(1), written, window));
/// ```
pub fn is_fresh(now: DateTime<Utc>, last_write: DateTime<Utc>, window: Duration) -> bool {
    now - last_write < window
}
