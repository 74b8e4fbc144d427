//! Per-request clock
//!
//! "Now" is captured once when a request starts and threaded through every
//! upcoming/past decision made while serving it, so two shows at the same
//! instant can never land on different sides of the boundary.

use chrono::{DateTime, Utc};

/// A UTC instant captured once per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Now(DateTime<Utc>);

impl Now {
    /// Read the system clock.
    pub fn capture() -> Self {
        Self(Utc::now())
    }

    /// Pin the clock to a given instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn window_of(&self, date_time: DateTime<Utc>) -> ShowWindow {
        ShowWindow::of(date_time, *self)
    }
}

/// Which side of "now" a show falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowWindow {
    /// Strictly after now
    Upcoming,
    /// At or before now
    Past,
}

impl ShowWindow {
    pub fn of(date_time: DateTime<Utc>, now: Now) -> Self {
        if date_time > now.0 {
            Self::Upcoming
        } else {
            Self::Past
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon() -> Now {
        Now::at(Utc.with_ymd_and_hms(2035, 4, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn later_is_upcoming() {
        let now = noon();
        let later = now.instant() + Duration::seconds(1);
        assert_eq!(now.window_of(later), ShowWindow::Upcoming);
    }

    #[test]
    fn earlier_is_past() {
        let now = noon();
        let earlier = now.instant() - Duration::days(30);
        assert_eq!(now.window_of(earlier), ShowWindow::Past);
    }

    #[test]
    fn exactly_now_is_past() {
        let now = noon();
        assert_eq!(now.window_of(now.instant()), ShowWindow::Past);
    }
}
