use chrono::{Local, NaiveDate, NaiveDateTime};

/// Wall clock in the service's local time zone.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Local calendar date, time truncated to midnight.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
pub use fixed::FixedClock;

#[cfg(test)]
mod fixed {
    use std::sync::Mutex;

    use chrono::{NaiveDateTime, TimeDelta};

    use super::Clock;

    /// Clock that only moves when told to.
    pub struct FixedClock {
        now: Mutex<NaiveDateTime>,
    }

    impl FixedClock {
        pub fn at(now: NaiveDateTime) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        pub fn set(&self, now: NaiveDateTime) {
            *self.now.lock().unwrap() = now;
        }

        pub fn advance(&self, by: TimeDelta) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            *self.now.lock().unwrap()
        }
    }
}
