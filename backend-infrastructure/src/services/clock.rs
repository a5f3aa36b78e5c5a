use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

use backend_domain::Clock;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reports a pinned calendar date, whatever the viewer's offset, while the
/// time of day keeps moving.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn today_at(&self, _offset: FixedOffset) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
