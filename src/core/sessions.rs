use chrono::{NaiveTime, Timelike};

use crate::models::Session;

/// Trading window of a session, bounds inclusive, in New York local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    pub session: Session,
    pub open: (u32, u32),
    pub close: (u32, u32),
    pub step_minutes: u32,
}

pub const SESSION_WINDOWS: [SessionWindow; 2] = [
    SessionWindow {
        session: Session::Odr,
        open: (4, 0),
        close: (8, 25),
        step_minutes: 30,
    },
    SessionWindow {
        session: Session::Rdr,
        open: (10, 30),
        close: (15, 55),
        step_minutes: 30,
    },
];

impl SessionWindow {
    pub fn for_session(session: Session) -> &'static SessionWindow {
        match session {
            Session::Odr => &SESSION_WINDOWS[0],
            Session::Rdr => &SESSION_WINDOWS[1],
        }
    }

    fn open_minute(&self) -> u32 {
        self.open.0 * 60 + self.open.1
    }

    fn close_minute(&self) -> u32 {
        self.close.0 * 60 + self.close.1
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        let m = minute_of_day(t);
        m >= self.open_minute() && m <= self.close_minute()
    }

    /// Slot start times from the open, one every `step_minutes`, up to the close.
    pub fn slots(&self) -> Vec<NaiveTime> {
        let step = self.step_minutes.max(1) as usize;
        (self.open_minute()..=self.close_minute())
            .step_by(step)
            .filter_map(time_from_minute)
            .collect()
    }

    /// Floor `t` to the start of its enclosing slot; `None` outside the window.
    pub fn slot_for(&self, t: NaiveTime) -> Option<NaiveTime> {
        if !self.contains(t) {
            return None;
        }
        let step = self.step_minutes.max(1);
        let offset = minute_of_day(t) - self.open_minute();
        time_from_minute(self.open_minute() + offset / step * step)
    }
}

/// Every slot of every session, in chronological order.
pub fn all_slots() -> Vec<(Session, NaiveTime)> {
    let mut out: Vec<(Session, NaiveTime)> = SESSION_WINDOWS
        .iter()
        .flat_map(|w| w.slots().into_iter().map(move |t| (w.session, t)))
        .collect();
    out.sort_by_key(|&(_, t)| t);
    out
}

fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

fn time_from_minute(m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(m / 60, m % 60, 0)
}
