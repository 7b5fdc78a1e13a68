//! Time sources for build timing
//!
//! The pipeline asks its clock for the start and end instants and hands them
//! to the [`BuildLog`](crate::BuildLog); nothing else reads the wall clock.

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Source of timestamps
pub trait Clock {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock replaying a fixed sequence of instants; the last one repeats
#[derive(Debug)]
pub struct ScriptedClock {
    instants: RefCell<VecDeque<DateTime<Utc>>>,
    last: DateTime<Utc>,
}

impl ScriptedClock {
    /// Create a clock that returns `first`, then each of `rest` in order
    pub fn new(first: DateTime<Utc>, rest: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        let mut instants: VecDeque<_> = rest.into_iter().collect();
        let last = instants.back().copied().unwrap_or(first);
        instants.push_front(first);
        Self {
            instants: RefCell::new(instants),
            last,
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instants.borrow_mut().pop_front().unwrap_or(self.last)
    }
}
