use std::cell::Cell;
use std::rc::Rc;

/// Milliseconds since the Unix epoch.
#[macro_export]
macro_rules! now {
    () => {{
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(std::time::Duration::default())
            .as_millis();
        std::convert::TryFrom::try_from(millis).unwrap_or(u64::MAX)
    }};
}

/// Time source for every timestamp the recorder writes.
pub trait Clock {
    /// Milliseconds, never lower than a value returned before.
    fn now(&self) -> u64;
}

#[derive(Debug, Default)]
pub struct SystemClock {
    last: Cell<u64>,
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        let wall: u64 = now!();
        let now = wall.max(self.last.get());
        self.last.set(now);
        now
    }
}

/// Clock moved by hand. Clones share the same reading.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    current: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn starting_at(millis: u64) -> Self {
        Self {
            current: Rc::new(Cell::new(millis)),
        }
    }

    pub fn set(&self, millis: u64) {
        self.current.set(millis);
    }

    pub fn advance(&self, millis: u64) {
        self.current.set(self.current.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.current.get()
    }
}

#[cfg(test)]
mod test {
    use super::{Clock, ManualClock, SystemClock};

    #[test]
    fn test_system_clock_is_non_decreasing() {
        let clock = SystemClock::default();
        let first = clock.now();
        let second = clock.now();

        assert!(first > 0);
        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::starting_at(100);
        let handle = clock.clone();
        handle.advance(25);
        assert_eq!(clock.now(), 125);
        handle.set(7);
        assert_eq!(clock.now(), 7);
    }
}
