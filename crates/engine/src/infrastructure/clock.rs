//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_unit(&self) -> f64 {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }

    fn gen_index(&self, len: usize) -> usize {
        use rand::Rng;
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }

    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(start),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

#[cfg(test)]
impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Random source that replays scripted unit draws, then repeats `fallback`.
///
/// Every method derives its result from the next unit draw, so one script
/// drives rolls, index picks and ranges alike. UUIDs count up from 1.
#[cfg(test)]
pub struct ScriptedRandom {
    units: std::sync::Mutex<std::collections::VecDeque<f64>>,
    fallback: f64,
    next_uuid: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(units: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            units: std::sync::Mutex::new(units.into_iter().collect()),
            fallback,
            next_uuid: std::sync::atomic::AtomicU64::new(1),
        }
    }

    /// Always draws `value`
    pub fn constant(value: f64) -> Self {
        Self::new([], value)
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn gen_unit(&self) -> f64 {
        let mut units = self.units.lock().unwrap_or_else(|e| e.into_inner());
        units.pop_front().unwrap_or(self.fallback)
    }

    fn gen_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.gen_unit() * len as f64) as usize).min(len - 1)
    }

    fn gen_range(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max - min + 1) as f64;
        (min + (self.gen_unit() * span) as i32).min(max)
    }

    fn gen_uuid(&self) -> Uuid {
        let n = self
            .next_uuid
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Uuid::from_u128(n as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_random_stays_in_bounds() {
        let random = SystemRandom::new();
        for _ in 0..200 {
            let unit = random.gen_unit();
            assert!((0.0..1.0).contains(&unit));
            assert!(random.gen_index(3) < 3);
            assert!((0..=500).contains(&random.gen_range(0, 500)));
        }
        assert_eq!(random.gen_index(0), 0);
    }

    #[test]
    fn test_scripted_random_replays_then_falls_back() {
        let random = ScriptedRandom::new([0.1, 0.99], 0.5);
        assert_eq!(random.gen_unit(), 0.1);
        assert_eq!(random.gen_index(4), 3);
        assert_eq!(random.gen_range(0, 500), 250);
        assert_ne!(random.gen_uuid(), random.gen_uuid());
    }

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        clock.advance(chrono::Duration::milliseconds(1500));
        assert_eq!(clock.now(), start + chrono::Duration::milliseconds(1500));
    }
}
