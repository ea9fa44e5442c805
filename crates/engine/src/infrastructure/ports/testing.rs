//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};
use uuid::Uuid;

// =============================================================================
// Testability Ports
// =============================================================================

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Uniform draw in [0, 1)
    fn gen_unit(&self) -> f64;
    /// Uniform index in [0, len); 0 when `len` is 0
    fn gen_index(&self, len: usize) -> usize;
    /// Uniform integer in [min, max]
    fn gen_range(&self, min: i32, max: i32) -> i32;
    fn gen_uuid(&self) -> Uuid;
}
