//! Clock abstraction for token expiry decisions
//!
//! This module provides a `Clock` trait that allows for easy mocking of time in tests.

use chrono::{DateTime, Utc};

/// Trait for getting the current time
pub trait Clock: Send + Sync {
    /// Returns the current time
    fn now(&self) -> DateTime<Utc>;
}

/// System clock that returns the actual current time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Adjustable clock for testing
///
/// Clones share the same instant, so a test can keep a handle and move time
/// forward while the client holds another.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MockClock(std::sync::Arc<std::sync::RwLock<DateTime<Utc>>>);

#[cfg(test)]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.read().unwrap()
    }
}

#[cfg(test)]
impl MockClock {
    /// Creates a new clock at the given time
    pub fn new(time: DateTime<Utc>) -> Self {
        Self(std::sync::Arc::new(std::sync::RwLock::new(time)))
    }

    /// Creates a clock at the current time
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Moves the clock forward
    pub fn advance(&self, by: chrono::Duration) {
        *self.0.write().unwrap() += by;
    }
}
