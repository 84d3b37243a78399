use chrono::Utc;

/// Source of the current server time in whole seconds since the epoch.
pub trait Clock: Send + Sync + 'static {
	fn now(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> i64 {
		Utc::now().timestamp()
	}
}

/// A clock stuck at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
	fn now(&self) -> i64 {
		self.0
	}
}
