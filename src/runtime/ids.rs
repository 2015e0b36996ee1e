use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Generates record identifiers from the current time in milliseconds.
///
/// Identifiers are strictly increasing: two records created within the same
/// millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next identifier.
    pub fn next_id(&self) -> String {
        self.next_at(Utc::now().timestamp_millis()).to_string()
    }

    fn next_at(&self, now_millis: i64) -> i64 {
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now_millis.max(last + 1);
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(current) => last = current,
            }
        }
    }
}
