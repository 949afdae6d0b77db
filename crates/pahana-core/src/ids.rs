//! Business identifier generation
//!
//! Bill numbers and customer account numbers are human-facing identifiers
//! with fixed string prefixes (`BILL...`, `ACC...`). Generation is injected
//! as a capability so engines never reach for the wall clock themselves.
//!
//! The production generator seeds an atomic counter from the current time
//! and increments from there. That makes numbers collision-free within a
//! process; uniqueness across processes is NOT guaranteed and is an accepted
//! risk carried over from the original numbering scheme.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix for bill numbers
const BILL_PREFIX: &str = "BILL";

/// Prefix for customer account numbers
const ACCOUNT_PREFIX: &str = "ACC";

/// Capability for generating business identifiers
pub trait IdGenerator: Send + Sync {
    /// Next human-facing bill number (`BILL<n>`)
    fn next_bill_number(&self) -> String;

    /// Next customer account number (`ACC<n>`)
    fn next_account_number(&self) -> String;
}

/// Time-seeded monotonic counter generator
pub struct CounterIdGenerator {
    counter: AtomicU64,
}

impl CounterIdGenerator {
    /// Create a generator seeded from the current time
    pub fn new() -> Self {
        // Keeps the five-digit shape of the historical numbering.
        let seed = (Utc::now().timestamp_millis() as u64) % 100_000;
        Self::with_seed(seed)
    }

    /// Create a generator starting from a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            counter: AtomicU64::new(seed),
        }
    }

    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for CounterIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for CounterIdGenerator {
    fn next_bill_number(&self) -> String {
        format!("{}{}", BILL_PREFIX, self.next())
    }

    fn next_account_number(&self) -> String {
        format!("{}{}", ACCOUNT_PREFIX, self.next())
    }
}
