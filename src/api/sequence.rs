//! Stale-response discipline
//!
//! In-flight list fetches are never hard-cancelled; each request takes a
//! ticket from a monotonically increasing sequence and a response is
//! accepted only while its ticket is still the latest issued. A fast
//! second request racing a slow first one can therefore never be
//! clobbered by the stale result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Monotonic ticket issuer for one logical view
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

/// Ticket identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSequence {
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the latest issued
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Holder keeping only the value of the latest-issued request
#[derive(Debug, Default)]
pub struct Latest<T> {
    sequence: RequestSequence,
    value: Mutex<Option<(u64, T)>>,
}

impl<T> Latest<T> {
    pub const fn new() -> Self {
        Self {
            sequence: RequestSequence::new(),
            value: Mutex::new(None),
        }
    }

    /// Take a ticket before starting a request
    pub fn issue(&self) -> Ticket {
        self.sequence.issue()
    }

    /// Store `value` only if `ticket` is still the latest issued.
    /// Returns whether the value was accepted; late results are dropped.
    pub fn accept(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.sequence.is_current(ticket) {
            return false;
        }
        *slot = Some((ticket.0, value));
        true
    }

    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let sequence = RequestSequence::new();
        let first = sequence.issue();
        assert!(sequence.is_current(first));

        let second = sequence.issue();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        // Scenario: two fetches issued back to back, the first response
        // arrives after the second; the displayed value reflects only the
        // later-issued request.
        let latest: Latest<Vec<&str>> = Latest::new();
        let first = latest.issue();
        let second = latest.issue();

        assert!(latest.accept(second, vec!["fresh"]));
        assert!(!latest.accept(first, vec!["stale"]));
        assert_eq!(latest.get(), Some(vec!["fresh"]));
    }

    #[test]
    fn test_in_order_responses_both_accepted() {
        let latest: Latest<u32> = Latest::new();
        let first = latest.issue();
        assert!(latest.accept(first, 1));

        let second = latest.issue();
        assert!(latest.accept(second, 2));
        assert_eq!(latest.get(), Some(2));
    }
}
