//! Generation counter for discarding stale results.
//!
//! A view takes a [`Ticket`] when it starts work. Any newer selection or a
//! refresh advances the [`Generation`]; the old ticket then refuses to commit.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Superseded;

/// Shared, monotonically increasing counter.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Ticket for the current generation.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        Ticket { issued: self.current(), counter: Arc::clone(&self.0) }
    }

    /// Start a new generation, invalidating every earlier ticket.
    #[must_use = "the returned ticket guards the new selection"]
    pub fn advance(&self) -> Ticket {
        let issued = self.0.fetch_add(1, Ordering::AcqRel) + 1;
        Ticket { issued, counter: Arc::clone(&self.0) }
    }
}

/// Captured generation value.
#[derive(Debug, Clone)]
pub struct Ticket {
    issued: u64,
    counter: Arc<AtomicU64>,
}

impl Ticket {
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.issued
    }

    /// Hand `value` back only if no newer generation started.
    pub fn commit<T>(&self, value: T) -> Result<T, Superseded> {
        let current = self.counter.load(Ordering::Acquire);
        if current == self.issued {
            Ok(value)
        } else {
            Err(Superseded { issued: self.issued, current })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ticket_commits() {
        let generation = Generation::new();
        let ticket = generation.ticket();
        assert!(ticket.is_current());
        assert_eq!(ticket.commit(7), Ok(7));
    }

    #[test]
    fn test_advance_supersedes_older_tickets() {
        let generation = Generation::new();
        let old = generation.ticket();
        let new = generation.advance();

        assert!(!old.is_current());
        assert_eq!(old.commit("stale"), Err(Superseded { issued: 0, current: 1 }));
        assert_eq!(new.commit("fresh"), Ok("fresh"));
    }

    #[test]
    fn test_clones_share_counter() {
        let generation = Generation::new();
        let ticket = generation.ticket();
        let _ = generation.clone().advance();
        assert!(!ticket.is_current());
        assert_eq!(generation.current(), 1);
    }
}
