use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one outgoing request for a single display region.
///
/// Tickets are only comparable with tickets issued by the same [`RequestSequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// The raw sequence number, mostly useful for logging.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonically increasing request counter for one display region.
///
/// Every fetch for a region takes a ticket before it goes out. When the response
/// comes back, it is only applied if no newer ticket has been issued in the meantime,
/// so a slow response can never overwrite the result of a request issued after it.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, strictly greater than every ticket issued before.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Returns `true` if `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// The most recently issued ticket, if any.
    pub fn latest(&self) -> Option<RequestTicket> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            n => Some(RequestTicket(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_tickets_are_strictly_increasing() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        let third = sequencer.issue();
        assert!(first < second);
        assert!(second < third);
        assert_eq!(first.value(), 1);
        assert_eq!(third.value(), 3);
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let sequencer = RequestSequencer::new();
        assert!(sequencer.latest().is_none());

        let stale = sequencer.issue();
        assert!(sequencer.is_latest(stale));

        let fresh = sequencer.issue();
        assert!(!sequencer.is_latest(stale));
        assert!(sequencer.is_latest(fresh));
        assert_eq!(sequencer.latest(), Some(fresh));
    }

    #[test]
    fn test_concurrent_issue_never_repeats() {
        let sequencer = Arc::new(RequestSequencer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sequencer = Arc::clone(&sequencer);
                std::thread::spawn(move || {
                    (0..100).map(|_| sequencer.issue().value()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
        assert_eq!(sequencer.latest().map(RequestTicket::value), Some(800));
    }
}
