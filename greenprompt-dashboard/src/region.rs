use greenprompt_utils::{RequestSequencer, RequestTicket};
use tokio::sync::RwLock;
use tracing::debug;

/// One independently updated area of the dashboard.
///
/// Each region owns its own request sequencer and view, so regions never share
/// mutable state. A fetch takes a ticket with [`Region::begin`] before going out,
/// and its result is applied with [`Region::apply`] only if no newer fetch for the
/// same region was started in the meantime.
#[derive(Debug)]
pub struct Region<T> {
    name: &'static str,
    sequencer: RequestSequencer,
    view: RwLock<Option<T>>,
}

impl<T: Clone> Region<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sequencer: RequestSequencer::new(),
            view: RwLock::new(None),
        }
    }

    /// Registers a new in-flight request for this region.
    pub fn begin(&self) -> RequestTicket {
        self.sequencer.issue()
    }

    /// Applies a result computed from the previous view, if `ticket` is still the latest.
    ///
    /// The ticket check and the write happen under the same lock, so two completions
    /// can never interleave between them. Returns `false` when the result was stale
    /// and has been discarded.
    pub async fn apply<F>(&self, ticket: RequestTicket, next: F) -> bool
    where
        F: FnOnce(Option<&T>) -> T,
    {
        let mut view = self.view.write().await;
        if !self.sequencer.is_latest(ticket) {
            debug!(
                target = "greenprompt-dashboard",
                event = "stale-response-discarded",
                region = self.name,
                ticket = ticket.value(),
                latest = self.sequencer.latest().map(RequestTicket::value),
            );
            return false;
        }
        let updated = next(view.as_ref());
        *view = Some(updated);
        true
    }

    /// The current view, or `None` while the first request is still in flight.
    pub async fn current(&self) -> Option<T> {
        self.view.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_ticket_is_applied() {
        let region = Region::<u32>::new("test");
        assert!(region.current().await.is_none());

        let ticket = region.begin();
        assert!(region.apply(ticket, |_| 7).await);
        assert_eq!(region.current().await, Some(7));
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let region = Region::<&'static str>::new("test");
        let slow = region.begin();
        let fast = region.begin();

        assert!(region.apply(fast, |_| "fresh").await);
        assert!(!region.apply(slow, |_| "stale").await);
        assert_eq!(region.current().await, Some("fresh"));
    }

    #[tokio::test]
    async fn test_older_response_arriving_first_is_also_discarded() {
        let region = Region::<&'static str>::new("test");
        let older = region.begin();
        let newer = region.begin();

        assert!(!region.apply(older, |_| "older").await);
        assert!(region.current().await.is_none());
        assert!(region.apply(newer, |_| "newer").await);
        assert_eq!(region.current().await, Some("newer"));
    }

    #[tokio::test]
    async fn test_apply_sees_previous_view() {
        let region = Region::<u32>::new("test");
        let first = region.begin();
        region.apply(first, |prev| prev.copied().unwrap_or(0) + 1).await;
        let second = region.begin();
        region.apply(second, |prev| prev.copied().unwrap_or(0) + 1).await;
        assert_eq!(region.current().await, Some(2));
    }
}
