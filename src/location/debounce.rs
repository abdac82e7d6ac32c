//! Keystroke debouncing for forward suggestions.
//!
//! Every keystroke takes a ticket from a monotonic generation counter and
//! (re)starts a quiet-period timer. Only the response carrying the latest
//! ticket may reach the visible list; anything older is dropped on arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::providers::GeocodeQueryRouter;
use super::types::RawGeocodeResult;
use crate::config::SuggestionConfig;

/// The visible suggestion list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    /// Ticket of the request that produced this list (0 = initial).
    pub generation: u64,
    pub query: String,
    pub results: Vec<RawGeocodeResult>,
}

/// Holds the visible list and decides which responses may update it.
pub struct SuggestionBoard {
    tx: watch::Sender<Suggestions>,
    issued: AtomicU64,
}

impl Default for SuggestionBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionBoard {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Suggestions::default());
        Self {
            tx,
            issued: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.tx.subscribe()
    }

    /// Take a fresh ticket, superseding every earlier one.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest()
    }

    /// Publish `results` if `ticket` is still the latest. Returns whether
    /// the list changed hands.
    pub fn apply(&self, ticket: u64, query: String, results: Vec<RawGeocodeResult>) -> bool {
        let applied = self.tx.send_if_modified(|current| {
            if !self.is_current(ticket) {
                return false;
            }
            *current = Suggestions {
                generation: ticket,
                query,
                results,
            };
            true
        });
        if !applied {
            debug!(ticket, latest = self.latest(), "discarding stale suggestions");
        }
        applied
    }

    /// Invalidate everything in flight and empty the list.
    pub fn clear(&self) {
        let ticket = self.issue();
        self.tx.send_replace(Suggestions {
            generation: ticket,
            ..Default::default()
        });
    }

    pub fn current(&self) -> Suggestions {
        self.tx.borrow().clone()
    }
}

/// Wraps `forward_search` with a quiet-period timer and stale-response guard.
pub struct SuggestionDebouncer {
    router: Arc<GeocodeQueryRouter>,
    board: Arc<SuggestionBoard>,
    quiet: Duration,
    min_chars: usize,
    pending: Option<JoinHandle<()>>,
}

impl SuggestionDebouncer {
    pub fn new(router: Arc<GeocodeQueryRouter>, config: &SuggestionConfig) -> Self {
        let min_chars = router.min_query_chars();
        Self {
            router,
            board: Arc::new(SuggestionBoard::new()),
            quiet: config.quiet_period(),
            min_chars,
            pending: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.board.subscribe()
    }

    pub fn board(&self) -> &Arc<SuggestionBoard> {
        &self.board
    }

    /// Feed the current input text. Returns `true` if a lookup is now
    /// scheduled, `false` if the text was too short and the list was cleared.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_input(&mut self, text: &str) -> bool {
        self.abort_pending();

        let text = text.trim().to_string();
        if text.chars().count() < self.min_chars {
            self.board.clear();
            return false;
        }

        let ticket = self.board.issue();
        let router = Arc::clone(&self.router);
        let board = Arc::clone(&self.board);
        let quiet = self.quiet;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if !board.is_current(ticket) {
                return;
            }
            debug!(ticket, query = %text, "dispatching forward search");
            let results = router.forward_search(&text).await;
            board.apply(ticket, text, results);
        }));
        true
    }

    /// Drop any pending or in-flight lookup and clear the list.
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.board.clear();
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SuggestionDebouncer {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::test_util::{hit, FakeGeocoder};
    use tokio::time::sleep;

    fn debouncer(fake: &Arc<FakeGeocoder>) -> SuggestionDebouncer {
        let config = SuggestionConfig::default();
        let router = Arc::new(GeocodeQueryRouter::new(fake.clone(), &config));
        SuggestionDebouncer::new(router, &config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_issues_one_search_with_last_text() {
        let fake = Arc::new(
            FakeGeocoder::new().with_forward("Lekki", 0, vec![hit("Lekki, Lagos", "Lagos", "Lagos")]),
        );
        let mut d = debouncer(&fake);
        let mut rx = d.subscribe();

        for text in ["Lek", "Lekk", "Lekki"] {
            assert!(d.on_input(text));
            sleep(Duration::from_millis(100)).await;
        }
        rx.changed().await.unwrap();

        assert_eq!(fake.calls(), vec!["Lekki".to_string()]);
        let visible = rx.borrow().clone();
        assert_eq!(visible.query, "Lekki");
        assert_eq!(visible.results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_chars_never_hit_network() {
        let fake = Arc::new(FakeGeocoder::new());
        let mut d = debouncer(&fake);

        assert!(!d.on_input("La"));
        sleep(Duration::from_secs(2)).await;
        assert!(fake.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_chars_hit_network_after_quiet_period() {
        let fake = Arc::new(FakeGeocoder::new());
        let mut d = debouncer(&fake);
        let mut rx = d.subscribe();

        assert!(d.on_input("Lag"));
        sleep(Duration::from_millis(200)).await;
        assert!(fake.calls().is_empty());

        rx.changed().await.unwrap();
        assert_eq!(fake.calls(), vec!["Lag".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_in_flight_request_is_discarded() {
        let fake = Arc::new(
            FakeGeocoder::new()
                .with_forward("Lag", 1_000, vec![hit("Lagos Island", "Lagos", "Lagos")])
                .with_forward("Lagos", 10, vec![hit("Lagos, Nigeria", "Lagos", "Lagos")]),
        );
        let mut d = debouncer(&fake);

        d.on_input("Lag");
        sleep(Duration::from_millis(400)).await; // "Lag" now in flight
        d.on_input("Lagos");
        sleep(Duration::from_secs(3)).await;

        assert_eq!(fake.calls(), vec!["Lag".to_string(), "Lagos".to_string()]);
        let visible = d.board().current();
        assert_eq!(visible.query, "Lagos");
        assert_eq!(visible.results[0].display_name, "Lagos, Nigeria");
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_clears_immediately() {
        let fake = Arc::new(
            FakeGeocoder::new().with_forward("Yaba", 0, vec![hit("Yaba, Lagos", "Lagos", "Lagos")]),
        );
        let mut d = debouncer(&fake);

        d.on_input("Yaba");
        sleep(Duration::from_millis(500)).await;
        assert_eq!(d.board().current().results.len(), 1);

        d.on_input("Ya");
        assert!(d.board().current().results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_timer() {
        let fake = Arc::new(FakeGeocoder::new());
        let mut d = debouncer(&fake);

        d.on_input("Ikeja");
        d.cancel();
        sleep(Duration::from_secs(1)).await;
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_board_rejects_older_ticket_after_newer_applied() {
        let board = SuggestionBoard::new();
        let a = board.issue();
        let b = board.issue();

        assert!(board.apply(b, "Lagos".into(), vec![hit("B", "Lagos", "Lagos")]));
        assert!(!board.apply(a, "Lag".into(), vec![hit("A", "Lagos", "Lagos")]));

        let visible = board.current();
        assert_eq!(visible.generation, b);
        assert_eq!(visible.results[0].display_name, "B");
    }

    #[test]
    fn test_board_rejects_superseded_ticket_even_before_newer_reply() {
        let board = SuggestionBoard::new();
        let a = board.issue();
        let _b = board.issue();
        assert!(!board.apply(a, "Lag".into(), vec![hit("A", "Lagos", "Lagos")]));
        assert!(board.current().results.is_empty());
    }

    #[test]
    fn test_board_clear_invalidates_outstanding_ticket() {
        let board = SuggestionBoard::new();
        let a = board.issue();
        board.clear();
        assert!(!board.apply(a, "Lag".into(), vec![hit("A", "Lagos", "Lagos")]));
    }
}
