use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Debounce gate for search-triggered fetches.
///
/// Each keystroke calls [`Debouncer::acquire`]; only the call that is still
/// the newest when the delay elapses gets the go-ahead, so a fast typist
/// produces one request instead of one per character.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

/// Default delay matching the interactive-search feel the dashboards expect.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the delay; returns `true` only if no newer `acquire` was
    /// issued in the meantime.
    pub async fn acquire(&self) -> bool {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        my_generation == self.generation.load(Ordering::SeqCst)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}
