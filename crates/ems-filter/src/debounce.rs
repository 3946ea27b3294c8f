//! Search-as-you-type bookkeeping.
//!
//! Search boxes re-run the filter on every keystroke, and evaluations may
//! finish out of order. [`SearchDebouncer`] hands each submitted text a
//! [`Ticket`]; only results carrying the current ticket should be shown,
//! so the last text typed is the one that ends up applied.
//!
//! There are no timers here. Callers that want a delay wait before
//! calling [`SearchDebouncer::submit`].

use tracing::trace;

/// Identifies one submitted search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    /// The generation number of this ticket.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Tracks the latest search text and which evaluation is still wanted.
#[derive(Debug, Clone, Default)]
pub struct SearchDebouncer {
    generation: u64,
    latest: String,
}

impl SearchDebouncer {
    /// Creates a debouncer with an empty search text.
    pub fn new() -> Self {
        SearchDebouncer::default()
    }

    /// Records a new search text and returns its ticket.
    ///
    /// Every earlier ticket becomes stale, even if the text did not change.
    pub fn submit(&mut self, text: impl Into<String>) -> Ticket {
        self.generation += 1;
        self.latest = text.into();
        trace!(generation = self.generation, text = %self.latest, "search submitted");
        Ticket(self.generation)
    }

    /// Returns `true` if `ticket` belongs to the latest submission.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// The last submitted text.
    pub fn latest(&self) -> &str {
        &self.latest
    }

    /// Ticket of the latest submission, if anything was submitted.
    pub fn current(&self) -> Option<Ticket> {
        (self.generation > 0).then_some(Ticket(self.generation))
    }
}
