//! Latest-wins result slot for superseding in-flight queries.
//!
//! Queries are never cancelled. Each submission takes a [`QueryTicket`] with
//! a fresh sequence number, and a finished query may only publish while its
//! ticket is still the newest one issued. A slow query that completes after
//! a newer submission simply has its result dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use feedscope_chains::ChainDirectory;
use feedscope_rpc::Connector;
use feedscope_types::{QueryError, QueryRequest};
use parking_lot::RwLock;
use tracing::debug;

use crate::{QueryEngine, QueryReport};

/// Proof of a submission, ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

impl QueryTicket {
    /// Returns the sequence number.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// The single current-result slot.
#[derive(Debug)]
pub struct QuerySlot<T> {
    latest: AtomicU64,
    current: RwLock<Option<(QueryTicket, Arc<T>)>>,
}

impl<T> Default for QuerySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QuerySlot<T> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }

    /// Issues a new ticket and clears the previous result.
    pub fn begin(&self) -> QueryTicket {
        let ticket = QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        *self.current.write() = None;
        ticket
    }

    /// Returns true if no newer ticket has been issued.
    #[must_use]
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Stores `value` if `ticket` is still the latest.
    ///
    /// Returns false, dropping `value`, when a newer submission exists.
    pub fn publish(&self, ticket: QueryTicket, value: T) -> bool {
        let mut current = self.current.write();
        // checked under the lock so a concurrent begin() cannot interleave
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "discarding superseded result");
            return false;
        }
        *current = Some((ticket, Arc::new(value)));
        true
    }

    /// Returns the published result, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<T>> {
        self.current.read().as_ref().map(|(_, value)| Arc::clone(value))
    }

    /// Returns the ticket of the published result, if any.
    #[must_use]
    pub fn current_ticket(&self) -> Option<QueryTicket> {
        self.current.read().as_ref().map(|(ticket, _)| *ticket)
    }
}

/// Query outcome as held in a [`QuerySlot`].
pub type SlotResult = Result<QueryReport, QueryError>;

/// An engine paired with a result slot.
///
/// Submissions may overlap; only the newest one's outcome is ever visible
/// through [`QuerySession::current`].
#[derive(Debug)]
pub struct QuerySession<D, C> {
    engine: QueryEngine<D, C>,
    slot: QuerySlot<SlotResult>,
}

impl<D: ChainDirectory, C: Connector> QuerySession<D, C> {
    /// Creates a session with an empty slot.
    pub fn new(engine: QueryEngine<D, C>) -> Self {
        Self {
            engine,
            slot: QuerySlot::new(),
        }
    }

    /// Returns the underlying engine.
    pub const fn engine(&self) -> &QueryEngine<D, C> {
        &self.engine
    }

    /// Runs `request` and publishes its outcome if no newer submission
    /// started meanwhile.
    ///
    /// Returns the ticket and whether the outcome was published.
    pub async fn submit(&self, request: &QueryRequest) -> (QueryTicket, bool) {
        let ticket = self.slot.begin();
        let outcome = self.engine.run(request).await;
        let published = self.slot.publish(ticket, outcome);
        (ticket, published)
    }

    /// Returns the newest published outcome.
    pub fn current(&self) -> Option<Arc<SlotResult>> {
        self.slot.current()
    }
}
