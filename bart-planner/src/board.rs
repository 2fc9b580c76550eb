//! Per-client trip boards.
//!
//! Each browser tab owns one board, its results area. Overlapping trip
//! queries from the same tab race to display their results. Each query takes
//! a ticket before it starts; only the holder of the most recent ticket may
//! publish, so a slow, stale response can never replace a newer one.
//! Queries from different tabs never compete.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::RwLock;
use tracing::debug;

use crate::pipeline::TripReport;

/// Permission to publish, issued in request order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct Shown {
    generation: u64,
    report: Option<Arc<TripReport>>,
}

/// The most recently published trip report for one client.
#[derive(Default)]
pub struct TripBoard {
    issued: AtomicU64,
    shown: RwLock<Shown>,
}

impl TripBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query. Any ticket issued earlier becomes stale.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest one issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Publish a report if `ticket` is still current.
    ///
    /// Returns `false`, leaving the board untouched, when a newer query has
    /// started since the ticket was issued.
    pub async fn publish(&self, ticket: Ticket, report: Arc<TripReport>) -> bool {
        let mut shown = self.shown.write().await;
        if !self.is_current(ticket) || ticket.0 <= shown.generation {
            debug!(generation = ticket.0, "discarding stale trip report");
            return false;
        }
        shown.generation = ticket.0;
        shown.report = Some(report);
        true
    }

    /// The report currently on the board, if any.
    pub async fn current(&self) -> Option<Arc<TripReport>> {
        self.shown.read().await.report.clone()
    }
}

/// Configuration for the client board registry.
#[derive(Debug, Clone)]
pub struct BoardsConfig {
    /// Drop a client's board after this long without a query.
    pub idle: Duration,

    /// Maximum number of client boards kept.
    pub max_clients: u64,
}

impl Default for BoardsConfig {
    fn default() -> Self {
        Self {
            idle: Duration::from_secs(30 * 60),
            max_clients: 10_000,
        }
    }
}

/// Trip boards keyed by client id.
pub struct TripBoards {
    boards: MokaCache<String, Arc<TripBoard>>,
}

impl TripBoards {
    pub fn new(config: &BoardsConfig) -> Self {
        let boards = MokaCache::builder()
            .time_to_idle(config.idle)
            .max_capacity(config.max_clients)
            .build();
        Self { boards }
    }

    /// The board owned by `client`, created on first use.
    pub async fn for_client(&self, client: &str) -> Arc<TripBoard> {
        self.boards
            .get_with(client.to_string(), async { Arc::new(TripBoard::new()) })
            .await
    }

    /// The board owned by `client`, if it has ever submitted a query.
    pub async fn existing(&self, client: &str) -> Option<Arc<TripBoard>> {
        self.boards.get(client).await
    }
}

impl Default for TripBoards {
    fn default() -> Self {
        Self::new(&BoardsConfig::default())
    }
}
