//! Geometry change dispatch.
//!
//! Interaction handlers submit one [`EntityGeometryChange`] per user edit,
//! possibly from several tasks at once. A flush hands every pending change to
//! every registered listener in selected-time order; changes with equal
//! timestamps keep their submission order. Each change is delivered once.
//!
//! Ordering holds within a flush. A change submitted after a later-stamped
//! change was already flushed is still delivered, but out of order; the
//! dispatcher logs it as stale.

use crate::{DisplayConfig, Error, Result};
use hazard_spatial_types::{EditTimestamp, EntityGeometryChange};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Receives geometry edits from the dispatcher.
pub trait GeometryChangeListener: Send + Sync {
    fn geometry_changed(&self, change: &EntityGeometryChange);
}

struct PendingChange {
    change: EntityGeometryChange,
    /// Submission order, breaks ties between equal timestamps.
    seq: u64,
}

impl PendingChange {
    fn key(&self) -> (EditTimestamp, u64) {
        (self.change.selected_time(), self.seq)
    }
}

impl PartialEq for PendingChange {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PendingChange {}

impl PartialOrd for PendingChange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingChange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Default)]
struct ChangeQueue {
    heap: BinaryHeap<Reverse<PendingChange>>,
    next_seq: u64,
    /// Selected time of the newest change delivered so far.
    last_delivered: Option<EditTimestamp>,
}

/// Shared queue delivering geometry edits to listeners in timestamp order.
///
/// Cloning yields another handle to the same queue and listener set.
#[derive(Clone)]
pub struct GeometryChangeDispatcher {
    capacity: usize,
    queue: Arc<RwLock<ChangeQueue>>,
    listeners: Arc<RwLock<Vec<Arc<dyn GeometryChangeListener>>>>,
    /// Serializes flushes so deliveries from two flushes never interleave.
    delivery: Arc<Mutex<()>>,
}

impl GeometryChangeDispatcher {
    /// Creates a dispatcher bounded by `config.max_pending_changes`.
    pub fn new(config: &DisplayConfig) -> Self {
        Self::with_capacity(config.max_pending_changes)
    }

    /// Creates a dispatcher holding at most `capacity` pending changes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            queue: Arc::new(RwLock::new(ChangeQueue::default())),
            listeners: Arc::new(RwLock::new(Vec::new())),
            delivery: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the maximum number of pending changes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds a listener for all subsequent flushes.
    pub async fn register_listener(&self, listener: Arc<dyn GeometryChangeListener>) {
        self.listeners.write().await.push(listener);
    }

    /// Returns the number of registered listeners.
    pub async fn listener_count(&self) -> usize {
        self.listeners.read().await.len()
    }

    /// Queues a change for the next flush.
    pub async fn submit(&self, change: EntityGeometryChange) -> Result<()> {
        let mut queue = self.queue.write().await;
        if queue.heap.len() >= self.capacity {
            warn!(
                "Rejecting geometry change for {}: {} changes pending",
                change.identifier(),
                queue.heap.len()
            );
            return Err(Error::QueueFull {
                capacity: self.capacity,
            });
        }

        let seq = queue.next_seq;
        queue.next_seq += 1;
        debug!(
            "Queued geometry change for {} at {}",
            change.identifier(),
            change.selected_time()
        );
        queue.heap.push(Reverse(PendingChange { change, seq }));
        Ok(())
    }

    /// Number of changes waiting for a flush.
    pub async fn pending(&self) -> usize {
        self.queue.read().await.heap.len()
    }

    /// Selected time of the newest change delivered by any flush so far.
    pub async fn last_delivered(&self) -> Option<EditTimestamp> {
        self.queue.read().await.last_delivered
    }

    /// Delivers every pending change to every listener, oldest first.
    /// Returns the number of changes delivered.
    ///
    /// Order is only guaranteed among the changes of this flush. Changes
    /// older than one delivered by an earlier flush are delivered anyway and
    /// logged as stale.
    pub async fn flush(&self) -> usize {
        let _delivery = self.delivery.lock().await;

        let (changes, previous) = {
            let mut queue = self.queue.write().await;
            let mut changes = Vec::with_capacity(queue.heap.len());
            while let Some(Reverse(pending)) = queue.heap.pop() {
                changes.push(pending.change);
            }
            let previous = queue.last_delivered;
            if let Some(newest) = changes.last() {
                queue.last_delivered = Some(previous.map_or(newest.selected_time(), |p| {
                    p.max(newest.selected_time())
                }));
            }
            (changes, previous)
        };
        if changes.is_empty() {
            return 0;
        }

        if let Some(previous) = previous {
            let stale = changes
                .iter()
                .filter(|c| c.selected_time().is_before(&previous))
                .count();
            if stale > 0 {
                warn!(
                    "Delivering {} stale geometry change(s) older than {}",
                    stale, previous
                );
            }
        }

        let listeners = self.listeners.read().await.clone();
        if listeners.is_empty() {
            warn!("Dropping {} geometry change(s): no listeners", changes.len());
        }
        for change in &changes {
            for listener in &listeners {
                listener.geometry_changed(change);
            }
        }

        debug!(
            "Delivered {} geometry change(s) to {} listener(s)",
            changes.len(),
            listeners.len()
        );
        changes.len()
    }
}
