use geo::Point;
use hazard_spatial_display::{DisplayConfig, Error, GeometryChangeDispatcher, GeometryChangeListener};
use hazard_spatial_types::{EditTimestamp, EntityGeometryChange, SpatialIdentifier};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct RecordingListener {
    received: Mutex<Vec<EntityGeometryChange>>,
}

impl RecordingListener {
    fn times(&self) -> Vec<i64> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.selected_time().wall_time_ms())
            .collect()
    }
}

impl GeometryChangeListener for RecordingListener {
    fn geometry_changed(&self, change: &EntityGeometryChange) {
        self.received.lock().unwrap().push(change.clone());
    }
}

fn outline() -> SpatialIdentifier {
    SpatialIdentifier::hazard(Some("EVT1"), Some("outline"))
}

fn change_at(ms: i64, x: f64) -> EntityGeometryChange {
    EntityGeometryChange::new(outline(), Point::new(x, 0.0), EditTimestamp::from_millis(ms))
}

async fn dispatcher_with_listener() -> (GeometryChangeDispatcher, Arc<RecordingListener>) {
    init_tracing();
    let dispatcher = GeometryChangeDispatcher::new(&DisplayConfig::default());
    let listener = Arc::new(RecordingListener::default());
    dispatcher.register_listener(listener.clone()).await;
    (dispatcher, listener)
}

// ── Ordering ─────────────────────────────────────────────────────

#[tokio::test]
async fn delivers_in_timestamp_order() {
    let (dispatcher, listener) = dispatcher_with_listener().await;
    dispatcher.submit(change_at(101, 1.0)).await.unwrap();
    dispatcher.submit(change_at(100, 0.0)).await.unwrap();
    dispatcher.submit(change_at(102, 2.0)).await.unwrap();

    assert_eq!(dispatcher.flush().await, 3);
    assert_eq!(listener.times(), vec![100, 101, 102]);
}

#[tokio::test]
async fn equal_timestamps_keep_submission_order() {
    let (dispatcher, listener) = dispatcher_with_listener().await;
    dispatcher.submit(change_at(100, 1.0)).await.unwrap();
    dispatcher.submit(change_at(100, 2.0)).await.unwrap();
    dispatcher.flush().await;

    let xs: Vec<f64> = listener
        .received
        .lock()
        .unwrap()
        .iter()
        .map(|c| match c.geometry() {
            geo::Geometry::Point(p) => p.x(),
            _ => f64::NAN,
        })
        .collect();
    assert_eq!(xs, vec![1.0, 2.0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submitters_are_ordered() {
    let (dispatcher, listener) = dispatcher_with_listener().await;

    let mut handles = Vec::new();
    for task in 0..4i64 {
        let dispatcher = dispatcher.clone();
        handles.push(tokio::spawn(async move {
            for i in (0..25i64).rev() {
                dispatcher.submit(change_at(i * 4 + task, 0.0)).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(dispatcher.flush().await, 100);
    let times = listener.times();
    assert_eq!(times, (0..100).collect::<Vec<_>>());
}

#[tokio::test]
async fn last_delivered_tracks_newest_flushed_change() {
    let (dispatcher, _listener) = dispatcher_with_listener().await;
    assert_eq!(dispatcher.last_delivered().await, None);

    dispatcher.submit(change_at(101, 0.0)).await.unwrap();
    dispatcher.submit(change_at(100, 0.0)).await.unwrap();
    dispatcher.flush().await;
    assert_eq!(dispatcher.last_delivered().await, Some(EditTimestamp::from_millis(101)));
}

#[tokio::test]
async fn late_change_after_flush_is_still_delivered() {
    let (dispatcher, listener) = dispatcher_with_listener().await;
    dispatcher.submit(change_at(101, 0.0)).await.unwrap();
    dispatcher.flush().await;

    // Older than what was already delivered: ordering only holds per flush.
    dispatcher.submit(change_at(100, 0.0)).await.unwrap();
    assert_eq!(dispatcher.flush().await, 1);
    assert_eq!(listener.times(), vec![101, 100]);
    assert_eq!(dispatcher.last_delivered().await, Some(EditTimestamp::from_millis(101)));
}

// ── Delivery ─────────────────────────────────────────────────────

#[tokio::test]
async fn each_change_delivered_once() {
    let (dispatcher, listener) = dispatcher_with_listener().await;
    dispatcher.submit(change_at(1, 0.0)).await.unwrap();
    assert_eq!(dispatcher.pending().await, 1);

    assert_eq!(dispatcher.flush().await, 1);
    assert_eq!(dispatcher.pending().await, 0);
    assert_eq!(dispatcher.flush().await, 0);
    assert_eq!(listener.times(), vec![1]);
}

#[tokio::test]
async fn every_listener_receives_changes() {
    let (dispatcher, first) = dispatcher_with_listener().await;
    let second = Arc::new(RecordingListener::default());
    dispatcher.register_listener(second.clone()).await;
    assert_eq!(dispatcher.listener_count().await, 2);

    dispatcher.submit(change_at(7, 0.0)).await.unwrap();
    dispatcher.flush().await;
    assert_eq!(first.times(), vec![7]);
    assert_eq!(second.times(), vec![7]);
}

#[tokio::test]
async fn flush_without_listeners_drains_queue() {
    let dispatcher = GeometryChangeDispatcher::with_capacity(4);
    dispatcher.submit(change_at(1, 0.0)).await.unwrap();
    assert_eq!(dispatcher.flush().await, 1);
    assert_eq!(dispatcher.pending().await, 0);
}

// ── Capacity ─────────────────────────────────────────────────────

#[tokio::test]
async fn submit_rejected_when_full() {
    let dispatcher = GeometryChangeDispatcher::with_capacity(2);
    assert_eq!(dispatcher.capacity(), 2);
    dispatcher.submit(change_at(1, 0.0)).await.unwrap();
    dispatcher.submit(change_at(2, 0.0)).await.unwrap();

    let err = dispatcher.submit(change_at(3, 0.0)).await.unwrap_err();
    assert!(matches!(err, Error::QueueFull { capacity: 2 }));

    dispatcher.flush().await;
    assert!(dispatcher.submit(change_at(3, 0.0)).await.is_ok());
}

#[tokio::test]
async fn capacity_follows_config() {
    let config = DisplayConfig {
        max_pending_changes: 16,
        ..DisplayConfig::default()
    };
    assert_eq!(GeometryChangeDispatcher::new(&config).capacity(), 16);
}
