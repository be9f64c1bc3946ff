//! Tests for trigger module

use super::*;
use futures::FutureExt;
use pretty_assertions::assert_eq;
use std::sync::atomic::AtomicUsize;
use test_case::test_case;
use tokio::sync::Notify;

/// Let spawned worker and callback tasks run to quiescence
async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Test doubles
// ============================================================================

struct StaticGate {
    has_more: AtomicBool,
    loading: AtomicBool,
}

impl StaticGate {
    fn new(has_more: bool, loading: bool) -> Arc<Self> {
        Arc::new(Self {
            has_more: AtomicBool::new(has_more),
            loading: AtomicBool::new(loading),
        })
    }

    fn set_has_more(&self, value: bool) {
        self.has_more.store(value, Ordering::SeqCst);
    }
}

#[async_trait]
impl TriggerGate for StaticGate {
    async fn has_more(&self) -> bool {
        self.has_more.load(Ordering::SeqCst)
    }

    async fn loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

fn counting_callback(
    calls: Arc<AtomicUsize>,
) -> impl Fn() -> BoxFuture<'static, ()> + Send + Sync + 'static {
    move || {
        let calls = Arc::clone(&calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
        }
        .boxed()
    }
}

// ============================================================================
// Visibility-to-callback bridging
// ============================================================================

#[tokio::test(flavor = "current_thread")]
async fn test_visible_event_invokes_callback() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut trigger = VisibilityTrigger::default();
    let sentinel = trigger
        .attach(StaticGate::new(true, false), counting_callback(Arc::clone(&calls)))
        .await;

    sentinel.report_visible();
    settle().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(sentinel.is_observed());
}

#[tokio::test(flavor = "current_thread")]
async fn test_hidden_events_are_ignored() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut trigger = VisibilityTrigger::default();
    let sentinel = trigger
        .attach(StaticGate::new(true, false), counting_callback(Arc::clone(&calls)))
        .await;

    sentinel.report_hidden();
    sentinel.report(SentinelEvent {
        intersecting: false,
        ratio: 0.0,
    });
    settle().await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn test_subthreshold_events_are_ignored() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut trigger = VisibilityTrigger::new(TriggerOptions::default().with_threshold(0.5));
    let sentinel = trigger
        .attach(StaticGate::new(true, false), counting_callback(Arc::clone(&calls)))
        .await;

    sentinel.report(SentinelEvent {
        intersecting: true,
        ratio: 0.25,
    });
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    sentinel.report(SentinelEvent {
        intersecting: true,
        ratio: 0.75,
    });
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn test_events_while_pending_are_dropped() {
    let calls = Arc::new(AtomicUsize::new(0));
    let release = Arc::new(Notify::new());
    let mut trigger = VisibilityTrigger::default();

    let callback = {
        let calls = Arc::clone(&calls);
        let release = Arc::clone(&release);
        move || {
            let calls = Arc::clone(&calls);
            let release = Arc::clone(&release);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                release.notified().await;
            }
            .boxed()
        }
    };
    let sentinel = trigger.attach(StaticGate::new(true, false), callback).await;

    sentinel.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Rapid re-intersection while the load is outstanding
    sentinel.report_visible();
    sentinel.report_visible();
    sentinel.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Dropped signals are not replayed after the call completes
    release.notify_one();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The guard is clear again: a fresh event fires
    sentinel.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Gating
// ============================================================================

#[test_case(true, 0 ; "load outstanding drops the signal")]
#[test_case(false, 1 ; "idle gate lets the signal through")]
#[tokio::test(flavor = "current_thread")]
async fn test_loading_gate(loading: bool, expected_calls: usize) {
    let gate = StaticGate::new(true, loading);
    let calls = Arc::new(AtomicUsize::new(0));
    let mut trigger = VisibilityTrigger::default();
    let sentinel = trigger
        .attach(Arc::clone(&gate) as Arc<dyn TriggerGate>, counting_callback(Arc::clone(&calls)))
        .await;

    sentinel.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), expected_calls);
}

#[tokio::test(flavor = "current_thread")]
async fn test_exhausted_gate_drops_signal() {
    let gate = StaticGate::new(true, false);
    let calls = Arc::new(AtomicUsize::new(0));
    let mut trigger = VisibilityTrigger::default();
    let sentinel = trigger
        .attach(Arc::clone(&gate) as Arc<dyn TriggerGate>, counting_callback(Arc::clone(&calls)))
        .await;

    gate.set_has_more(false);
    sentinel.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn test_attach_with_exhausted_listing_observes_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut trigger = VisibilityTrigger::default();
    let sentinel = trigger
        .attach(StaticGate::new(false, false), counting_callback(Arc::clone(&calls)))
        .await;

    assert!(!sentinel.is_observed());
    assert!(!trigger.is_attached());

    sentinel.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Detach and guard recovery
// ============================================================================

#[tokio::test(flavor = "current_thread")]
async fn test_detach_stops_observing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut trigger = VisibilityTrigger::default();
    let sentinel = trigger
        .attach(StaticGate::new(true, false), counting_callback(Arc::clone(&calls)))
        .await;

    trigger.detach();
    settle().await;
    assert!(!sentinel.is_observed());
    assert!(!trigger.is_attached());

    sentinel.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn test_reattach_replaces_previous_sentinel() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut trigger = VisibilityTrigger::default();
    let first = trigger
        .attach(StaticGate::new(true, false), counting_callback(Arc::clone(&calls)))
        .await;
    let second = trigger
        .attach(StaticGate::new(true, false), counting_callback(Arc::clone(&calls)))
        .await;
    settle().await;

    assert!(!first.is_observed());
    assert!(second.is_observed());

    first.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    second.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn test_drop_detaches() {
    let calls = Arc::new(AtomicUsize::new(0));
    let sentinel = {
        let mut trigger = VisibilityTrigger::default();
        trigger
            .attach(StaticGate::new(true, false), counting_callback(Arc::clone(&calls)))
            .await
    };
    settle().await;

    assert!(!sentinel.is_observed());
}

#[tokio::test(flavor = "current_thread")]
async fn test_guard_clears_after_callback_panic() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut trigger = VisibilityTrigger::default();

    let callback = {
        let calls = Arc::clone(&calls);
        move || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                panic!("callback blew up");
            }
            .boxed()
        }
    };
    let sentinel = trigger.attach(StaticGate::new(true, false), callback).await;

    sentinel.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The pending flag cleared despite the panic; the trigger still works
    sentinel.report_visible();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Options and geometry
// ============================================================================

#[test]
fn test_default_options() {
    let options = TriggerOptions::default();
    assert!((options.root_margin - 100.0).abs() < f64::EPSILON);
    assert!(options.threshold.abs() < f64::EPSILON);
}

#[test_case(1000.0, 50.0, false, 0.0 ; "well below the margin zone")]
#[test_case(650.0, 50.0, true, 1.0 ; "fully inside the margin zone")]
#[test_case(675.0, 50.0, true, 0.5 ; "half inside the margin zone")]
#[test_case(-300.0, 50.0, false, 0.0 ; "scrolled past above")]
fn test_observe_geometry(sentinel_top: f64, sentinel_height: f64, intersecting: bool, ratio: f64) {
    let options = TriggerOptions::default(); // margin 100
    let event = options.observe(&ViewportGeometry {
        scroll_offset: 0.0,
        viewport_height: 600.0,
        sentinel_top,
        sentinel_height,
    });

    assert_eq!(event.intersecting, intersecting);
    assert!((event.ratio - ratio).abs() < 1e-9);
}

#[test]
fn test_observe_zero_height_sentinel() {
    let options = TriggerOptions::default();
    let geometry = ViewportGeometry {
        scroll_offset: 0.0,
        viewport_height: 600.0,
        sentinel_top: 300.0,
        sentinel_height: 0.0,
    };

    let event = options.observe(&geometry);
    assert!(event.intersecting);
    // Area-less markers report a zero ratio but still fire at threshold 0
    assert!(event.crosses(&options));
    assert!(!event.crosses(&options.with_threshold(0.5)));

    let far = ViewportGeometry {
        sentinel_top: 800.0,
        ..geometry
    };
    assert!(!options.observe(&far).intersecting);
}
