use std::sync::Arc;

use tokio::sync::broadcast;

use crate::engine::lifecycle::LifecycleController;
use crate::engine::scoring::SimilarityScorer;
use crate::models::event::TransitionEvent;
use crate::observability::metrics::Metrics;
use crate::store::OrderStore;
use crate::store::seed::demo_orders;

pub struct AppState {
    pub store: Arc<OrderStore>,
    pub lifecycle: LifecycleController,
    pub events_tx: broadcast::Sender<TransitionEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        event_buffer_size: usize,
        similarity_threshold: f64,
        scorer: Arc<dyn SimilarityScorer>,
    ) -> Self {
        let (events_tx, _unused_rx) = broadcast::channel(event_buffer_size);
        let store = Arc::new(OrderStore::new(demo_orders()));
        let metrics = Metrics::new();

        let lifecycle = LifecycleController::new(
            store.clone(),
            scorer,
            events_tx.clone(),
            metrics.clone(),
            similarity_threshold,
        );
        lifecycle.sync_status_metrics();

        Self {
            store,
            lifecycle,
            events_tx,
            metrics,
        }
    }
}
