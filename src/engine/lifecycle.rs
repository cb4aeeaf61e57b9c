use std::sync::Arc;

use chrono::Utc;
use dashmap::DashSet;
use prometheus::IntGauge;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::scoring::SimilarityScorer;
use crate::error::AppError;
use crate::models::event::{TransitionEvent, TransitionKind};
use crate::models::order::{Order, OrderStatus, OrderUpdate};
use crate::observability::metrics::Metrics;
use crate::store::OrderStore;

/// A trigger that may advance an order's status.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    DispatchPhotoCaptured {
        photo: String,
    },
    ReturnPhotoCaptured {
        photo: String,
        reason: Option<String>,
    },
    ComparisonDecided {
        score: f64,
        threshold: f64,
    },
}

impl LifecycleEvent {
    pub fn kind(&self) -> TransitionKind {
        match self {
            LifecycleEvent::DispatchPhotoCaptured { .. } => TransitionKind::DispatchPhotoCaptured,
            LifecycleEvent::ReturnPhotoCaptured { .. } => TransitionKind::ReturnPhotoCaptured,
            LifecycleEvent::ComparisonDecided { .. } => TransitionKind::ComparisonDecided,
        }
    }
}

/// The transition table. Pure: inspects the current order, validates the
/// event's preconditions, and names exactly the fields to write.
pub fn next_update(order: &Order, event: &LifecycleEvent) -> Result<OrderUpdate, AppError> {
    match (order.status, event) {
        (OrderStatus::Pending, LifecycleEvent::DispatchPhotoCaptured { photo }) => {
            Ok(OrderUpdate::Dispatched {
                dispatch_photo: photo.clone(),
            })
        }
        (OrderStatus::Dispatched, LifecycleEvent::ReturnPhotoCaptured { photo, reason }) => {
            if order.dispatch_photo.is_none() {
                return Err(AppError::InvalidTransition(format!(
                    "order {} has no dispatch photo on file",
                    order.id
                )));
            }

            Ok(OrderUpdate::ReturnPending {
                return_photo: photo.clone(),
                return_reason: reason.clone(),
            })
        }
        (OrderStatus::ReturnPending, LifecycleEvent::ComparisonDecided { score, threshold }) => {
            if order.return_photo.is_none() {
                return Err(AppError::InvalidTransition(format!(
                    "order {} has no return photo on file",
                    order.id
                )));
            }

            Ok(OrderUpdate::ReturnDecided {
                accepted: score >= threshold,
            })
        }
        (status, event) => Err(AppError::InvalidTransition(format!(
            "order {} is {} and cannot accept {}",
            order.id,
            status.as_str(),
            event.kind().as_str()
        ))),
    }
}

/// Drives orders through the lifecycle: validates each incoming event against
/// the transition table, writes the update through the store (one write per
/// event), broadcasts the transition, and keeps the metrics current.
pub struct LifecycleController {
    store: Arc<OrderStore>,
    scorer: Arc<dyn SimilarityScorer>,
    events_tx: broadcast::Sender<TransitionEvent>,
    metrics: Metrics,
    similarity_threshold: f64,
    analyses_in_flight: DashSet<String>,
}

impl LifecycleController {
    pub fn new(
        store: Arc<OrderStore>,
        scorer: Arc<dyn SimilarityScorer>,
        events_tx: broadcast::Sender<TransitionEvent>,
        metrics: Metrics,
        similarity_threshold: f64,
    ) -> Self {
        Self {
            store,
            scorer,
            events_tx,
            metrics,
            similarity_threshold,
            analyses_in_flight: DashSet::new(),
        }
    }

    pub fn submit_dispatch_photo(&self, id: &str, photo: String) -> Result<Order, AppError> {
        self.handle(id, LifecycleEvent::DispatchPhotoCaptured { photo })
    }

    pub fn submit_return_photo(
        &self,
        id: &str,
        photo: String,
        reason: Option<String>,
    ) -> Result<Order, AppError> {
        self.handle(id, LifecycleEvent::ReturnPhotoCaptured { photo, reason })
    }

    pub fn resolve_return_comparison(&self, id: &str, score: f64) -> Result<Order, AppError> {
        self.handle(
            id,
            LifecycleEvent::ComparisonDecided {
                score,
                threshold: self.similarity_threshold,
            },
        )
    }

    /// Runs the injected scorer over the stored photo pair, then resolves the
    /// comparison with the produced score. At most one analysis per order is
    /// in flight; the slot is released even when the caller goes away before
    /// the score resolves, leaving the order in `return-pending`.
    pub async fn analyze_return(&self, id: &str) -> Result<Order, AppError> {
        let order = self
            .store
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

        if order.status != OrderStatus::ReturnPending {
            return Err(AppError::InvalidTransition(format!(
                "order {} is {} and has no comparison to run",
                order.id,
                order.status.as_str()
            )));
        }

        let (Some(dispatch_photo), Some(return_photo)) =
            (order.dispatch_photo, order.return_photo)
        else {
            return Err(AppError::InvalidTransition(format!(
                "order {} is missing photo evidence",
                order.id
            )));
        };

        let _slot = AnalysisSlot::claim(
            &self.analyses_in_flight,
            &self.metrics.analyses_in_flight,
            id,
        )?;

        let score = self.scorer.score(&dispatch_photo, &return_photo).await;
        self.resolve_return_comparison(id, score)
    }

    pub fn sync_status_metrics(&self) {
        let orders = self.store.list();
        for status in OrderStatus::ALL {
            let count = orders.iter().filter(|o| o.status == status).count();
            self.metrics
                .orders_by_status
                .with_label_values(&[status.as_str()])
                .set(count as i64);
        }
    }

    fn handle(&self, id: &str, event: LifecycleEvent) -> Result<Order, AppError> {
        let kind = event.kind();

        let (from, order) = match self.store.transition(id, |order| next_update(order, &event)) {
            Ok(applied) => applied,
            Err(err) => {
                self.metrics
                    .transitions_total
                    .with_label_values(&[kind.as_str(), "rejected"])
                    .inc();
                warn!(order_id = %id, event = kind.as_str(), error = %err, "lifecycle event rejected");
                return Err(err);
            }
        };

        self.metrics
            .transitions_total
            .with_label_values(&[kind.as_str(), "applied"])
            .inc();

        let similarity = match &event {
            LifecycleEvent::ComparisonDecided { score, .. } => {
                self.metrics.similarity_score.observe(*score);
                let outcome = if order.status == OrderStatus::Returned {
                    "accepted"
                } else {
                    "rejected"
                };
                self.metrics
                    .comparisons_total
                    .with_label_values(&[outcome])
                    .inc();
                Some(*score)
            }
            _ => None,
        };

        self.sync_status_metrics();

        let transition = TransitionEvent {
            id: Uuid::new_v4(),
            order_id: order.id.clone(),
            kind,
            from,
            to: order.status,
            similarity,
            occurred_at: Utc::now(),
        };
        let _ = self.events_tx.send(transition);

        info!(
            order_id = %order.id,
            event = kind.as_str(),
            from = from.as_str(),
            to = order.status.as_str(),
            "order transitioned"
        );

        Ok(order)
    }
}

// Claims the per-order analysis slot; Drop releases it so an abandoned
// request cannot wedge the order.
struct AnalysisSlot<'a> {
    slots: &'a DashSet<String>,
    gauge: IntGauge,
    id: String,
}

impl<'a> AnalysisSlot<'a> {
    fn claim(slots: &'a DashSet<String>, gauge: &IntGauge, id: &str) -> Result<Self, AppError> {
        if !slots.insert(id.to_string()) {
            return Err(AppError::ComparisonInFlight(format!(
                "order {id} already has an analysis in flight"
            )));
        }

        gauge.inc();
        Ok(Self {
            slots,
            gauge: gauge.clone(),
            id: id.to_string(),
        })
    }
}

impl Drop for AnalysisSlot<'_> {
    fn drop(&mut self) {
        self.slots.remove(&self.id);
        self.gauge.dec();
    }
}
