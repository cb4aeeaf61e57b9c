use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::order::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    DispatchPhotoCaptured,
    ReturnPhotoCaptured,
    ComparisonDecided,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::DispatchPhotoCaptured => "dispatch-photo-captured",
            TransitionKind::ReturnPhotoCaptured => "return-photo-captured",
            TransitionKind::ComparisonDecided => "comparison-decided",
        }
    }
}

/// Broadcast to dashboard clients after every successful status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub id: Uuid,
    pub order_id: String,
    pub kind: TransitionKind,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub similarity: Option<f64>,
    pub occurred_at: DateTime<Utc>,
}
