use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Dispatched,
    Delivered,
    Returned,
    ReturnPending,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
        OrderStatus::Returned,
        OrderStatus::ReturnPending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Returned => "returned",
            OrderStatus::ReturnPending => "return-pending",
        }
    }
}

/// A tracked customer purchase moving through dispatch/return fulfillment.
///
/// Photo fields hold opaque references (URI or data URL); the service never
/// inspects their contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_mobile: String,
    pub products: Vec<String>,
    pub status: OrderStatus,
    pub dispatch_photo: Option<String>,
    pub return_photo: Option<String>,
    pub return_reason: Option<String>,
    pub return_accepted: Option<bool>,
    pub order_date: NaiveDate,
    pub total_amount: f64,
}

/// The exact set of fields a single lifecycle transition writes. Each variant
/// lists everything it touches; nothing else on the order is modified.
#[derive(Debug, Clone)]
pub enum OrderUpdate {
    Dispatched {
        dispatch_photo: String,
    },
    ReturnPending {
        return_photo: String,
        return_reason: Option<String>,
    },
    ReturnDecided {
        accepted: bool,
    },
}

impl OrderUpdate {
    pub fn next_status(&self) -> OrderStatus {
        match self {
            OrderUpdate::Dispatched { .. } => OrderStatus::Dispatched,
            OrderUpdate::ReturnPending { .. } => OrderStatus::ReturnPending,
            OrderUpdate::ReturnDecided { accepted: true } => OrderStatus::Returned,
            OrderUpdate::ReturnDecided { accepted: false } => OrderStatus::Delivered,
        }
    }

    pub fn apply(self, order: &mut Order) {
        order.status = self.next_status();
        match self {
            OrderUpdate::Dispatched { dispatch_photo } => {
                order.dispatch_photo = Some(dispatch_photo);
            }
            OrderUpdate::ReturnPending {
                return_photo,
                return_reason,
            } => {
                order.return_photo = Some(return_photo);
                order.return_reason = return_reason;
            }
            OrderUpdate::ReturnDecided { accepted } => {
                order.return_accepted = Some(accepted);
            }
        }
    }
}
