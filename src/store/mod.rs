pub mod seed;

use dashmap::DashMap;

use crate::error::AppError;
use crate::models::order::{Order, OrderStatus, OrderUpdate};

/// Authoritative in-memory order collection for the session.
///
/// Orders are seeded at construction and never deleted, so insertion order is
/// a fixed list of ids resolved against the map on every read. Readers always
/// get a clone taken under the entry lock; an update in progress is never
/// observable half-applied.
pub struct OrderStore {
    orders: DashMap<String, Order>,
    ordering: Vec<String>,
}

impl OrderStore {
    pub fn new(initial: Vec<Order>) -> Self {
        let ordering = initial.iter().map(|order| order.id.clone()).collect();
        let orders = DashMap::new();
        for order in initial {
            orders.insert(order.id.clone(), order);
        }

        Self { orders, ordering }
    }

    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders.get(id).map(|entry| entry.value().clone())
    }

    pub fn list(&self) -> Vec<Order> {
        self.ordering.iter().filter_map(|id| self.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Runs `decide` against the current order under its entry lock and, on
    /// `Ok`, applies the produced update. Lifecycle events on the same order
    /// therefore serialize: either the whole update lands or nothing does.
    /// Returns the previous status together with the updated order.
    pub fn transition<F>(&self, id: &str, decide: F) -> Result<(OrderStatus, Order), AppError>
    where
        F: FnOnce(&Order) -> Result<OrderUpdate, AppError>,
    {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

        let update = decide(entry.value())?;
        let from = entry.value().status;
        update.apply(entry.value_mut());

        Ok((from, entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::OrderStore;
    use super::seed::demo_orders;
    use crate::error::AppError;
    use crate::models::order::{OrderStatus, OrderUpdate};

    #[test]
    fn list_preserves_insertion_order() {
        let store = OrderStore::new(demo_orders());
        let ids: Vec<String> = store.list().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["001", "002", "003", "004"]);
    }

    #[test]
    fn transition_on_unknown_id_is_not_found() {
        let store = OrderStore::new(demo_orders());
        let before = store.list();

        let result = store.transition("999", |_| {
            Ok(OrderUpdate::Dispatched {
                dispatch_photo: "imgA".to_string(),
            })
        });

        assert!(matches!(result, Err(AppError::NotFound(_))));
        let after = store.list();
        assert_eq!(after.len(), before.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.status, b.status);
        }
    }

    #[test]
    fn failed_decide_leaves_order_untouched() {
        let store = OrderStore::new(demo_orders());
        let before = store.get("001").unwrap();

        let result = store.transition("001", |_| {
            Err(AppError::InvalidTransition("nope".to_string()))
        });

        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
        let after = store.get("001").unwrap();
        assert_eq!(after.status, before.status);
        assert_eq!(after.dispatch_photo, before.dispatch_photo);
        assert_eq!(after.return_photo, before.return_photo);
        assert_eq!(after.return_accepted, before.return_accepted);
    }

    #[test]
    fn transition_reports_previous_status() {
        let store = OrderStore::new(demo_orders());

        let (from, updated) = store
            .transition("001", |_| {
                Ok(OrderUpdate::Dispatched {
                    dispatch_photo: "imgA".to_string(),
                })
            })
            .unwrap();

        assert_eq!(from, OrderStatus::Pending);
        assert_eq!(updated.status, OrderStatus::Dispatched);
        assert_eq!(updated.dispatch_photo.as_deref(), Some("imgA"));
    }
}
