//! Order Repository
//!
//! Owns the order workflow: placement (stock validation + decrement +
//! insert as one unit of work under the store lock) and the delivery
//! negotiation state machine.
//!
//! # State machine
//!
//! ```text
//! pending ──(admin quotes: status=processing, deliveryPrice)──▶ processing
//!    ▲                                                             │
//!    │                                 AwaitingQuote ⇒ AwaitingConfirmation
//!    │                                                             │
//!    └──(customer rejects: Rejected)◀── customer decides ──(accepts: Confirmed)
//! ```
//!
//! Rejection forces `status` back to `pending` so the admin can re-quote;
//! the rejected `deliveryPrice` stays visible until overwritten.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use super::{RepoError, RepoResult};
use crate::db::models::{
    DeliveryConfirmation, DeliveryUpdate, NotificationEvent, NotificationKind, Order, OrderCreate,
    OrderStatus,
};
use crate::db::{Collections, DataStore, MEDICINES, ORDERS};

#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<DataStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn find_all(&self) -> Vec<Order> {
        self.store.lock().orders.clone()
    }

    /// Place an order.
    ///
    /// Every line is validated before any stock is touched, so a failing
    /// line never leaves earlier decrements behind (stricter than the
    /// source, which interleaved validation and decrement). Both collection
    /// flushes happen under one lock guard; if the orders flush fails the
    /// decrements are reverted and the medicines snapshot restored.
    pub fn place(&self, data: OrderCreate) -> RepoResult<Order> {
        let now = Utc::now();
        let mut guard = self.store.lock();
        let collections = &mut *guard;

        // Validate all lines first. Repeated lines for one medicine are
        // checked against their cumulative total, and a missing medicine
        // counts as insufficient.
        let mut requested: HashMap<u64, u32> = HashMap::new();
        for line in &data.medicines {
            let total = requested.entry(line.id).or_insert(0);
            *total = total.saturating_add(line.quantity);
            match collections.medicines.iter().find(|m| m.id == line.id) {
                Some(m) if m.quantity >= *total => {}
                _ => return Err(RepoError::InsufficientStock(line.id)),
            }
        }

        for line in &data.medicines {
            if let Some(m) = collections.medicines.iter_mut().find(|m| m.id == line.id) {
                m.quantity -= line.quantity;
            }
        }
        if let Err(e) = self.store.gateway().save(MEDICINES, &collections.medicines) {
            // Flush failed: give the stock back so memory matches disk
            for line in &data.medicines {
                if let Some(m) = collections.medicines.iter_mut().find(|m| m.id == line.id) {
                    m.quantity += line.quantity;
                }
            }
            return Err(e.into());
        }

        // The order inherits the user's *registration* location; the
        // request's locationLink overrides the stored one when present.
        let user_record = collections.users.iter().find(|u| u.username == data.user);
        let id = collections.orders.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let item_count = data.medicines.len();

        let order = Order {
            id,
            address: data.address,
            phone_number: data.phone_number,
            location: user_record.and_then(|u| u.location),
            location_link: data
                .location_link
                .or_else(|| user_record.and_then(|u| u.location_link.clone())),
            map_image: user_record.and_then(|u| u.map_image.clone()),
            timestamp: now,
            status: OrderStatus::Pending,
            delivery_time: None,
            delivery_price: None,
            delivery_confirmed: DeliveryConfirmation::AwaitingQuote,
            notifications: vec![NotificationEvent {
                kind: NotificationKind::NewOrder,
                message: format!("طلب جديد من {} - {} أدوية", data.user, item_count),
                timestamp: now,
                read: false,
            }],
            medicines: data.medicines,
            user: data.user,
        };

        collections.orders.push(order.clone());
        if let Err(e) = self.store.gateway().save(ORDERS, &collections.orders) {
            self.revert_placement(collections, &order);
            return Err(e.into());
        }

        // Operator alert; there is no durable queue behind this
        tracing::info!(
            target: "orders",
            order_id = order.id,
            user = %order.user,
            "تنبيه: تم استلام طلب جديد من {} - {} أدوية",
            order.user,
            item_count
        );

        Ok(order)
    }

    /// Undo an order insert whose flush failed: drop it from memory, give
    /// the stock back and restore the medicines snapshot.
    fn revert_placement(&self, collections: &mut Collections, order: &Order) {
        collections.orders.retain(|o| o.id != order.id);
        for line in &order.medicines {
            if let Some(m) = collections.medicines.iter_mut().find(|m| m.id == line.id) {
                m.quantity += line.quantity;
            }
        }
        if let Err(e) = self.store.gateway().save(MEDICINES, &collections.medicines) {
            tracing::error!(order_id = order.id, error = %e, "Failed to restore medicines snapshot after aborted placement");
        }
    }

    /// Admin-side delivery update: time, status and price are independently
    /// optional. Quoting a price while the order is processing moves the
    /// confirmation from `AwaitingQuote` to `AwaitingConfirmation` exactly
    /// once; later updates never reset an already-made decision.
    pub fn update_delivery(&self, id: u64, patch: DeliveryUpdate) -> RepoResult<Order> {
        let mut collections = self.store.lock();
        let order = collections
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))?;

        if let Some(delivery_time) = patch.delivery_time {
            order.delivery_time = Some(delivery_time);
        }
        if let Some(status) = patch.status {
            order.status = status;
        }
        if let Some(price) = patch.delivery_price {
            order.delivery_price = Some(price);
            if order.status == OrderStatus::Processing
                && order.delivery_confirmed.is_awaiting_quote()
            {
                order.delivery_confirmed = DeliveryConfirmation::AwaitingConfirmation;
            }
        }

        let updated = order.clone();
        self.store.gateway().save(ORDERS, &collections.orders)?;
        Ok(updated)
    }

    /// Customer decision on the quoted delivery price.
    ///
    /// Rejection reopens the order: `status` is forced back to `pending`
    /// regardless of what it was. The quoted price is left in place either
    /// way.
    pub fn confirm_delivery(&self, id: u64, confirmed: bool) -> RepoResult<Order> {
        let mut collections = self.store.lock();
        let order = collections
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))?;

        if confirmed {
            order.delivery_confirmed = DeliveryConfirmation::Confirmed;
            tracing::info!(target: "orders", order_id = id, "العميل وافق على سعر التوصيل - الطلب #{id}");
        } else {
            order.delivery_confirmed = DeliveryConfirmation::Rejected;
            order.status = OrderStatus::Pending;
            tracing::info!(target: "orders", order_id = id, "العميل لم يوافق علي السعر التوصيل لانه غالي - الطلب #{id}");
        }

        let updated = order.clone();
        self.store.gateway().save(ORDERS, &collections.orders)?;
        Ok(updated)
    }

    pub fn clear_all(&self) -> RepoResult<()> {
        let mut collections = self.store.lock();
        collections.orders.clear();
        self.store.gateway().save(ORDERS, &collections.orders)?;
        Ok(())
    }
}
