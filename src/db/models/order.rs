//! Order Model
//!
//! The delivery negotiation is an explicit state machine instead of the
//! loosely-typed `true | false | null | undefined` flag the wire format
//! carries. [`DeliveryConfirmation`] keeps the wire encoding intact:
//!
//! | State | Wire value |
//! |-------|-----------|
//! | `AwaitingQuote` | field absent |
//! | `AwaitingConfirmation` | `null` |
//! | `Confirmed` | `true` |
//! | `Rejected` | `false` |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::user::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
}

/// Delivery-price negotiation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryConfirmation {
    /// Admin has not quoted a delivery price yet
    #[default]
    AwaitingQuote,
    /// Price quoted, customer has not decided
    AwaitingConfirmation,
    /// Customer accepted the quoted price
    Confirmed,
    /// Customer rejected the price; the order is reopened
    Rejected,
}

impl DeliveryConfirmation {
    pub fn is_awaiting_quote(&self) -> bool {
        matches!(self, Self::AwaitingQuote)
    }

    pub fn from_wire(value: Option<bool>) -> Self {
        match value {
            None => Self::AwaitingConfirmation,
            Some(true) => Self::Confirmed,
            Some(false) => Self::Rejected,
        }
    }
}

fn serialize_confirmation<S: Serializer>(
    confirmation: &DeliveryConfirmation,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match confirmation {
        // AwaitingQuote is skipped by the field attribute; if it ever gets
        // here (e.g. a manual to_value of the bare enum) null is the closest
        DeliveryConfirmation::AwaitingQuote | DeliveryConfirmation::AwaitingConfirmation => {
            serializer.serialize_none()
        }
        DeliveryConfirmation::Confirmed => serializer.serialize_some(&true),
        DeliveryConfirmation::Rejected => serializer.serialize_some(&false),
    }
}

fn deserialize_confirmation<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DeliveryConfirmation, D::Error> {
    Option::<bool>::deserialize(deserializer).map(DeliveryConfirmation::from_wire)
}

/// One requested line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewOrder,
}

/// Event record embedded in an order; append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Order record
///
/// Location fields are a snapshot of the placing user's registration data,
/// so catalog or user changes never corrupt order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub medicines: Vec<OrderLine>,
    pub address: String,
    pub user: String,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(rename = "locationLink", default)]
    pub location_link: Option<String>,
    #[serde(rename = "mapImage", default)]
    pub map_image: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(rename = "deliveryTime", default)]
    pub delivery_time: Option<String>,
    #[serde(
        rename = "deliveryPrice",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_price: Option<f64>,
    #[serde(
        rename = "deliveryConfirmed",
        default,
        skip_serializing_if = "DeliveryConfirmation::is_awaiting_quote",
        serialize_with = "serialize_confirmation",
        deserialize_with = "deserialize_confirmation"
    )]
    pub delivery_confirmed: DeliveryConfirmation,
    #[serde(default)]
    pub notifications: Vec<NotificationEvent>,
}

/// Placement request body
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub medicines: Vec<OrderLine>,
    pub address: String,
    pub user: String,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: String,
    /// Overrides the user's stored link when present
    #[serde(rename = "locationLink", default)]
    pub location_link: Option<String>,
}

/// Admin-side delivery update; fields are independently optional and
/// absent fields are left untouched
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryUpdate {
    #[serde(rename = "deliveryTime", default)]
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(rename = "deliveryPrice", default)]
    pub delivery_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            id: 1,
            medicines: vec![OrderLine { id: 1, quantity: 3 }],
            address: "Cairo".to_string(),
            user: "mona".to_string(),
            phone_number: "0100".to_string(),
            location: None,
            location_link: None,
            map_image: None,
            timestamp: Utc::now(),
            status: OrderStatus::Pending,
            delivery_time: None,
            delivery_price: None,
            delivery_confirmed: DeliveryConfirmation::AwaitingQuote,
            notifications: Vec::new(),
        }
    }

    #[test]
    fn awaiting_quote_is_absent_on_the_wire() {
        let json = serde_json::to_value(sample_order()).unwrap();
        assert!(json.get("deliveryConfirmed").is_none());
        assert!(json.get("deliveryPrice").is_none());
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn awaiting_confirmation_is_null_on_the_wire() {
        let mut order = sample_order();
        order.delivery_confirmed = DeliveryConfirmation::AwaitingConfirmation;
        let json = serde_json::to_value(order).unwrap();
        assert_eq!(json["deliveryConfirmed"], serde_json::Value::Null);
    }

    #[test]
    fn decisions_are_booleans_on_the_wire() {
        let mut order = sample_order();
        order.delivery_confirmed = DeliveryConfirmation::Confirmed;
        assert_eq!(
            serde_json::to_value(&order).unwrap()["deliveryConfirmed"],
            true
        );
        order.delivery_confirmed = DeliveryConfirmation::Rejected;
        assert_eq!(
            serde_json::to_value(&order).unwrap()["deliveryConfirmed"],
            false
        );
    }

    #[test]
    fn wire_values_round_trip_back_into_states() {
        let base = serde_json::to_value(sample_order()).unwrap();

        let absent: Order = serde_json::from_value(base.clone()).unwrap();
        assert_eq!(
            absent.delivery_confirmed,
            DeliveryConfirmation::AwaitingQuote
        );

        let mut with_null = base.clone();
        with_null["deliveryConfirmed"] = serde_json::Value::Null;
        let pending: Order = serde_json::from_value(with_null).unwrap();
        assert_eq!(
            pending.delivery_confirmed,
            DeliveryConfirmation::AwaitingConfirmation
        );

        let mut rejected_json = base;
        rejected_json["deliveryConfirmed"] = serde_json::Value::Bool(false);
        let rejected: Order = serde_json::from_value(rejected_json).unwrap();
        assert_eq!(rejected.delivery_confirmed, DeliveryConfirmation::Rejected);
    }

    #[test]
    fn notification_kind_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::NewOrder).unwrap(),
            "\"new_order\""
        );
    }
}
