//! Database Models

pub mod medicine;
pub mod order;
pub mod user;

// Re-exports
pub use medicine::{Medicine, MedicineCreate, MedicineUpdate, PLACEHOLDER_IMAGE};
pub use order::{
    DeliveryConfirmation, DeliveryUpdate, NotificationEvent, NotificationKind, Order, OrderCreate,
    OrderLine, OrderStatus,
};
pub use user::{GeoPoint, Role, User, UserCreate, UserPublic, static_map_url};
