//! Data layer
//!
//! [`DataStore`] owns the three in-memory collections behind one mutex
//! (a single serialization point, which the original single-threaded
//! process got for free) plus the [`JsonGateway`] that flushes them.
//! Repositories in [`repository`] are the only way handlers touch the
//! collections; every mutating operation persists before returning.

pub mod gateway;
pub mod models;
pub mod repository;

pub use gateway::{GatewayError, JsonGateway};

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::Config;
use models::{Medicine, Order, User, user::ADMIN_USERNAME};

/// Collection file names
pub const USERS: &str = "users";
pub const MEDICINES: &str = "medicines";
pub const ORDERS: &str = "orders";

/// The three entity collections, held wholly in memory
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub users: Vec<User>,
    pub medicines: Vec<Medicine>,
    pub orders: Vec<Order>,
}

/// In-memory store backed by JSON snapshots
#[derive(Debug)]
pub struct DataStore {
    gateway: JsonGateway,
    inner: Mutex<Collections>,
}

impl DataStore {
    /// Load all collections and ensure the administrator account exists.
    ///
    /// The admin seed is idempotent: it inserts (and persists) only when
    /// the fixed username is missing, so restarts never create a second
    /// admin record.
    pub fn open(config: &Config) -> Result<Arc<Self>, GatewayError> {
        let gateway = JsonGateway::new(config.data_dir(), config.images_dir())?;

        let mut users: Vec<User> = gateway.load(USERS);
        let medicines: Vec<Medicine> = gateway.load(MEDICINES);
        let orders: Vec<Order> = gateway.load(ORDERS);

        if !users.iter().any(|u| u.username == ADMIN_USERNAME) {
            users.push(User::admin_seed());
            gateway.save(USERS, &users)?;
            tracing::info!(username = ADMIN_USERNAME, "Seeded administrator account");
        }

        tracing::info!(
            users = users.len(),
            medicines = medicines.len(),
            orders = orders.len(),
            "Data store loaded"
        );

        Ok(Arc::new(Self {
            gateway,
            inner: Mutex::new(Collections {
                users,
                medicines,
                orders,
            }),
        }))
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Collections> {
        // Every mutation flushes before the guard is released, so the
        // collections inside a poisoned guard are still consistent
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn gateway(&self) -> &JsonGateway {
        &self.gateway
    }
}
