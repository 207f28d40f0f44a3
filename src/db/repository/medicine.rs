//! Medicine Repository

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;

use super::{RepoError, RepoResult};
use crate::db::models::{Medicine, MedicineCreate, MedicineUpdate, PLACEHOLDER_IMAGE};
use crate::db::{DataStore, MEDICINES};

#[derive(Clone)]
pub struct MedicineRepository {
    store: Arc<DataStore>,
}

impl MedicineRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn find_all(&self) -> Vec<Medicine> {
        self.store.lock().medicines.clone()
    }

    /// Create a medicine.
    ///
    /// id = max-seen + 1 so ids are never reused after deletion. A zero or
    /// absent quantity defaults to 1. Inline base64 payloads are decoded to
    /// the blob directory; a plain path is stored as-is.
    pub fn create(&self, data: MedicineCreate) -> RepoResult<Medicine> {
        let image = self.resolve_image(data.image);

        let mut collections = self.store.lock();
        let id = collections
            .medicines
            .iter()
            .map(|m| m.id)
            .max()
            .unwrap_or(0)
            + 1;
        let quantity = match data.quantity {
            Some(q) if q > 0 => q,
            _ => 1,
        };

        let medicine = Medicine {
            id,
            name: data.name,
            price: data.price,
            quantity,
            image,
            added_by: "admin".to_string(),
        };

        collections.medicines.push(medicine.clone());
        self.store
            .gateway()
            .save(MEDICINES, &collections.medicines)?;
        Ok(medicine)
    }

    /// Shallow merge of the permitted fields over the existing record.
    pub fn update(&self, id: u64, patch: MedicineUpdate) -> RepoResult<Medicine> {
        let mut collections = self.store.lock();
        let medicine = collections
            .medicines
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("medicine {id}")))?;

        if let Some(name) = patch.name {
            medicine.name = name;
        }
        if let Some(price) = patch.price {
            medicine.price = price;
        }
        if let Some(quantity) = patch.quantity {
            medicine.quantity = quantity;
        }
        if let Some(image) = patch.image {
            medicine.image = image;
        }

        let updated = medicine.clone();
        self.store
            .gateway()
            .save(MEDICINES, &collections.medicines)?;
        Ok(updated)
    }

    /// Remove by id. Orders keep their own line snapshots, so there is no
    /// cascade.
    pub fn delete(&self, id: u64) -> RepoResult<()> {
        let mut collections = self.store.lock();
        let before = collections.medicines.len();
        collections.medicines.retain(|m| m.id != id);
        if collections.medicines.len() == before {
            return Err(RepoError::NotFound(format!("medicine {id}")));
        }
        self.store
            .gateway()
            .save(MEDICINES, &collections.medicines)?;
        Ok(())
    }

    /// Turn the request's image field into a stored path.
    ///
    /// Any decode or write failure substitutes the placeholder rather than
    /// failing the whole create.
    fn resolve_image(&self, image: Option<String>) -> String {
        match image {
            Some(payload) if payload.starts_with("data:image/") => {
                self.ingest_data_url(&payload).unwrap_or_else(|| {
                    tracing::error!("Failed to store uploaded image, using placeholder");
                    PLACEHOLDER_IMAGE.to_string()
                })
            }
            Some(path) if !path.is_empty() => path,
            _ => PLACEHOLDER_IMAGE.to_string(),
        }
    }

    /// Decode a `data:image/<subtype>;base64,<payload>` URL into the blob
    /// directory under a timestamped filename.
    fn ingest_data_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix("data:image/")?;
        let (subtype, payload) = rest.split_once(";base64,")?;
        if subtype.is_empty() {
            return None;
        }

        let bytes = match BASE64.decode(payload) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid base64 image payload");
                return None;
            }
        };

        let filename = format!("medicine_{}.{}", Utc::now().timestamp_millis(), subtype);
        match self.store.gateway().store_blob(&filename, &bytes) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to write image blob");
                None
            }
        }
    }
}
