//! Flat-file persistence gateway
//!
//! Each collection is one JSON document holding the full snapshot,
//! rewritten wholesale after every mutation:
//!
//! | File | Collection |
//! |------|------------|
//! | `<data_dir>/users.json` | Users |
//! | `<data_dir>/medicines.json` | Medicines |
//! | `<data_dir>/orders.json` | Orders |
//!
//! Uploaded medicine images live next to the data directory under
//! `Images/`, addressed by generated filenames.
//!
//! # Corruption policy
//!
//! A missing file loads as an empty collection. An unreadable or
//! unparseable file is logged and also loads as empty; data loss on
//! corruption is accepted behavior, never a startup failure.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// JSON snapshot store for the three entity collections plus the image
/// blob directory.
#[derive(Debug, Clone)]
pub struct JsonGateway {
    data_dir: PathBuf,
    images_dir: PathBuf,
}

impl JsonGateway {
    pub fn new(data_dir: PathBuf, images_dir: PathBuf) -> Result<Self, GatewayError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            images_dir,
        })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    /// Load a collection snapshot.
    ///
    /// Missing file ⇒ empty. Corrupt file ⇒ logged and empty.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Vec::new();
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(collection, error = %e, "Failed to read collection file, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(collection, error = %e, "Corrupt collection file, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite a collection snapshot.
    ///
    /// Written to a temp file first and renamed into place, so readers
    /// never observe a partial document.
    pub fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<(), GatewayError> {
        let path = self.collection_path(collection);
        let tmp = self.data_dir.join(format!("{collection}.json.tmp"));
        fs::write(&tmp, serde_json::to_vec_pretty(records)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Write an uploaded image and return the path it is served under.
    pub fn store_blob(&self, filename: &str, bytes: &[u8]) -> Result<String, GatewayError> {
        fs::create_dir_all(&self.images_dir)?;
        fs::write(self.images_dir.join(filename), bytes)?;
        Ok(format!("/Images/{filename}"))
    }
}
