//! Medicine Model

use serde::{Deserialize, Serialize};

/// Fallback image path used when no image is supplied or decoding fails
pub const PLACEHOLDER_IMAGE: &str = "/Images/placeholder.jpg";

/// Medicine catalog record
///
/// `id` is assigned as max-seen + 1 at creation and never reused after
/// deletion. `quantity` is only ever decremented by order placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(rename = "image", default = "default_image")]
    pub image: String,
    #[serde(rename = "addedBy", default = "default_added_by")]
    pub added_by: String,
}

fn default_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

fn default_added_by() -> String {
    "admin".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MedicineCreate {
    pub name: String,
    pub price: f64,
    pub quantity: Option<u32>,
    /// Either a stored path or an inline `data:image/...;base64,` payload
    pub image: Option<String>,
}

/// Partial update; only these fields may change. Absent fields keep
/// their prior values.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicineUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    pub image: Option<String>,
}
