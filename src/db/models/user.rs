//! User Model

use serde::{Deserialize, Serialize};

/// Fixed administrator account, seeded at first load
pub const ADMIN_USERNAME: &str = "Ayman_Mamdouh";
pub const ADMIN_PASSWORD: &str = "ASMA#";
pub const ADMIN_ADDRESS: &str = "Admin Address";

/// Geographic coordinates captured once at registration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// User model
///
/// Location fields are denormalized into every order the user places,
/// so they are written once at registration and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub address: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(rename = "locationLink", default)]
    pub location_link: Option<String>,
    #[serde(rename = "mapImage", default)]
    pub map_image: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// The fixed administrator record inserted when missing
    pub fn admin_seed() -> Self {
        Self {
            username: ADMIN_USERNAME.to_string(),
            password: ADMIN_PASSWORD.to_string(),
            address: ADMIN_ADDRESS.to_string(),
            location: None,
            location_link: None,
            map_image: None,
            role: Role::Admin,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub address: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(rename = "locationLink", default)]
    pub location_link: Option<String>,
}

/// Public view returned by login (no password, no map link)
#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub username: String,
    pub role: Role,
    pub address: String,
    pub location: Option<GeoPoint>,
}

impl From<&User> for UserPublic {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
            address: user.address.clone(),
            location: user.location,
        }
    }
}

/// Static-map URL for a registration location.
///
/// Pure function of the coordinates; computed once at registration and
/// stored on the user record.
pub fn static_map_url(location: &GeoPoint) -> String {
    format!(
        "https://maps.googleapis.com/maps/api/staticmap?center={lat},{lng}&zoom=15&size=400x200&maptype=roadmap&markers=color:red%7Clabel:C%7C{lat},{lng}",
        lat = location.latitude,
        lng = location.longitude
    )
}
