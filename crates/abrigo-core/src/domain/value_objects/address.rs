//! Address value object with a GeoJSON location.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Geographic point stored in GeoJSON format so the database can build
/// a 2dsphere index over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeoPoint {
    /// GeoJSON geometry type, always `"Point"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Longitude then latitude, per GeoJSON.
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    /// Creates a point from longitude and latitude.
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }

    /// Returns the longitude.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    /// Returns the latitude.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// A user's home address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Address {
    /// City name.
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,

    /// State or province.
    #[validate(length(min = 1, message = "state must not be empty"))]
    pub state: String,

    /// Optional geographic location of the address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl Address {
    /// Creates a new address without a location.
    #[must_use]
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
            location: None,
        }
    }

    /// Attaches a geographic location.
    #[must_use]
    pub fn with_location(mut self, longitude: f64, latitude: f64) -> Self {
        self.location = Some(GeoPoint::new(longitude, latitude));
        self
    }
}
