//! Geographic location value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A geographic location with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoLocation {
    type Err = InvalidCoordinates;

    /// Parse a manually typed coordinate pair of the form `"55.7558, 37.6176"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat_str, lon_str) = s.trim().split_once(',').ok_or(InvalidCoordinates)?;
        let latitude: f64 = lat_str.trim().parse().map_err(|_| InvalidCoordinates)?;
        let longitude: f64 = lon_str.trim().parse().map_err(|_| InvalidCoordinates)?;
        Self::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates_are_accepted() {
        let loc = GeoLocation::new(52.52, 13.405).expect("valid coordinates");
        assert!((loc.latitude() - 52.52).abs() < f64::EPSILON);
        assert!((loc.longitude() - 13.405).abs() < f64::EPSILON);
    }

    #[test]
    fn boundary_coordinates_are_accepted() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(-91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, 181.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
    }

    #[test]
    fn parses_manual_coordinate_text() {
        let loc: GeoLocation = "55.7558, 37.6176".parse().expect("valid text");
        assert!((loc.latitude() - 55.7558).abs() < f64::EPSILON);
        assert!((loc.longitude() - 37.6176).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_negative_and_integer_components() {
        let loc: GeoLocation = "40.7128, -74.0060".parse().expect("valid text");
        assert!((loc.longitude() + 74.006).abs() < 1e-9);

        let loc: GeoLocation = "52,13".parse().expect("integer degrees are fine");
        assert!((loc.latitude() - 52.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_malformed_coordinate_text() {
        assert!("55.7558".parse::<GeoLocation>().is_err());
        assert!("north, south".parse::<GeoLocation>().is_err());
        assert!("95.0, 13.4".parse::<GeoLocation>().is_err());
        assert!("".parse::<GeoLocation>().is_err());
    }
}
