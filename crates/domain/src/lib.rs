//! Domain layer for Wetterfrosch
//!
//! Contains the normalized weather report entity and the value objects
//! shared by every other layer. This layer has no I/O dependencies.

pub mod entities;
pub mod value_objects;

pub use entities::WeatherReport;
pub use value_objects::{GeoLocation, InvalidCoordinates, UnitSystem, UserId};
