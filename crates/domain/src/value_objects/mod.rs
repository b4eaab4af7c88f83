//! Value objects

mod geo_location;
mod unit_system;
mod user_id;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use unit_system::UnitSystem;
pub use user_id::UserId;
