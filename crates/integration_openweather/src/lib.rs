//! OpenWeather integration
//!
//! Client for the OpenWeather current-weather API
//! (<https://openweathermap.org/current>). Issues a single GET per
//! query and normalizes the payload into the domain report.

pub mod client;
mod models;

pub use client::{OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};
