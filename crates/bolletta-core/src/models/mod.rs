//! Data models for tariffs, consumption and computed costs.

pub mod config;
pub mod consumption;
pub mod costs;
pub mod lenient;
pub mod tariff;
