pub mod batch;
pub mod calculate;
pub mod config;
pub mod extract;
pub mod input;
