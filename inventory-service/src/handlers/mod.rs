//! HTTP handlers for the inventory service

pub mod batches;
pub mod health;
pub mod inventory;
pub mod products;

pub use batches::*;
pub use health::*;
pub use inventory::*;
pub use products::*;
