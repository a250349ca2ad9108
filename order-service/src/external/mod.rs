//! External service integrations

pub mod inventory;

pub use inventory::InventoryClient;
