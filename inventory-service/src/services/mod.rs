//! Business logic services for the inventory service

pub mod allocation;
pub mod batch;
pub mod inventory;
pub mod product;

pub use batch::BatchService;
pub use inventory::InventoryService;
pub use product::ProductService;
