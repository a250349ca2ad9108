//! Business logic services for the order service

pub mod order;

pub use order::OrderService;
