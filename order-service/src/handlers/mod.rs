//! HTTP handlers for the order service

pub mod health;
pub mod orders;

pub use health::*;
pub use orders::*;
