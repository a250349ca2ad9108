//! Shared wire types for the BatchTrack inventory platform
//!
//! This crate contains the types that cross the service boundary between the
//! inventory service and the order service: the stock mutation request, the
//! batch view returned by the inventory listing endpoint, and the common
//! error envelope.

pub mod dto;
pub mod validation;

pub use dto::*;
pub use validation::*;
