//! # Domain Layer
//!
//! Pure registry logic with no locking and no I/O.
//! This is the inner layer of the hexagonal architecture.

pub mod activation;
pub mod driver;
pub mod errors;
pub mod type_id;
