//! Domain types shared by the database, generation client, and API layers.
//!
//! This crate has no internal dependencies and performs no I/O.

pub mod audit;
pub mod error;
pub mod patch;
pub mod prompt;
pub mod roles;
pub mod script;
pub mod status;
pub mod types;
