//! Core crate for the asset sweep engine.
//!
//! Holds the ambient pieces shared by every traversal run: layered TOML
//! configuration, one error enum per subsystem, the event handler and
//! dispatcher, tracing setup, default constants and collection aliases.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
