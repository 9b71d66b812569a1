//! Event system for batch runs.
//! Synchronous dispatch to registered handlers; no handlers means no cost.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::SweepEventHandler;
