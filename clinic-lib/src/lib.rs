//! Clinic dashboard domain library
//!
//! Records shown by the dashboard pages, deterministic mock data, host-side
//! search, the appointment store and export helpers. The table and calendar
//! engines live in `trellis`; this crate supplies what they operate on.

pub mod error;
pub mod export;
pub mod filter;
pub mod mock;
pub mod model;
pub mod store;

pub use store::Applied;
pub use store::EventStore;
