//! Records shown by the dashboard pages

mod appointment;
mod invoice;
mod patient;
pub mod types;

pub use appointment::*;
pub use invoice::*;
pub use patient::*;
