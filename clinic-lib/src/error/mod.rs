//! Error types

mod export;
mod store;
mod validation;

pub use export::*;
pub use store::*;
pub use validation::*;
