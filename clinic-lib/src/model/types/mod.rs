//! Value types shared by the records

mod money;

pub use money::*;
