//! Trellis - view engines for the clinic dashboard.
//!
//! Two independent engines live here:
//!
//! - [`table`]: sorting, pagination and row selection over host-owned rows.
//! - [`calendar`]: day/week/month grids with overlap layout and
//!   drag-to-reschedule.
//!
//! Both are controlled components. The host owns the data and passes it in
//! on every call; the engines return new view state plus the intents the
//! host should act on. Nothing here mutates caller-owned containers.

pub mod calendar;
pub mod selection;
pub mod table;
pub mod value;

pub use selection::{Selection, SelectionMode};
pub use value::Value;
