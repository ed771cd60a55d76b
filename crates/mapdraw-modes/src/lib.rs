//! Mapdraw interaction modes
//!
//! A mode turns input events into edits of the feature store. The host owns
//! the collaborators and lends them to the active mode through a
//! [`ModeContext`]; modes are a closed set dispatched through [`Mode`].

pub mod context;
pub mod draw_polygon;
pub mod events;
pub mod mode;
pub mod simple_select;

#[cfg(test)]
mod test_support;

pub use context::*;
pub use draw_polygon::{DrawOutcome, DrawPolygonMode, DrawState, render_polygon};
pub use events::*;
pub use mode::{DrawMode, Mode};
pub use simple_select::SimpleSelectMode;
