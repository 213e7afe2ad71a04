//! Domain types for calendar events and dashboard selections.

pub mod category;
pub mod event;
pub mod filter;
pub mod window;


pub use category::Category;
pub use event::{Event, EventId, DATE_FORMAT, TIME_FORMAT};
pub use filter::{FilterName, FilterSet};
pub use window::{TimeWindow, WeekStart, WindowMode};
