//! High-level operations behind each command.
//!
//! Each operation takes the shared `AppContext` and reads from / writes to
//! the streams it is given, so the CLI, the widget loop and the tests all
//! drive the same code.

pub mod calendar;
pub mod export;
pub mod log;
pub mod widget;

// Re-export commonly used functions
pub use calendar::{review_calendar, show_month};
pub use export::export_mood_data;
pub use log::{log_mood, record_mood};
pub use widget::{run_widget, widget_session};
