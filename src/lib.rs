/*!
# Moodpet

Moodpet is a terminal companion that asks how you feel once a day and keeps a
one-mood-per-day log you can browse and export.

## Core Features

- A daily mood prompt at a configurable time, with a 30 minute snooze
- One mood per calendar day, persisted as pretty-printed JSON
- A month calendar with each logged day colored by its mood
- CSV export of the whole log
- A rotating quote and clock line while the companion is open

## Architecture

- `store`: the mood log and its file, with advisory locking and atomic writes
- `scheduler`: the daily prompt state machine and its timer task
- `calendar`: month navigation and the day grid
- `export`: CSV writing
- `ui`: text panels and prompt parsing
- `ops`: the operations behind each command

## Usage Example

```rust,no_run
use moodpet::{AppContext, Config};
use moodpet::mood::MoodTag;

fn main() -> moodpet::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let ctx = AppContext::new(config);
    let saved = ctx.store.save(MoodTag::from("happy"))?;
    println!("Logged {} for {}", saved.tag, saved.date);
    Ok(())
}
```
*/

/// Sprite and mood image lookup
pub mod assets;
/// Month navigation and calendar grid
pub mod calendar;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
pub mod constants;
pub mod context;
/// Error types and utilities for error handling
pub mod errors;
/// CSV export of the mood log
pub mod export;
pub mod logging;
/// The mood catalog
pub mod mood;
/// High-level operations
pub mod ops;
pub mod quotes;
/// The daily prompt scheduler
pub mod scheduler;
/// The persisted mood log
pub mod store;
/// Terminal presentation
pub mod ui;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use context::AppContext;
pub use errors::{AppError, AppResult};
