/*!
# Moodpet - A Terminal Mood Companion

Moodpet keeps a small companion open in your terminal, asks once a day how
you feel, and keeps a one-mood-per-day log you can review and export.

## Usage

```
moodpet [OPTIONS] [COMMAND]

Commands:
  widget    Keep the companion open and get the daily mood prompt (default)
  log       Log a mood, prompting for one when MOOD is omitted
  calendar  Browse logged moods month by month
  export    Write all logged moods to a CSV file
  moods     List the moods the companion knows

Options:
  -v, --verbose                 Print verbose output
      --log-format <FORMAT>     Format of diagnostic logs [text, json]
  -h, --help                    Print help information
  -V, --version                 Print version information
```

## Configuration

- `MOODPET_DIR`: where the mood log lives (defaults to "~/.moodpet")
- `MOODPET_ASSETS_DIR`: sprite and mood images (defaults to "$MOODPET_DIR/assets")
- `MOODPET_EXPORT_DIR`: where exports are written (defaults to the current directory)
- `MOODPET_PROMPT_AT`: daily prompt time as HH:MM (defaults to 15:00)
- `NO_COLOR`: disables colored calendar cells
*/

use chrono::{Datelike, Local};
use moodpet::calendar::MonthCursor;
use moodpet::cli::{self, CliArgs, Command};
use moodpet::config::Config;
use moodpet::constants;
use moodpet::context::AppContext;
use moodpet::errors::{AppError, AppResult};
use moodpet::{logging, ops, ui};
use std::io::{self, Write};
use std::process;
use tracing::{debug, info};
use uuid::Uuid;

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = logging::init_tracing(&args.log_format, args.verbose) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let correlation_id = Uuid::new_v4();
    let root_span = tracing::info_span!(
        constants::TRACING_ROOT_SPAN_NAME,
        service_name = constants::TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    debug!("CLI arguments: {:?}", args);

    if let Err(e) = run(&args) {
        debug!("Command failed: {:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Loads configuration and dispatches the selected command.
fn run(args: &CliArgs) -> AppResult<()> {
    info!("Loading configuration");
    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let ctx = AppContext::new(config);
    let today = Local::now().date_naive();

    match args.command() {
        Command::Widget => ops::run_widget(&ctx),
        Command::Log { mood, date } => {
            let date = match date {
                Some(date_str) => cli::parse_date(&date_str).map_err(|e| {
                    AppError::Input(format!("Invalid date format '{}': {}", date_str, e))
                })?,
                None => today,
            };

            let mut stdout = io::stdout();
            let saved = ops::log_mood(&ctx, mood.as_deref(), date, &mut io::stdin().lock(), &mut stdout)?;
            if saved.is_none() {
                writeln!(stdout, "No mood logged.")?;
            }
            Ok(())
        }
        Command::Calendar { year, month } => {
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            let cursor = MonthCursor::new(year, month)
                .ok_or_else(|| AppError::Input(format!("No such month: {}-{}", year, month)))?;

            ops::review_calendar(&ctx, cursor, &mut io::stdin().lock(), &mut io::stdout())?;
            Ok(())
        }
        Command::Export { out_dir } => {
            let result = ops::export_mood_data(&ctx, out_dir.as_deref(), today);
            let notice = ui::export_notice(&result);
            result?;
            ui::notify(&notice);
            Ok(())
        }
        Command::Moods => {
            print!("{}", ui::render_legend(&ctx.catalog, ctx.config.color));
            Ok(())
        }
    }
}
