//! The always-on companion loop.
//!
//! # Flow
//!
//! 1. Start the prompt scheduler on a tokio runtime
//! 2. Refresh the clock and quote line on a fixed interval
//! 3. Show the mood prompt whenever the scheduler fires
//! 4. Handle typed answers and commands until `quit` or end of input
//!
//! Stdin is read on a plain thread and forwarded over a channel, so the
//! loop can be driven by any line source in tests.

use crate::calendar::MonthCursor;
use crate::context::AppContext;
use crate::errors::{AppError, AppResult};
use crate::ops::{calendar, export};
use crate::quotes::QuoteRotator;
use crate::mood::MoodTag;
use crate::scheduler::{Clock, PromptEvent, PromptKind, PromptScheduler, SchedulerHandle, SystemClock};
use crate::store::SavedMood;
use crate::ui::{self, Notice, PromptAnswer};
use crate::constants;
use chrono::NaiveDate;
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::thread;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info, warn};

/// Runs the widget on stdin/stdout until the user quits.
///
/// # Errors
///
/// Returns an error if the runtime cannot be started or stdout is closed.
/// Failures of individual commands are shown as notices instead.
pub fn run_widget(ctx: &AppContext) -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let lines = spawn_stdin_reader();
    let mut stdout = io::stdout();
    let result = runtime.block_on(widget_session(ctx, SystemClock, lines, &mut stdout));

    // The stdin thread may still be blocked on a read.
    runtime.shutdown_background();
    result
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(constants::CHANNEL_CAPACITY);
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

enum Flow {
    Continue,
    Quit,
}

struct Widget<'a, C, R: Rng, W> {
    ctx: &'a AppContext,
    clock: C,
    quotes: QuoteRotator<R>,
    out: &'a mut W,
    open_prompt: Option<PromptKind>,
}

/// Drives one widget session from `lines` until `quit` or the channel closes.
///
/// The scheduler is always shut down before returning.
pub async fn widget_session<C, W>(
    ctx: &AppContext,
    clock: C,
    mut lines: mpsc::Receiver<String>,
    out: &mut W,
) -> AppResult<()>
where
    C: Clock + Clone,
    W: Write,
{
    let (scheduler, mut prompts) = PromptScheduler::spawn(
        ctx.config.prompt_at,
        clock.clone(),
        ctx.config.poll_interval,
        ctx.config.snooze_delay,
    );
    let mut ticker = time::interval(ctx.config.quote_interval);

    let mut widget = Widget {
        ctx,
        clock,
        quotes: QuoteRotator::new(),
        out,
        open_prompt: None,
    };

    let result = match widget.banner() {
        Ok(()) => loop {
            let step = tokio::select! {
                biased;
                Some(event) = prompts.recv() => widget.on_prompt(event),
                _ = ticker.tick() => widget.on_tick(),
                line = lines.recv() => match line {
                    Some(line) => widget.on_line(&line, &scheduler).await,
                    None => {
                        debug!("Input closed, leaving the widget");
                        Ok(Flow::Quit)
                    }
                },
            };
            match step {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break Ok(()),
                Err(e) => break Err(e),
            }
        },
        Err(e) => Err(e),
    };

    scheduler.shutdown().await;
    info!("Widget closed");
    result
}

impl<C: Clock, R: Rng, W: Write> Widget<'_, C, R, W> {
    fn banner(&mut self) -> AppResult<()> {
        write!(
            self.out,
            "{}",
            ui::render_banner(&self.ctx.assets, self.ctx.config.prompt_at)
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn on_tick(&mut self) -> AppResult<Flow> {
        let quote = self.quotes.next_quote();
        writeln!(self.out, "{}", ui::render_status(self.clock.now(), quote))?;
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    /// A scheduled prompt replaces an open manual one, so it can be snoozed
    /// or dismissed through the scheduler.
    fn on_prompt(&mut self, event: PromptEvent) -> AppResult<Flow> {
        match self.open_prompt {
            None | Some(PromptKind::Manual) => self.open(event.kind)?,
            Some(open) => debug!("Prompt {:?} still open, ignoring {:?}", open, event.kind),
        }
        Ok(Flow::Continue)
    }

    fn open(&mut self, kind: PromptKind) -> AppResult<()> {
        self.open_prompt = Some(kind);
        write!(
            self.out,
            "{}",
            ui::render_prompt(self.clock.now().date(), &self.ctx.catalog, kind)
        )?;
        self.out.flush()?;
        Ok(())
    }

    async fn on_line(&mut self, line: &str, scheduler: &SchedulerHandle) -> AppResult<Flow> {
        let command = line.trim().to_ascii_lowercase();
        if command == "quit" || command == "exit" {
            writeln!(self.out, "Bye! See you soon.")?;
            return Ok(Flow::Quit);
        }

        if let Some(kind) = self.open_prompt {
            self.answer(line, kind, scheduler).await?;
            return Ok(Flow::Continue);
        }

        match command.as_str() {
            "" => {}
            "log" => self.open(PromptKind::Manual)?,
            "calendar" => {
                let cursor = MonthCursor::containing(self.clock.now().date());
                if let Err(e) = calendar::show_month(self.ctx, cursor, self.out) {
                    self.notice(Notice::error("Calendar", e.to_string()))?;
                }
            }
            "export" => {
                let result = export::export_mood_data(self.ctx, None, self.clock.now().date());
                self.notice(ui::export_notice(&result))?;
            }
            "moods" => write!(
                self.out,
                "{}",
                ui::render_legend(&self.ctx.catalog, self.ctx.config.color)
            )?,
            "help" => write!(self.out, "{}", ui::render_help())?,
            other => writeln!(self.out, "Unknown command '{}'. Type 'help'.", other)?,
        }
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    async fn answer(
        &mut self,
        line: &str,
        kind: PromptKind,
        scheduler: &SchedulerHandle,
    ) -> AppResult<()> {
        match ui::parse_prompt_answer(line, &self.ctx.catalog, kind) {
            Some(PromptAnswer::Mood(tag)) => {
                self.open_prompt = None;
                let today = self.clock.now().date();
                match self.save(today, tag).await {
                    Ok(saved) => write!(
                        self.out,
                        "{}",
                        ui::render_reaction(&saved, &self.ctx.catalog, &self.ctx.assets)
                    )?,
                    Err(e) => self.report(e)?,
                }
            }
            Some(PromptAnswer::Snooze) => {
                self.open_prompt = None;
                scheduler.snooze().await;
                writeln!(
                    self.out,
                    "Okay! I'll ask again in {} minutes.",
                    constants::SNOOZE_MINUTES
                )?;
            }
            Some(PromptAnswer::Dismiss) => {
                self.open_prompt = None;
                if kind != PromptKind::Manual {
                    scheduler.dismiss().await;
                }
                writeln!(self.out, "No worries. See you tomorrow!")?;
            }
            None => writeln!(
                self.out,
                "Pick a number or a mood name{}, or 'd' to dismiss.",
                if kind.can_snooze() { ", 's' to snooze" } else { "" }
            )?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Saves on the blocking pool, since the store may wait on its file lock.
    async fn save(&self, date: NaiveDate, tag: MoodTag) -> AppResult<SavedMood> {
        let store = self.ctx.store.clone();
        tokio::task::spawn_blocking(move || store.save_for_date(date, tag))
            .await
            .map_err(|e| AppError::Io(io::Error::new(io::ErrorKind::Other, e)))?
    }

    fn report(&mut self, error: AppError) -> AppResult<()> {
        warn!("Saving mood failed: {}", error);
        self.notice(Notice::error("Log Mood", format!("Failed to save mood: {}", error)))
    }

    fn notice(&mut self, notice: Notice) -> AppResult<()> {
        writeln!(self.out, "{}", notice)?;
        Ok(())
    }
}
