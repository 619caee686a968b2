//! Daily mood prompt scheduling.
//!
//! `DailyPrompt` is the pure state machine: it is fed wall-clock readings and
//! snooze/dismiss actions and decides when a prompt event is due.
//! `PromptScheduler` drives it from a tokio task with a polling interval and a
//! one-shot snooze timer, and hands prompt events to the main loop over a
//! channel. The task never touches the store or the terminal.
//!
//! A target minute missed entirely (machine asleep, process suspended) is
//! skipped; there is no catch-up.

use crate::constants;
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Hour and minute at which the daily prompt fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTime {
    hour: u32,
    minute: u32,
}

impl PromptTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(PromptTime { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// True when `time` falls inside the target minute.
    pub fn matches(&self, time: NaiveTime) -> bool {
        time.hour() == self.hour && time.minute() == self.minute
    }
}

impl Default for PromptTime {
    fn default() -> Self {
        PromptTime {
            hour: constants::DEFAULT_PROMPT_HOUR,
            minute: constants::DEFAULT_PROMPT_MINUTE,
        }
    }
}

impl FromStr for PromptTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s.trim(), constants::PROMPT_TIME_FORMAT)?;
        Ok(PromptTime {
            hour: time.hour(),
            minute: time.minute(),
        })
    }
}

impl fmt::Display for PromptTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Where the daily prompt cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    /// Waiting for the next target minute.
    Waiting,
    /// The prompt already fired during the current target minute.
    ArmedToday,
    /// A snoozed prompt is pending.
    Snoozed,
}

/// Why a prompt is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// The daily target time was reached.
    Daily,
    /// A snooze delay ran out.
    Snoozed,
    /// The user asked to log a mood.
    Manual,
}

impl PromptKind {
    /// Manual prompts have nothing to snooze back to.
    pub fn can_snooze(&self) -> bool {
        !matches!(self, PromptKind::Manual)
    }
}

/// A request to show the mood prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEvent {
    pub kind: PromptKind,
    pub at: NaiveDateTime,
}

/// The daily prompt state machine.
///
/// # Examples
///
/// ```
/// use moodpet::scheduler::{DailyPrompt, PromptTime};
/// use chrono::NaiveDate;
///
/// let mut prompt = DailyPrompt::new(PromptTime::new(15, 0).unwrap());
/// let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///
/// assert!(prompt.tick(day.and_hms_opt(14, 59, 30).unwrap()).is_none());
/// assert!(prompt.tick(day.and_hms_opt(15, 0, 0).unwrap()).is_some());
/// assert!(prompt.tick(day.and_hms_opt(15, 0, 30).unwrap()).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct DailyPrompt {
    target: PromptTime,
    state: PromptState,
}

impl DailyPrompt {
    pub fn new(target: PromptTime) -> Self {
        DailyPrompt {
            target,
            state: PromptState::Waiting,
        }
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    pub fn target(&self) -> PromptTime {
        self.target
    }

    /// Feeds one wall-clock reading; returns the prompt to show, if any.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<PromptEvent> {
        let on_target = self.target.matches(now.time());
        match self.state {
            PromptState::Waiting if on_target => {
                self.state = PromptState::ArmedToday;
                Some(PromptEvent {
                    kind: PromptKind::Daily,
                    at: now,
                })
            }
            PromptState::ArmedToday if !on_target => {
                self.state = PromptState::Waiting;
                None
            }
            // A pending snooze stands in for the daily prompt.
            _ => None,
        }
    }

    /// The user deferred the prompt.
    pub fn snooze(&mut self) {
        self.state = PromptState::Snoozed;
    }

    /// The snooze delay ran out; re-fires the prompt unless the snooze was cancelled.
    pub fn snooze_elapsed(&mut self, now: NaiveDateTime) -> Option<PromptEvent> {
        if self.state != PromptState::Snoozed {
            return None;
        }
        self.state = PromptState::Waiting;
        Some(PromptEvent {
            kind: PromptKind::Snoozed,
            at: now,
        })
    }

    /// The user closed the prompt; any pending snooze is dropped.
    pub fn dismiss(&mut self) {
        if self.state == PromptState::Snoozed {
            self.state = PromptState::Waiting;
        }
    }
}

/// Source of wall-clock readings.
pub trait Clock: Send + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// User actions forwarded from the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    Snooze,
    Dismiss,
}

/// Main-loop side of a running scheduler.
#[derive(Debug)]
pub struct SchedulerHandle {
    commands: mpsc::Sender<SchedulerCommand>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Defers the current prompt; it re-fires after the snooze delay.
    pub async fn snooze(&self) -> bool {
        self.commands.send(SchedulerCommand::Snooze).await.is_ok()
    }

    pub async fn dismiss(&self) -> bool {
        self.commands.send(SchedulerCommand::Dismiss).await.is_ok()
    }

    /// Stops the scheduler task, abandoning any pending snooze.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            debug!("Scheduler task ended abnormally: {}", e);
        }
    }
}

/// Timer task driving a `DailyPrompt`.
pub struct PromptScheduler<C: Clock> {
    prompt: DailyPrompt,
    clock: C,
    poll_interval: Duration,
    snooze_delay: Duration,
    commands: mpsc::Receiver<SchedulerCommand>,
    events: mpsc::Sender<PromptEvent>,
    cancel: CancellationToken,
}

impl<C: Clock> PromptScheduler<C> {
    /// Spawns the scheduler on the current tokio runtime.
    ///
    /// Prompt events arrive on the returned receiver; snooze, dismiss and
    /// shutdown go through the handle.
    pub fn spawn(
        target: PromptTime,
        clock: C,
        poll_interval: Duration,
        snooze_delay: Duration,
    ) -> (SchedulerHandle, mpsc::Receiver<PromptEvent>) {
        let (command_tx, command_rx) = mpsc::channel(constants::CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(constants::CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();

        let scheduler = PromptScheduler {
            prompt: DailyPrompt::new(target),
            clock,
            poll_interval,
            snooze_delay,
            commands: command_rx,
            events: event_tx,
            cancel: cancel.clone(),
        };
        info!("Daily mood prompt scheduled at {}", target);
        let task = tokio::spawn(scheduler.run());

        (
            SchedulerHandle {
                commands: command_tx,
                cancel,
                task,
            },
            event_rx,
        )
    }

    async fn run(mut self) {
        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let snooze_timer = time::sleep(Duration::ZERO);
        tokio::pin!(snooze_timer);
        let mut snooze_pending = false;

        loop {
            let event = tokio::select! {
                _ = self.cancel.cancelled() => {
                    debug!("Scheduler cancelled");
                    break;
                }
                _ = ticker.tick() => self.prompt.tick(self.clock.now()),
                () = &mut snooze_timer, if snooze_pending => {
                    snooze_pending = false;
                    self.prompt.snooze_elapsed(self.clock.now())
                }
                command = self.commands.recv() => {
                    match command {
                        Some(SchedulerCommand::Snooze) => {
                            self.prompt.snooze();
                            snooze_timer.as_mut().reset(Instant::now() + self.snooze_delay);
                            snooze_pending = true;
                            debug!("Prompt snoozed for {:?}", self.snooze_delay);
                        }
                        Some(SchedulerCommand::Dismiss) => {
                            self.prompt.dismiss();
                            snooze_pending = false;
                        }
                        None => {
                            debug!("Scheduler command channel closed");
                            break;
                        }
                    }
                    None
                }
            };

            if let Some(event) = event {
                debug!("Prompt due: {:?}", event.kind);
                if self.events.send(event).await.is_err() {
                    debug!("Prompt receiver dropped, stopping scheduler");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_single_fire_per_target_minute() {
        let mut prompt = DailyPrompt::new(PromptTime::new(15, 0).unwrap());

        let fired: Vec<_> = [at(14, 59, 0), at(15, 0, 0), at(15, 0, 30), at(15, 1, 0)]
            .into_iter()
            .filter_map(|now| prompt.tick(now))
            .collect();

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].at, at(15, 0, 0));
        assert_eq!(fired[0].kind, PromptKind::Daily);
        assert_eq!(prompt.state(), PromptState::Waiting);
    }

    #[test]
    fn test_rearms_for_next_day() {
        let mut prompt = DailyPrompt::new(PromptTime::new(15, 0).unwrap());
        assert!(prompt.tick(at(15, 0, 0)).is_some());
        assert_eq!(prompt.state(), PromptState::ArmedToday);
        assert!(prompt.tick(at(15, 1, 0)).is_none());

        let next_day = NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(15, 0, 10)
            .unwrap();
        assert!(prompt.tick(next_day).is_some());
    }

    #[test]
    fn test_missed_minute_is_skipped() {
        let mut prompt = DailyPrompt::new(PromptTime::new(15, 0).unwrap());
        assert!(prompt.tick(at(14, 59, 45)).is_none());
        assert!(prompt.tick(at(15, 1, 15)).is_none());
        assert_eq!(prompt.state(), PromptState::Waiting);
    }

    #[test]
    fn test_snooze_refires_once() {
        let mut prompt = DailyPrompt::new(PromptTime::new(15, 0).unwrap());
        prompt.tick(at(15, 0, 0)).unwrap();
        prompt.snooze();

        // Still inside the target minute: no second daily prompt.
        assert!(prompt.tick(at(15, 0, 30)).is_none());
        assert_eq!(prompt.state(), PromptState::Snoozed);

        let event = prompt.snooze_elapsed(at(15, 30, 0)).unwrap();
        assert_eq!(event.kind, PromptKind::Snoozed);
        assert!(prompt.snooze_elapsed(at(15, 30, 1)).is_none());

        // Snoozing the re-fired prompt works the same way.
        prompt.snooze();
        assert!(prompt.snooze_elapsed(at(16, 0, 0)).is_some());
    }

    #[test]
    fn test_dismiss_drops_pending_snooze() {
        let mut prompt = DailyPrompt::new(PromptTime::new(15, 0).unwrap());
        prompt.snooze();
        prompt.dismiss();
        assert_eq!(prompt.state(), PromptState::Waiting);
        assert!(prompt.snooze_elapsed(at(15, 30, 0)).is_none());
    }

    #[test]
    fn test_prompt_time_parse_and_display() {
        let time: PromptTime = "09:05".parse().unwrap();
        assert_eq!(time, PromptTime::new(9, 5).unwrap());
        assert_eq!(time.to_string(), "09:05");
        assert!("24:00".parse::<PromptTime>().is_err());
        assert!("noon".parse::<PromptTime>().is_err());
        assert!(PromptTime::new(12, 60).is_none());
    }

    #[test]
    fn test_manual_prompt_cannot_snooze() {
        assert!(PromptKind::Daily.can_snooze());
        assert!(PromptKind::Snoozed.can_snooze());
        assert!(!PromptKind::Manual.can_snooze());
    }
}
