use crate::constants;
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// A terminal companion that asks how you feel once a day
#[derive(Parser, Debug)]
#[clap(name = constants::APP_NAME, about = constants::APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Format of diagnostic logs written to stderr
    #[clap(
        long,
        global = true,
        default_value = constants::LOG_FORMAT_TEXT,
        value_parser = [constants::LOG_FORMAT_TEXT, constants::LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    /// What to do; runs the widget when omitted
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Keep the companion open and get the daily mood prompt
    Widget,
    /// Log a mood, prompting for one when MOOD is omitted
    Log {
        /// Mood name, e.g. happy or tired
        mood: Option<String>,
        /// Date to log for (format: YYYY-MM-DD or YYYYMMDD), defaults to today
        #[clap(short = 'd', long)]
        date: Option<String>,
    },
    /// Browse logged moods month by month
    Calendar {
        /// Year to open, defaults to the current year
        #[clap(
            short = 'y',
            long,
            value_parser = clap::value_parser!(i32)
                .range(i64::from(NaiveDate::MIN.year())..=i64::from(NaiveDate::MAX.year()))
        )]
        year: Option<i32>,
        /// Month to open (1-12), defaults to the current month
        #[clap(short = 'm', long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Write all logged moods to a CSV file
    Export {
        /// Directory to write the file to
        #[clap(short = 'o', long)]
        out_dir: Option<PathBuf>,
    },
    /// List the moods the companion knows
    Moods,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }

    /// The selected command, with the widget as default.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Widget)
    }
}

/// Parses a date given as YYYY-MM-DD or YYYYMMDD.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::from_str(date_str).or_else(|_| NaiveDate::parse_from_str(date_str, "%Y%m%d"))
}
