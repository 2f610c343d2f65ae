//! Grammar of the interactive prompt.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::error::{AppError, AppResult};

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
#[command(name = "", override_usage = "<command> [args]")]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Login,
    Agents,
    Schedule,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in to the scheduling service
    Login { username: String, password: String },
    /// End the session
    Logout,
    /// Switch to another view
    View { view: ViewArg },
    /// List agents, optionally filtered
    Agents {
        #[arg(trailing_var_arg = true)]
        search: Vec<String>,
    },
    /// Add, edit or delete agents
    #[command(subcommand)]
    Agent(AgentCommand),
    /// Edit the availability calendar of the open agent
    #[command(subcommand)]
    Cal(CalCommand),
    /// Select the schedule week
    Week {
        /// `next`, `prev` or a date inside the week (YYYY-MM-DD)
        target: Option<String>,
    },
    /// Regenerate the selected week's schedule
    Regen,
    /// Start editing the schedule
    Edit,
    /// Pick up an agent
    #[command(subcommand)]
    Drag(DragCommand),
    /// Drop the picked-up agent
    #[command(subcommand)]
    Drop(DropCommand),
    /// Append an empty pair slot
    AddSlot,
    /// Save the edited schedule
    Save,
    /// Discard the edited schedule
    Cancel,
    /// Show the current view
    Show,
    /// Leave the client
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Subcommand)]
pub enum AgentCommand {
    /// Open the form for a new agent
    New,
    /// Open the form for an existing agent
    Edit { agent_id: i64 },
    /// Set a form field
    Set {
        field: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Submit the form
    Save,
    /// Close the form without saving
    Close,
    /// Delete an agent
    Delete { agent_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CalCommand {
    /// Show the next month
    Next,
    /// Show the previous month
    Prev,
    /// Toggle a weekday column, 0 being Sunday
    Weekday { column: usize },
    /// Toggle a day of the displayed month
    Day { day: u32 },
    /// Show the calendar
    Show,
}

#[derive(Debug, Subcommand)]
pub enum DragCommand {
    /// From a slot side (sides are 1 and 2)
    Slot { index: usize, side: usize },
    /// From the unpaired pool
    Unpaired {
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DropCommand {
    /// Onto a slot side (sides are 1 and 2)
    Slot { index: usize, side: usize },
    /// Into the unpaired pool
    Unpaired,
}

/// Where `week` should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekTarget {
    Current,
    Next,
    Previous,
    Containing(NaiveDate),
}

impl WeekTarget {
    /// ## Errors
    /// Returns `AppError::Usage` for anything but `next`, `prev` or a date.
    pub fn parse(target: Option<&str>) -> AppResult<Self> {
        match target {
            None => Ok(Self::Current),
            Some("next") => Ok(Self::Next),
            Some("prev" | "previous") => Ok(Self::Previous),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Self::Containing)
                .map_err(|_err| AppError::Usage(format!("'{raw}' is not next, prev or YYYY-MM-DD"))),
        }
    }
}

/// ## Summary
/// Parses one input line.
///
/// Returns `Ok(None)` for a blank line.
///
/// ## Errors
/// Returns `AppError::Usage` carrying clap's message, including help output.
pub fn parse(input: &str) -> AppResult<Option<Command>> {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    Line::try_parse_from(words)
        .map(|line| Some(line.command))
        .map_err(|err| AppError::Usage(err.render().to_string()))
}
