//! Plain-text rendering of the views.

use std::fmt::Write as _;

use tandem_client::wire::Agent;
use tandem_core::types::AgentName;
use tandem_service::availability::calendar::HEADER_LABELS;
use tandem_service::availability::{AvailabilityModel, CalendarGrid, GridCell};
use tandem_service::availability::weekdays::weekday_from_index;
use tandem_service::pairing::{PairingEditor, Side, SlotRef};
use tandem_service::roster::AgentEditor;
use tandem_service::session::{LoadState, ScheduleSession};

const EMPTY_SIDE: &str = "(empty)";

fn name_or_empty(agent: Option<&AgentName>) -> &str {
    agent.map_or(EMPTY_SIDE, AgentName::as_str)
}

/// Month grid with available days in brackets. Headers of weekdays in the
/// weekly pattern are marked with `*`.
#[must_use]
pub fn calendar(grid: &CalendarGrid, model: &AvailabilityModel) -> String {
    let month = grid.month();
    let available = model.resolve_month(month);
    let pattern = model.snapshot().weekdays;

    let mut out = format!("{:^35}\n", month.label());
    for (column, label) in HEADER_LABELS.iter().enumerate() {
        let in_pattern = i64::try_from(column)
            .ok()
            .and_then(weekday_from_index)
            .is_some_and(|day| pattern.contains(day));
        let marker = if in_pattern { "*" } else { " " };
        let _ = write!(out, " {label}{marker}");
    }
    out.push('\n');

    for row in grid.layout() {
        for cell in row {
            match cell {
                GridCell::Blank => out.push_str("     "),
                GridCell::Day(day) => {
                    let index = usize::try_from(day.saturating_sub(1)).unwrap_or(usize::MAX);
                    if available.get(index).copied().unwrap_or(false) {
                        let _ = write!(out, " [{day:>2}]");
                    } else {
                        let _ = write!(out, "  {day:>2} ");
                    }
                }
            }
        }
        out.push('\n');
    }
    out
}

/// The agent dialog: form fields, then the calendar.
#[must_use]
pub fn agent_editor(editor: &AgentEditor) -> String {
    let mut out = match editor.agent_id() {
        Some(agent_id) => format!("Agent #{agent_id}\n"),
        None => "New agent\n".to_string(),
    };
    let form = &editor.form;
    let _ = writeln!(out, "  first_name:    {}", form.first_name);
    let _ = writeln!(out, "  last_name:     {}", form.last_name);
    let _ = writeln!(out, "  email:         {}", form.email);
    let _ = writeln!(out, "  phone_number:  {}", form.phone_number);
    let _ = writeln!(
        out,
        "  active_status: {}",
        if form.active_status { "yes" } else { "no" }
    );
    if let Some(error) = editor.load_error() {
        let _ = writeln!(out, "  (availability could not be loaded: {error})");
    }
    out.push('\n');
    out.push_str(&calendar(&editor.calendar, &editor.availability));
    out
}

/// The roster as a table.
#[must_use]
pub fn roster(agents: &[Agent], search: Option<&str>) -> String {
    let mut out = match search {
        Some(term) => format!("Agents matching '{term}'\n"),
        None => "Agents\n".to_string(),
    };
    if agents.is_empty() {
        out.push_str("  (none)\n");
    }
    for agent in agents {
        let _ = writeln!(
            out,
            "  {:>4}  {:<28} {:<30} {}",
            agent.agent_id,
            agent.display_name(),
            agent.email,
            if agent.active_status { "active" } else { "inactive" }
        );
    }
    out
}

fn load_label(load: &LoadState) -> String {
    match load {
        LoadState::Idle => "not loaded".to_string(),
        LoadState::Loading => "loading".to_string(),
        LoadState::Loaded => "loaded".to_string(),
        LoadState::LoadFailed(message) => format!("failed: {message}"),
    }
}

fn pending(editor: &PairingEditor) -> Option<String> {
    editor.pending_drag().map(|drag| format!("holding {}", drag.agent))
}

/// The selected week: slots numbered from 0 with sides 1 and 2, then the pool.
#[must_use]
pub fn schedule(session: &ScheduleSession) -> String {
    let editor = session.editor();
    let mut flags = vec![load_label(session.load_state())];
    if editor.is_editing() {
        flags.push("editing".to_string());
    }
    flags.extend(pending(editor));

    let mut out = format!("Week of {} ({})\n", session.week(), flags.join(", "));
    let draft = session.schedule();
    for (index, slot) in draft.slots().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {index:>3}  {:<28} | {}",
            name_or_empty(slot.side(Side::First)),
            name_or_empty(slot.side(Side::Second)),
        );
    }
    let unpaired: Vec<&str> = draft.unpaired().iter().map(AgentName::as_str).collect();
    let _ = writeln!(
        out,
        "  Unpaired: {}",
        if unpaired.is_empty() {
            "(none)".to_string()
        } else {
            unpaired.join(", ")
        }
    );
    out
}

/// Converts the 1-based side typed at the prompt.
#[must_use]
pub fn slot_ref(index: usize, side: usize) -> Option<SlotRef> {
    side.checked_sub(1)
        .and_then(Side::from_index)
        .map(|side| SlotRef::new(index, side))
}
