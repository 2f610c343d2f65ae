//! The interactive client: one `App` per terminal session.
//!
//! ## Module Organization
//!
//! - `command`: prompt grammar parsed with clap
//! - `render`: text output of each view
//! - `repl`: the stdin/stdout loop

pub mod command;
pub mod render;
pub mod repl;

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::NaiveDate;
use tandem_client::SharedApi;
use tandem_core::types::AgentName;
use tandem_service::error::ServiceError;
use tandem_service::pairing::DragSource;
use tandem_service::roster::{AgentEditor, Roster};
use tandem_service::session::{ScheduleSession, SessionState, View};

use command::{AgentCommand, CalCommand, Command, DragCommand, DropCommand, ViewArg, WeekTarget};

use crate::error::{AppError, AppResult};

/// Text to print after a command, and whether to stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

pub struct App {
    api: SharedApi,
    today: NaiveDate,
    login: SessionState,
    view: View,
    roster: Roster,
    agent_editor: Option<AgentEditor>,
    schedule: ScheduleSession,
}

impl App {
    #[must_use]
    pub fn new(api: SharedApi, today: NaiveDate) -> Self {
        Self {
            roster: Roster::new(Arc::clone(&api)),
            schedule: ScheduleSession::new(Arc::clone(&api), today),
            api,
            today,
            login: SessionState::new(),
            view: View::Login,
            agent_editor: None,
        }
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub const fn schedule(&self) -> &ScheduleSession {
        &self.schedule
    }

    /// ## Summary
    /// Parses and runs one input line.
    ///
    /// Every failure is turned into reply text; the session stays usable.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let command = match command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::default(),
            Err(err) => return Reply::text(err.to_string()),
        };

        match self.run(command).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::debug!(error = %err, "Command failed");
                Reply::text(describe(&err))
            }
        }
    }

    async fn run(&mut self, command: Command) -> AppResult<Reply> {
        match command {
            Command::Quit => Ok(Reply {
                text: String::new(),
                quit: true,
            }),
            Command::Login { username, password } => {
                self.login
                    .login(self.api.as_ref(), &username, &password)
                    .await?;
                self.switch(View::Schedule).await
            }
            Command::Logout => {
                self.login.logout();
                self.agent_editor = None;
                self.view = View::Login;
                Ok(Reply::text("Logged out"))
            }
            Command::View { view } => {
                let view = match view {
                    ViewArg::Login => View::Login,
                    ViewArg::Agents => View::Agents,
                    ViewArg::Schedule => View::Schedule,
                };
                self.switch(view).await
            }
            Command::Show => Ok(Reply::text(self.render())),
            command => {
                self.login.require_login()?;
                self.run_authenticated(command).await
            }
        }
    }

    async fn run_authenticated(&mut self, command: Command) -> AppResult<Reply> {
        match command {
            Command::Agents { search } => {
                let search = search.join(" ");
                self.roster.load(Some(&search)).await?;
                self.view = View::Agents;
                Ok(Reply::text(self.render()))
            }
            Command::Agent(agent) => self.run_agent(agent).await,
            Command::Cal(cal) => self.run_calendar(cal),
            Command::Week { target } => {
                match WeekTarget::parse(target.as_deref())? {
                    WeekTarget::Current => self.schedule.refresh().await?,
                    WeekTarget::Next => self.schedule.next_week().await?,
                    WeekTarget::Previous => self.schedule.previous_week().await?,
                    WeekTarget::Containing(date) => self.schedule.set_week(date).await?,
                }
                self.view = View::Schedule;
                Ok(Reply::text(self.render()))
            }
            Command::Regen => {
                self.schedule.regenerate().await?;
                Ok(Reply::text(self.render()))
            }
            Command::Edit => {
                self.schedule.begin_edit()?;
                Ok(Reply::text(self.render()))
            }
            Command::Drag(drag) => self.run_drag(drag),
            Command::Drop(drop) => {
                let outcome = match drop {
                    DropCommand::Slot { index, side } => {
                        let target = render::slot_ref(index, side).ok_or_else(|| bad_side(side))?;
                        self.schedule.editor_mut().drop_on_slot(target)?
                    }
                    DropCommand::Unpaired => self.schedule.editor_mut().drop_on_unpaired()?,
                };
                tracing::debug!(?outcome, "Drop resolved");
                Ok(Reply::text(self.render()))
            }
            Command::AddSlot => {
                self.schedule.editor_mut().append_empty_slot()?;
                Ok(Reply::text(self.render()))
            }
            Command::Save => {
                self.schedule.commit().await?;
                Ok(Reply::text(format!("Saved\n{}", self.render())))
            }
            Command::Cancel => {
                self.schedule.cancel_edit()?;
                Ok(Reply::text(self.render()))
            }
            Command::Quit
            | Command::Login { .. }
            | Command::Logout
            | Command::View { .. }
            | Command::Show => Ok(Reply::default()),
        }
    }

    async fn run_agent(&mut self, command: AgentCommand) -> AppResult<Reply> {
        match command {
            AgentCommand::New => {
                self.agent_editor = Some(AgentEditor::open_new(self.today));
            }
            AgentCommand::Edit { agent_id } => {
                if self.roster.find(agent_id).is_none() {
                    self.roster.reload().await?;
                }
                let agent = self
                    .roster
                    .find(agent_id)
                    .ok_or_else(|| AppError::Usage(format!("No agent #{agent_id}")))?;
                self.agent_editor =
                    Some(AgentEditor::open_existing(self.api.as_ref(), agent, self.today).await);
            }
            AgentCommand::Set { field, value } => {
                self.open_editor()?.form.set(&field, &value.join(" "))?;
            }
            AgentCommand::Save => {
                let api = Arc::clone(&self.api);
                let agent_id = self.open_editor()?.submit(api.as_ref()).await?;
                if let Some(editor) = self.agent_editor.take() {
                    editor.close();
                }
                self.roster.reload().await?;
                self.view = View::Agents;
                return Ok(Reply::text(format!("Saved agent #{agent_id}\n{}", self.render())));
            }
            AgentCommand::Close => {
                if let Some(editor) = self.agent_editor.take() {
                    editor.close();
                }
            }
            AgentCommand::Delete { agent_id } => {
                self.roster.delete(agent_id).await?;
            }
        }
        self.view = View::Agents;
        Ok(Reply::text(self.render()))
    }

    fn run_calendar(&mut self, command: CalCommand) -> AppResult<Reply> {
        let editor = self.open_editor()?;
        match command {
            CalCommand::Next => editor.calendar.next_month(),
            CalCommand::Prev => editor.calendar.previous_month(),
            CalCommand::Weekday { column } => {
                if !editor.click_header(column) {
                    return Err(AppError::Usage(format!("No weekday column {column}")));
                }
            }
            CalCommand::Day { day } => {
                if !editor.click_day(day) {
                    return Err(AppError::Usage(format!(
                        "{} has no day {day}",
                        editor.calendar.month().label()
                    )));
                }
            }
            CalCommand::Show => {}
        }
        Ok(Reply::text(render::agent_editor(editor)))
    }

    fn run_drag(&mut self, command: DragCommand) -> AppResult<Reply> {
        let editor = self.schedule.editor_mut();
        match command {
            DragCommand::Slot { index, side } => {
                let at = render::slot_ref(index, side).ok_or_else(|| bad_side(side))?;
                let agent = editor
                    .current()
                    .occupant(at)
                    .cloned()
                    .ok_or_else(|| AppError::Usage(format!("Nobody at {at}")))?;
                editor.begin_drag(agent, DragSource::Slot(at))?;
            }
            DragCommand::Unpaired { name } => {
                let agent = AgentName::new(&name.join(" "))
                    .ok_or_else(|| AppError::Usage("Name required".to_string()))?;
                editor.begin_drag(agent, DragSource::Unpaired)?;
            }
        }
        Ok(Reply::text(self.render()))
    }

    fn open_editor(&mut self) -> AppResult<&mut AgentEditor> {
        self.agent_editor.as_mut().ok_or_else(|| {
            AppError::Usage("No agent is open; use 'agent new' or 'agent edit <id>'".to_string())
        })
    }

    async fn switch(&mut self, requested: View) -> AppResult<Reply> {
        let view = self.login.route(requested);
        if view != requested {
            tracing::debug!(requested = requested.name(), "Login required");
        }
        self.view = view;

        match view {
            View::Agents if self.roster.agents().is_empty() => {
                self.roster.reload().await?;
            }
            View::Schedule if !self.schedule.editor().is_editing() => {
                self.schedule.refresh().await?;
            }
            View::Login | View::Agents | View::Schedule => {}
        }
        Ok(Reply::text(self.render()))
    }

    fn render(&self) -> String {
        match self.view {
            View::Login => match self.login.username() {
                Some(username) => format!("Logged in as {username}"),
                None => "Please log in: login <username> <password>".to_string(),
            },
            View::Agents => match &self.agent_editor {
                Some(editor) => render::agent_editor(editor),
                None => render::roster(self.roster.agents(), self.roster.search()),
            },
            View::Schedule => render::schedule(&self.schedule),
        }
    }
}

fn bad_side(side: usize) -> AppError {
    AppError::Usage(format!("Side must be 1 or 2, not {side}"))
}

/// User-facing text for a failed command.
fn describe(err: &AppError) -> String {
    match err {
        AppError::ServiceError(ServiceError::Validation(errors)) => {
            let mut text = "Please fix:".to_string();
            for (field, message) in errors.iter() {
                let _ = write!(text, "\n  {field}: {message}");
            }
            text
        }
        AppError::ServiceError(ServiceError::NotEditing) => {
            "Not editing; use 'edit' first".to_string()
        }
        AppError::ServiceError(ServiceError::NotLoggedIn) => {
            "Please log in: login <username> <password>".to_string()
        }
        other => format!("Error: {other}"),
    }
}
