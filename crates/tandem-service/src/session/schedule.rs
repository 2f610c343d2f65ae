use chrono::NaiveDate;
use tandem_client::{ClientResult, SharedApi, wire::SchedulePayload};
use tandem_core::util::week::{monday_of, shift_weeks};
use tokio::sync::watch;

use crate::error::{ServiceError, ServiceResult};
use crate::pairing::{PairingEditor, ScheduleDraft};

/// Progress of the schedule of the selected week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    LoadFailed(String),
}

/// Snapshot published to observers after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub week: NaiveDate,
    pub load: LoadState,
    pub editing: bool,
}

/// Identifies one issued fetch. Only the latest ticket for the selected week
/// may update the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub week: NaiveDate,
}

/// What became of a fetch completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCompletion {
    Applied,
    Discarded,
}

/// The schedule view of one user: the selected week and its pairing editor.
///
/// Fetches may be split into `begin_fetch` and `complete_fetch` so the
/// request can run elsewhere; completions that lost the race are dropped.
pub struct ScheduleSession {
    api: SharedApi,
    week: NaiveDate,
    load: LoadState,
    editor: PairingEditor,
    next_seq: u64,
    latest: Option<FetchTicket>,
    status: watch::Sender<SessionStatus>,
}

impl ScheduleSession {
    /// A session showing the week containing `today`. Nothing is fetched yet.
    #[must_use]
    pub fn new(api: SharedApi, today: NaiveDate) -> Self {
        let week = monday_of(today);
        let (status, _) = watch::channel(SessionStatus {
            week,
            load: LoadState::Idle,
            editing: false,
        });

        Self {
            api,
            week,
            load: LoadState::Idle,
            editor: PairingEditor::new(ScheduleDraft::default()),
            next_seq: 0,
            latest: None,
            status,
        }
    }

    #[must_use]
    pub fn api(&self) -> SharedApi {
        std::sync::Arc::clone(&self.api)
    }

    /// Monday of the selected week.
    #[must_use]
    pub const fn week(&self) -> NaiveDate {
        self.week
    }

    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load
    }

    #[must_use]
    pub const fn editor(&self) -> &PairingEditor {
        &self.editor
    }

    /// The editor, for drag and drop while editing.
    pub const fn editor_mut(&mut self) -> &mut PairingEditor {
        &mut self.editor
    }

    /// The schedule to display: the draft while editing, otherwise the last fetch.
    #[must_use]
    pub const fn schedule(&self) -> &ScheduleDraft {
        self.editor.current()
    }

    /// Receives a `SessionStatus` after every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    fn publish(&self) {
        let status = SessionStatus {
            week: self.week,
            load: self.load.clone(),
            editing: self.editor.is_editing(),
        };
        self.status.send_replace(status);
    }

    /// ## Summary
    /// Selects the week containing `date` and issues a fetch for it.
    ///
    /// Any draft is discarded and the previous week's schedule is cleared.
    pub fn select_week(&mut self, date: NaiveDate) -> FetchTicket {
        let week = monday_of(date);
        if week != self.week {
            tracing::info!(%week, "Week selected");
        }
        self.week = week;
        self.editor.replace_published(ScheduleDraft::default());
        self.begin_fetch()
    }

    /// Issues a fetch for the selected week, superseding any fetch in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_seq += 1;
        let ticket = FetchTicket {
            seq: self.next_seq,
            week: self.week,
        };
        tracing::debug!(seq = ticket.seq, week = %ticket.week, "Fetching schedule");

        self.latest = Some(ticket);
        self.load = LoadState::Loading;
        self.publish();
        ticket
    }

    /// ## Summary
    /// Applies the result of the fetch identified by `ticket`.
    ///
    /// A completion for a superseded ticket or another week is discarded, as
    /// is a response that echoes a different week than requested.
    ///
    /// ## Errors
    /// Returns the fetch error when the latest fetch failed; the session is
    /// then `LoadFailed`.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: ClientResult<SchedulePayload>,
    ) -> ServiceResult<FetchCompletion> {
        if self.latest != Some(ticket) || ticket.week != self.week {
            tracing::warn!(
                seq = ticket.seq,
                week = %ticket.week,
                selected = %self.week,
                "Discarding stale schedule response"
            );
            return Ok(FetchCompletion::Discarded);
        }
        self.latest = None;

        let payload = match result {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(week = %ticket.week, error = %err, "Failed to fetch schedule");
                self.load = LoadState::LoadFailed(err.to_string());
                self.publish();
                return Err(err.into());
            }
        };

        if let Some(echoed) = payload.echoed_week().filter(|echoed| *echoed != ticket.week) {
            tracing::warn!(%echoed, week = %ticket.week, "Schedule response is for another week");
            self.load = LoadState::LoadFailed(format!("service answered for week {echoed}"));
            self.publish();
            return Ok(FetchCompletion::Discarded);
        }

        let draft = ScheduleDraft::from_payload(&payload);
        tracing::debug!(
            week = %ticket.week,
            slots = draft.slots().len(),
            unpaired = draft.unpaired().len(),
            "Schedule loaded"
        );
        self.editor.replace_published(draft);
        self.load = LoadState::Loaded;
        self.publish();
        Ok(FetchCompletion::Applied)
    }

    async fn run_fetch(&mut self, ticket: FetchTicket) -> ServiceResult<()> {
        let result = self.api.fetch_schedule(ticket.week).await;
        self.complete_fetch(ticket, result)?;
        Ok(())
    }

    /// Fetches the selected week again.
    ///
    /// ## Errors
    /// Returns an error if the fetch fails.
    pub async fn refresh(&mut self) -> ServiceResult<()> {
        let ticket = self.begin_fetch();
        self.run_fetch(ticket).await
    }

    /// Selects the week containing `date` and loads it.
    ///
    /// ## Errors
    /// Returns an error if the fetch fails.
    pub async fn set_week(&mut self, date: NaiveDate) -> ServiceResult<()> {
        let ticket = self.select_week(date);
        self.run_fetch(ticket).await
    }

    /// ## Errors
    /// Returns an error if the fetch fails.
    pub async fn next_week(&mut self) -> ServiceResult<()> {
        self.set_week(shift_weeks(self.week, 1)).await
    }

    /// ## Errors
    /// Returns an error if the fetch fails.
    pub async fn previous_week(&mut self) -> ServiceResult<()> {
        self.set_week(shift_weeks(self.week, -1)).await
    }

    /// Starts editing the loaded schedule.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotLoaded` unless the selected week is loaded.
    pub fn begin_edit(&mut self) -> ServiceResult<()> {
        if self.load != LoadState::Loaded {
            return Err(ServiceError::NotLoaded);
        }
        self.editor.begin_edit();
        self.publish();
        Ok(())
    }

    /// Discards the draft.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotEditing` when not editing.
    pub fn cancel_edit(&mut self) -> ServiceResult<()> {
        self.editor.cancel()?;
        self.publish();
        Ok(())
    }

    /// ## Summary
    /// Sends the draft to the service and reloads the week.
    ///
    /// Once the save is accepted the draft is closed and `Ok` is returned. A
    /// failed reload afterwards only shows up as `LoadState::LoadFailed`.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotEditing` when not editing. When the save
    /// fails the error is returned and the draft stays open for a retry.
    pub async fn commit(&mut self) -> ServiceResult<()> {
        let request = self.editor.commit_request(self.week)?;

        if let Err(err) = self.api.save_schedule(&request).await {
            tracing::error!(week = %self.week, error = %err, "Failed to save schedule");
            return Err(err.into());
        }
        tracing::info!(week = %self.week, slots = request.details.len(), "Schedule saved");

        self.editor.mark_committed();
        self.publish();
        if let Err(err) = self.refresh().await {
            tracing::warn!(week = %self.week, error = %err, "Saved schedule could not be reloaded");
        }
        Ok(())
    }

    /// ## Summary
    /// Asks the service to generate the selected week again, then reloads it.
    ///
    /// A draft in progress is discarded first.
    ///
    /// ## Errors
    /// Returns the service error; nothing is retried.
    pub async fn regenerate(&mut self) -> ServiceResult<()> {
        if self.editor.is_editing() {
            self.editor.cancel()?;
            self.publish();
        }

        if let Err(err) = self.api.regenerate_schedule(self.week).await {
            tracing::error!(week = %self.week, error = %err, "Failed to regenerate schedule");
            return Err(err.into());
        }
        tracing::info!(week = %self.week, "Schedule regenerated");

        self.refresh().await
    }
}
