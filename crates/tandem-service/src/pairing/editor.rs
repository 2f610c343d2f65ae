//! Viewing/editing state machine over a [`ScheduleDraft`].
//!
//! Drag and drop is two-phase: `begin_drag` records where the agent was picked
//! up, and the next drop resolves that provenance against a target. The
//! pending drag is cleared by every drop, successful or not.

use chrono::NaiveDate;
use tandem_client::wire::SaveSchedulePayload;
use tandem_core::types::AgentName;

use super::draft::{DropOutcome, ScheduleDraft, SlotRef};
use crate::error::{ServiceError, ServiceResult};

/// Where a dragged agent was picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Slot(SlotRef),
    Unpaired,
}

/// A drag that has started but not been dropped yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDrag {
    pub agent: AgentName,
    pub source: DragSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditorMode {
    Viewing,
    Editing {
        draft: ScheduleDraft,
        pending: Option<PendingDrag>,
    },
}

/// Editable schedule of the selected week.
///
/// `published` is the last snapshot received from the service; edits go to a
/// separate draft that is either committed or discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingEditor {
    published: ScheduleDraft,
    mode: EditorMode,
}

impl PairingEditor {
    #[must_use]
    pub const fn new(published: ScheduleDraft) -> Self {
        Self {
            published,
            mode: EditorMode::Viewing,
        }
    }

    /// The last schedule received from the service.
    #[must_use]
    pub const fn published(&self) -> &ScheduleDraft {
        &self.published
    }

    /// What should be displayed: the draft while editing, otherwise the
    /// published schedule.
    #[must_use]
    pub const fn current(&self) -> &ScheduleDraft {
        match &self.mode {
            EditorMode::Editing { draft, .. } => draft,
            EditorMode::Viewing => &self.published,
        }
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Editing { .. })
    }

    #[must_use]
    pub const fn pending_drag(&self) -> Option<&PendingDrag> {
        match &self.mode {
            EditorMode::Editing { pending, .. } => pending.as_ref(),
            EditorMode::Viewing => None,
        }
    }

    /// Starts editing a copy of the published schedule. Already editing is a no-op.
    pub fn begin_edit(&mut self) {
        if self.is_editing() {
            return;
        }
        tracing::debug!("Entering edit mode");
        self.mode = EditorMode::Editing {
            draft: self.published.clone(),
            pending: None,
        };
    }

    /// Discards the draft and returns to viewing the published schedule.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotEditing` when not editing.
    pub fn cancel(&mut self) -> ServiceResult<()> {
        if !self.is_editing() {
            return Err(ServiceError::NotEditing);
        }
        tracing::debug!("Discarding draft");
        self.mode = EditorMode::Viewing;
        Ok(())
    }

    /// Replaces the published schedule, dropping any draft in progress.
    pub fn replace_published(&mut self, published: ScheduleDraft) {
        if self.is_editing() {
            tracing::debug!("Draft discarded by a newer schedule");
        }
        self.published = published;
        self.mode = EditorMode::Viewing;
    }

    fn editing(&mut self) -> ServiceResult<(&mut ScheduleDraft, &mut Option<PendingDrag>)> {
        match &mut self.mode {
            EditorMode::Editing { draft, pending } => Ok((draft, pending)),
            EditorMode::Viewing => Err(ServiceError::NotEditing),
        }
    }

    /// ## Summary
    /// Records that `agent` was picked up from `source`.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotEditing` when not editing, and
    /// `ServiceError::InvalidDragSource` when `agent` is not at `source`.
    pub fn begin_drag(&mut self, agent: AgentName, source: DragSource) -> ServiceResult<()> {
        let (draft, pending) = self.editing()?;

        let present = match source {
            DragSource::Slot(at) => draft.occupant(at) == Some(&agent),
            DragSource::Unpaired => draft.is_unpaired(&agent),
        };
        if !present {
            return Err(ServiceError::InvalidDragSource(format!(
                "{agent} is not at {source:?}"
            )));
        }

        tracing::trace!(%agent, ?source, "Drag started");
        *pending = Some(PendingDrag { agent, source });
        Ok(())
    }

    /// ## Summary
    /// Resolves the pending drag against a slot side.
    ///
    /// From the pool, the dragged agent takes the side and any occupant is
    /// evicted to the pool. From another side, the two sides swap occupants
    /// (an empty target leaves the source empty).
    ///
    /// ## Errors
    /// Returns `ServiceError::NotEditing` when not editing and
    /// `ServiceError::InvalidDropTarget` when `target` does not exist.
    pub fn drop_on_slot(&mut self, target: SlotRef) -> ServiceResult<DropOutcome> {
        let (draft, pending) = self.editing()?;
        let Some(drag) = pending.take() else {
            return Ok(DropOutcome::Unchanged);
        };

        let outcome = match drag.source {
            DragSource::Unpaired => draft.place_from_unpaired(&drag.agent, target)?,
            DragSource::Slot(source) => draft.move_between_slots(source, target)?,
        };
        tracing::trace!(agent = %drag.agent, %target, ?outcome, "Dropped on slot");
        Ok(outcome)
    }

    /// ## Summary
    /// Resolves the pending drag against the unpaired pool.
    ///
    /// A drag that started in the pool, or an agent already listed there,
    /// changes nothing.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotEditing` when not editing.
    pub fn drop_on_unpaired(&mut self) -> ServiceResult<DropOutcome> {
        let (draft, pending) = self.editing()?;
        let Some(drag) = pending.take() else {
            return Ok(DropOutcome::Unchanged);
        };

        let outcome = match drag.source {
            DragSource::Unpaired => DropOutcome::Unchanged,
            DragSource::Slot(source) => draft.vacate_to_unpaired(&drag.agent, source)?,
        };
        tracing::trace!(agent = %drag.agent, ?outcome, "Dropped on unpaired pool");
        Ok(outcome)
    }

    /// Appends an empty slot to the draft and returns its index.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotEditing` when not editing.
    pub fn append_empty_slot(&mut self) -> ServiceResult<usize> {
        let (draft, _) = self.editing()?;
        Ok(draft.append_empty_slot())
    }

    /// The save request for the current draft.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotEditing` when not editing.
    pub fn commit_request(&self, week: NaiveDate) -> ServiceResult<SaveSchedulePayload> {
        match &self.mode {
            EditorMode::Editing { draft, .. } => Ok(draft.to_save_payload(week)),
            EditorMode::Viewing => Err(ServiceError::NotEditing),
        }
    }

    /// Leaves edit mode after the service accepted the draft. The draft
    /// stands in as the published schedule until the next fetch replaces it.
    pub fn mark_committed(&mut self) {
        let mode = std::mem::replace(&mut self.mode, EditorMode::Viewing);
        if let EditorMode::Editing { draft, .. } = mode {
            self.published = draft;
        }
    }
}
