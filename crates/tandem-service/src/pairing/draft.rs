use std::collections::BTreeMap;
use std::fmt;

use tandem_core::types::AgentName;

use crate::error::{ServiceError, ServiceResult};

/// One side of a pair slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// `0` for the first side, `1` for the second.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }
}

/// Address of one slot side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub index: usize,
    pub side: Side,
}

impl SlotRef {
    #[must_use]
    pub const fn new(index: usize, side: Side) -> Self {
        Self { index, side }
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {} side {}", self.index, self.side.index() + 1)
    }
}

/// A pairing unit holding up to two agents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSlot {
    pub agent1: Option<AgentName>,
    pub agent2: Option<AgentName>,
}

impl PairSlot {
    #[must_use]
    pub const fn new(agent1: Option<AgentName>, agent2: Option<AgentName>) -> Self {
        Self { agent1, agent2 }
    }

    #[must_use]
    pub const fn side(&self, side: Side) -> Option<&AgentName> {
        match side {
            Side::First => self.agent1.as_ref(),
            Side::Second => self.agent2.as_ref(),
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Option<AgentName> {
        match side {
            Side::First => &mut self.agent1,
            Side::Second => &mut self.agent2,
        }
    }

    pub fn occupants(&self) -> impl Iterator<Item = &AgentName> {
        self.agent1.iter().chain(self.agent2.iter())
    }
}

/// What a drop did to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// An unpaired agent took an empty slot side.
    Placed,
    /// An unpaired agent took an occupied slot side; its occupant went to the pool.
    Evicted { evicted: AgentName },
    /// Two slot sides exchanged their occupants.
    Swapped { displaced: AgentName },
    /// A slotted agent moved to an empty side, leaving its old side empty.
    Moved,
    /// A slotted agent was sent to the unpaired pool.
    Vacated,
    /// Nothing changed.
    Unchanged,
}

/// The week's pairings: ordered slots plus the unpaired pool.
///
/// Every agent name appears at most once across all slot sides and the pool.
/// The moves below preserve that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDraft {
    slots: Vec<PairSlot>,
    unpaired: Vec<AgentName>,
}

impl ScheduleDraft {
    #[must_use]
    pub const fn new(slots: Vec<PairSlot>, unpaired: Vec<AgentName>) -> Self {
        Self { slots, unpaired }
    }

    #[must_use]
    pub fn slots(&self) -> &[PairSlot] {
        &self.slots
    }

    #[must_use]
    pub fn unpaired(&self) -> &[AgentName] {
        &self.unpaired
    }

    /// Occupant of a slot side; `None` when empty or out of range.
    #[must_use]
    pub fn occupant(&self, at: SlotRef) -> Option<&AgentName> {
        self.slots.get(at.index).and_then(|slot| slot.side(at.side))
    }

    #[must_use]
    pub fn is_unpaired(&self, agent: &AgentName) -> bool {
        self.unpaired.contains(agent)
    }

    /// How many times each agent appears across slots and the pool.
    #[must_use]
    pub fn occurrences(&self) -> BTreeMap<&AgentName, usize> {
        let mut counts = BTreeMap::new();
        for agent in self
            .slots
            .iter()
            .flat_map(PairSlot::occupants)
            .chain(self.unpaired.iter())
        {
            *counts.entry(agent).or_insert(0) += 1;
        }
        counts
    }

    /// Agents appearing more than once; empty when the draft is consistent.
    #[must_use]
    pub fn duplicates(&self) -> Vec<AgentName> {
        self.occurrences()
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(agent, _)| agent.clone())
            .collect()
    }

    /// Number of occupied slot sides.
    #[must_use]
    pub fn occupied_sides(&self) -> usize {
        self.slots.iter().flat_map(PairSlot::occupants).count()
    }

    /// Appends a slot with both sides empty and returns its index.
    pub fn append_empty_slot(&mut self) -> usize {
        self.slots.push(PairSlot::default());
        self.slots.len() - 1
    }

    fn slot_side_mut(&mut self, at: SlotRef) -> ServiceResult<&mut Option<AgentName>> {
        let count = self.slots.len();
        self.slots
            .get_mut(at.index)
            .map(|slot| slot.side_mut(at.side))
            .ok_or_else(|| {
                ServiceError::InvalidDropTarget(format!("{at} (schedule has {count} slots)"))
            })
    }

    /// Moves `agent` from the pool onto `target`, evicting any occupant to the pool.
    pub(crate) fn place_from_unpaired(
        &mut self,
        agent: &AgentName,
        target: SlotRef,
    ) -> ServiceResult<DropOutcome> {
        if self.slot_side_mut(target)?.as_ref() == Some(agent) {
            return Ok(DropOutcome::Unchanged);
        }

        let Some(position) = self.unpaired.iter().position(|entry| entry == agent) else {
            return Err(ServiceError::InvalidDragSource(format!(
                "{agent} is not in the unpaired pool"
            )));
        };
        let dragged = self.unpaired.remove(position);

        let evicted = self.slot_side_mut(target)?.replace(dragged);
        Ok(match evicted {
            Some(evicted) => {
                self.unpaired.push(evicted.clone());
                DropOutcome::Evicted { evicted }
            }
            None => DropOutcome::Placed,
        })
    }

    /// Moves the occupant of `source` onto `target`. The previous occupant of
    /// `target`, if any, takes `source`; otherwise `source` is left empty.
    pub(crate) fn move_between_slots(
        &mut self,
        source: SlotRef,
        target: SlotRef,
    ) -> ServiceResult<DropOutcome> {
        // Validate the target before touching anything
        self.slot_side_mut(target)?;
        if source == target {
            return Ok(DropOutcome::Unchanged);
        }

        let Some(dragged) = self.slot_side_mut(source)?.take() else {
            return Err(ServiceError::InvalidDragSource(format!("{source} is empty")));
        };
        let displaced = self.slot_side_mut(target)?.replace(dragged);
        *self.slot_side_mut(source)? = displaced.clone();

        Ok(match displaced {
            Some(displaced) => DropOutcome::Swapped { displaced },
            None => DropOutcome::Moved,
        })
    }

    /// Clears `source` and appends its occupant to the pool, unless the pool
    /// already lists that agent.
    pub(crate) fn vacate_to_unpaired(
        &mut self,
        agent: &AgentName,
        source: SlotRef,
    ) -> ServiceResult<DropOutcome> {
        if self.is_unpaired(agent) {
            return Ok(DropOutcome::Unchanged);
        }

        let side = self
            .slot_side_mut(source)
            .map_err(|_err| ServiceError::InvalidDragSource(source.to_string()))?;
        if side.as_ref() != Some(agent) {
            return Err(ServiceError::InvalidDragSource(format!(
                "{agent} is not at {source}"
            )));
        }
        *side = None;
        self.unpaired.push(agent.clone());
        Ok(DropOutcome::Vacated)
    }
}
