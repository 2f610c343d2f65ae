//! Editable pairing schedule of one week.
//!
//! ## Module Organization
//!
//! - `draft`: slots, the unpaired pool and the structural moves between them
//! - `editor`: viewing/editing modes and the two-phase drag-and-drop protocol
//! - `wire`: conversion to and from the schedule payloads

pub mod draft;
pub mod editor;
pub mod wire;

pub use draft::{DropOutcome, PairSlot, ScheduleDraft, Side, SlotRef};
pub use editor::{DragSource, PairingEditor, PendingDrag};
