//! `evc-memory` — how an agent remembers stations and picks a strategy.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`ring`]       | `OutcomeRing` (fixed 10-slot ring), `Outcome`, decay      |
//! | [`strategy`]   | `Strategy` masks and the cumulative lottery `Cpf`         |
//! | [`sightings`]  | `OffLimits` FIFO and `RecentSightings` anti-thrash window |
//! | [`engine`]     | `MemoryEngine` tying the above together per agent         |
//!
//! # Model
//!
//! Every observation of a station is `+1` (a socket was free) or `-1` (the
//! station was full), stamped with the agent's decay clock `pole_count`,
//! which advances by one per observation.  An entry observed at clock `t`
//! weighs `outcome * 0.98^(now - t)` today.
//!
//! A [`Strategy`] looks at only the most recent 10, 5, 3 or 0 entries of a
//! station's ring.  Each strategy also keeps a synthetic ring of the
//! outcomes it led to; the sums of those rings, shifted by a bias of 10,
//! become the lottery weights of the next strategy draw.

pub mod engine;
pub mod ring;
pub mod sightings;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use engine::{MemoryEngine, StationMemory};
pub use ring::{DECAY_RATE, MEMORY_LEN, Outcome, OutcomeRing, decay_weight};
pub use sightings::{OFF_LIMITS_LEN, OffLimits, RecentSightings, SIGHTING_WINDOW};
pub use strategy::{CPF_BIAS, CPF_EPSILON, Cpf, Strategy};
