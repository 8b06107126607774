//! `evc-core` — foundational types for the EV charging simulation.
//!
//! This crate is a dependency of every other `evc-*` crate.  It has no
//! `evc-*` dependencies and few external ones (`rand`, `rand_distr`,
//! `thiserror`, `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StationId`                                |
//! | [`geo`]         | `GridPos`, `Topology`                                 |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`config`]      | `ModelConfig`, `AgentParams`, layout/count enums      |
//! | [`error`]       | `EvError`, `EvResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AgentParams, ModelConfig, NormalParams, StationCount, StationLayout};
pub use error::{EvError, EvResult};
pub use geo::{GridPos, Topology};
pub use ids::{AgentId, StationId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
