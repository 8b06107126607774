//! `evc-agent` — the EV agent decision engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`state`]     | `AgentState`, `Target`                                     |
//! | [`agent`]     | `EvAgent` — battery, routine, memory, held socket          |
//! | [`factory`]   | `AgentFactory` — randomized agent construction             |
//! | [`step`]      | `StepContext`, `StepOutcome`, the per-tick state machine   |
//! | [`target`]    | Station selection, routine targets, shopping destinations  |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                             |
//!
//! # One tick of one agent
//!
//! 1. A dwelling agent (home, work, shop) counts down its dwell and does
//!    nothing else.  When the dwell ends it heads for the next routine stop:
//!    home → work → shop → home.
//! 2. A charging agent gains `charge_speed` and, once the minimum charge time
//!    has passed and the battery is full, gives its socket back and resumes
//!    the routine it interrupted.
//! 3. Below its look-for-station threshold the agent draws a strategy and
//!    picks a remembered station (or a random cell to explore).
//! 4. On reaching its target the agent starts dwelling, tries to plug in,
//!    or re-targets.
//! 5. Unless it stopped, it scans the stations within its vision radius,
//!    writes what it sees to memory, and takes one step, paying for it in
//!    battery.
//!
//! Agents never touch the grid; the step returns a [`StepOutcome`] and the
//! simulation applies the move (or the removal) afterwards.

pub mod agent;
pub mod error;
pub mod factory;
pub mod state;
pub mod step;
pub mod target;


pub use agent::EvAgent;
pub use error::{AgentError, AgentResult};
pub use factory::AgentFactory;
pub use state::{AgentState, Target};
pub use step::{StepContext, StepOutcome};
pub use target::DISTANCE_HORIZON;
