//! `evc-mobility` — how an EV moves one cell per tick.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`direction`]   | `Direction` — per-axis sign towards the target        |
//! | [`step`]        | `next_step`, `StepCost`                               |
//!
//! # Movement model
//!
//! An agent moves at most one cell per axis per tick.  The axis with the
//! larger remaining distance always advances; the other advances with
//! probability `short / long`, so over a route the agent traces an
//! approximately straight line instead of an L-shape.  On a toroidal grid
//! "remaining distance" is the wrap-aware delta, so an agent near an edge
//! may cross it.
//!
//! Energy use is the Euclidean length of the step (1 or √2) times a
//! per-step cost per unit drawn uniformly from the configured range.

pub mod direction;
pub mod step;

#[cfg(test)]
mod tests;

pub use direction::Direction;
pub use step::{StepCost, next_step};
