//! `evc-sim` — setup and tick loop of the EV charging simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Order     — shuffle the live agents with the simulation RNG.
//!   ② Step      — advance each agent in that order.  Socket takes and
//!                 releases hit the StationStore immediately, so an agent
//!                 activated later sees what earlier agents did.
//!   ③ Apply     — move agents on the grid; remove agents whose battery ran
//!                 out (reporting them to the observer).
//!   ④ Usage     — every station records its in-use fraction.
//!   ⑤ Top up    — spawn replacements up to the configured population.
//!   ⑥ Snapshot  — every `snapshot_interval_ticks`, hand read-only views to
//!                 the observer.
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`builder`]    | `SimBuilder` — grid, stations, homes/works, population   |
//! | [`sim`]        | `Sim` and its tick loop                                  |
//! | [`observer`]   | `SimObserver` hooks, `NoopObserver`                      |
//! | [`snapshot`]   | `AgentSnapshot`, `StationSnapshot` read views            |
//! | [`stats`]      | `ModelStats` aggregate reporters                         |
//! | [`error`]      | `SimError`, `SimResult<T>`                               |
//!
//! # Cargo features
//!
//! | Feature | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on config, snapshots, stats. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use evc_core::ModelConfig;
//! use evc_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(ModelConfig::default()).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{:?}", sim.stats());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;
pub mod stats;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{AgentSnapshot, StationSnapshot};
pub use stats::ModelStats;
