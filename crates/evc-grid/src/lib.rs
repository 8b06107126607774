//! `evc-grid` — the spatial container of the simulation.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`world`]      | `GridWorld` (cells, Moore neighbourhoods, wrap geometry)  |
//! | [`occupant`]   | `Occupant` — what can stand in a cell                     |
//! | [`index`]      | `StationIndex` (R-tree over static station positions)     |
//! | [`layout`]     | Station placement modes and home/work cell draws          |
//! | [`error`]      | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod index;
pub mod layout;
pub mod occupant;
pub mod world;


pub use error::{GridError, GridResult};
pub use index::StationIndex;
pub use layout::{distinct_cells, station_positions};
pub use occupant::Occupant;
pub use world::GridWorld;
