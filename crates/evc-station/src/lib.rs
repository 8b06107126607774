//! `evc-station` — the charging-station resource model.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`station`]  | `ChargeStation` (sockets, usage window), `UsageWindow`      |
//! | [`store`]    | `StationStore`, `SocketHandle` (scoped socket ownership)    |
//! | [`error`]    | `StationError`, `StationResult<T>`                          |
//!
//! # Contention
//!
//! [`StationStore::try_occupy`] is the only way to take a socket, and it
//! mutates the store immediately.  The tick loop activates agents one at a
//! time, so an agent activated later in a tick always sees the sockets taken
//! by agents activated earlier — activation order is the tie-break.

pub mod error;
pub mod station;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{StationError, StationResult};
pub use station::{ChargeStation, UsageWindow};
pub use store::{SocketHandle, StationStore};
