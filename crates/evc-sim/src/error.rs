use thiserror::Error;

use evc_agent::AgentError;
use evc_core::EvError;
use evc_grid::GridError;
use evc_station::StationError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] EvError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("station error: {0}")]
    Station(#[from] StationError),
}

pub type SimResult<T> = Result<T, SimError>;
