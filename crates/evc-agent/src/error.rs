use thiserror::Error;

use evc_core::AgentId;
use evc_station::StationError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {agent} socket bookkeeping failed: {source}")]
    Socket {
        agent:  AgentId,
        #[source]
        source: StationError,
    },
}

pub type AgentResult<T> = Result<T, AgentError>;
