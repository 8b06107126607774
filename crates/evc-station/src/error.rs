use thiserror::Error;

use evc_core::StationId;

#[derive(Debug, Error)]
pub enum StationError {
    #[error("station {0} does not exist")]
    UnknownStation(StationId),

    /// A socket was released on a station whose sockets were all free.
    /// Always a caller bug; the count is clamped at capacity.
    #[error("station {0} released more sockets than it has")]
    OverRelease(StationId),
}

pub type StationResult<T> = Result<T, StationError>;
