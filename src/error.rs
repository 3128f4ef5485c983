use std::io;
use std::path::PathBuf;

use crate::communication::Count;
use crate::communication::Rank;

#[derive(thiserror::Error, Debug)]
pub enum BalanceError {
    /// A message was addressed to (or expected from) a rank that is
    /// not a peer of this rank.
    #[error("rank {rank} is not a valid peer of rank {own_rank} in a world of size {size}")]
    RankOutOfRange {
        rank: Rank,
        own_rank: Rank,
        size: usize,
    },

    #[error("received negative count header {count} from rank {rank}")]
    NegativeCount { rank: Rank, count: Count },

    /// The payload following a count header did not have the announced length.
    #[error("rank {rank} announced {expected} values but sent {received}")]
    CountMismatch {
        rank: Rank,
        expected: usize,
        received: usize,
    },

    #[error("expected {expected} from rank {rank} but received {received}")]
    UnexpectedMessage {
        rank: Rank,
        expected: &'static str,
        received: &'static str,
    },

    #[error("rank {0} hung up before the exchange was finished")]
    Disconnected(Rank),

    #[error("cannot partition work among {0} workers")]
    InvalidWorkerCount(usize),

    #[error("a world needs at least one rank, got {0}")]
    InvalidWorldSize(usize),

    #[error("rank {0} cannot act as the coordinator")]
    NotCoordinator(Rank),

    #[error("the coordinator rank cannot act as a worker")]
    NotWorker,

    #[error("rank {0} panicked")]
    RankPanicked(Rank),

    #[error("failed to spawn the thread for rank {rank}")]
    Spawn {
        rank: Rank,
        #[source]
        source: io::Error,
    },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("failed to read parameter file at {path:?}")]
    ReadParameterFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse parameter file")]
    ParseParameterFile(#[source] serde_yaml::Error),

    #[error("failed to read parameter file section \"{section}\"")]
    ParseParameterSection {
        section: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to initialize logging")]
    Logger(#[from] log::SetLoggerError),

    #[cfg(feature = "mpi")]
    #[error("MPI is not initialized or was already finalized")]
    MpiUnavailable,
}

impl BalanceError {
    /// Whether the error was caused by a peer breaking the
    /// header/payload protocol.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::RankOutOfRange { .. }
                | Self::NegativeCount { .. }
                | Self::CountMismatch { .. }
                | Self::UnexpectedMessage { .. }
        )
    }
}

pub type Result<T, E = BalanceError> = std::result::Result<T, E>;
