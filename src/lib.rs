pub mod command_line_options;
pub mod communication;
pub mod contribution;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod parameters;
pub mod repartition;
pub mod run;
pub mod transform;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_utils;

pub mod prelude {
    pub use super::communication::Identity;
    pub use super::communication::Rank;
    pub use super::communication::SizedCommunicator;
    pub use super::communication::Transport;
    pub use super::communication::WorldRank;
    pub use super::contribution::ContributionParameters;
    pub use super::contribution::WorkerContribution;
    pub use super::coordinator::Coordinator;
    pub use super::coordinator::RunSummary;
    pub use super::error::BalanceError;
    pub use super::repartition::compute_chunks;
    pub use super::repartition::Chunk;
    pub use super::run::run_local;
    #[cfg(feature = "mpi")]
    pub use super::run::run_mpi;
    pub use super::transform::TransformKind;
    pub use super::worker::WorkerAgent;
}
