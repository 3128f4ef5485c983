use derive_more::Deref;
use derive_more::DerefMut;

mod data_by_rank;
mod local;
mod local_world_building;
#[cfg(feature = "mpi")]
mod mpi_world;
mod sized_communicator;
mod transport;

pub use data_by_rank::DataByRank;
pub use local::get_local_communicators;
pub use local::LocalCommunicator;
pub use local_world_building::run_on_local_world;
#[cfg(feature = "mpi")]
pub use mpi_world::MpiWorld;
#[cfg(feature = "mpi")]
pub use mpi_world::MPI_UNIVERSE;
pub use sized_communicator::SizedCommunicator;
pub use transport::Transport;

#[cfg(feature = "mpi")]
pub type Rank = mpi::Rank;
#[cfg(not(feature = "mpi"))]
pub type Rank = i32;

/// Wire type of the count headers. Signed, so that a broken peer
/// sending a negative count can be detected instead of silently
/// wrapping around.
pub type Count = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deref, DerefMut, Hash)]
pub struct WorldRank(pub Rank);

impl WorldRank {
    pub fn is_main(&self) -> bool {
        self.0 == Self::main()
    }

    pub fn main() -> Rank {
        0
    }
}

/// The role of a rank in the balancing protocol. Fixed when the
/// world is formed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Identity {
    Coordinator,
    Worker(Rank),
}

impl Identity {
    pub fn of(communicator: &impl SizedCommunicator) -> Self {
        Self::from(WorldRank(communicator.rank()))
    }
}

impl From<WorldRank> for Identity {
    fn from(rank: WorldRank) -> Self {
        if rank.is_main() {
            Identity::Coordinator
        } else {
            Identity::Worker(*rank)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Identity;
    use super::WorldRank;

    #[test]
    fn identity_from_rank() {
        assert_eq!(Identity::from(WorldRank(0)), Identity::Coordinator);
        assert_eq!(Identity::from(WorldRank(3)), Identity::Worker(3));
    }
}
