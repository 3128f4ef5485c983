use std::sync::Mutex;

use lazy_static::lazy_static;
use mpi::environment::Universe;
use mpi::point_to_point::Status;
use mpi::topology::SystemCommunicator;
use mpi::traits::Communicator;
use mpi::traits::Destination;
use mpi::traits::Root;
use mpi::traits::Source;
use mpi::Tag;

use super::transport::validate_count;
use super::transport::validate_payload;
use super::Count;
use super::Rank;
use super::SizedCommunicator;
use super::Transport;
use super::WorldRank;
use crate::error::BalanceError;
use crate::error::Result;

/// A wrapper around universe which contains the universe in an
/// Option. This allows calling .drop at program completion so that
/// the Universe is dropped which will call MPI_FINALIZE.  This is
/// necessary because anything in a lazy_static will never be dropped.
pub struct StaticUniverse(Mutex<Option<Universe>>);

impl StaticUniverse {
    pub fn world(&self) -> Result<SystemCommunicator> {
        let universe = self.0.lock().map_err(|_| BalanceError::MpiUnavailable)?;
        universe
            .as_ref()
            .map(|universe| universe.world())
            .ok_or(BalanceError::MpiUnavailable)
    }

    pub fn drop(&self) {
        if let Ok(mut universe) = self.0.lock() {
            let _ = universe.take();
        }
    }
}

lazy_static! {
    pub static ref MPI_UNIVERSE: StaticUniverse = StaticUniverse(Mutex::new(mpi::initialize()));
}

/// Transport between MPI processes. Every message of one world
/// carries the same tag.
#[derive(Clone)]
pub struct MpiWorld {
    world: SystemCommunicator,
    tag: Tag,
}

impl MpiWorld {
    pub fn new(tag: Tag) -> Result<Self> {
        let world = MPI_UNIVERSE.world()?;
        Ok(Self { world, tag })
    }

    /// Overwrites `value` on every rank with the value of the main rank.
    pub fn broadcast_from_main(&self, value: &mut u64) {
        self.world
            .process_at_rank(WorldRank::main())
            .broadcast_into(value);
    }
}

impl Transport for MpiWorld {
    fn send_count(&mut self, rank: Rank, count: usize) -> Result<()> {
        self.check_peer(rank)?;
        let count = count as Count;
        self.world
            .process_at_rank(rank)
            .send_with_tag(&count, self.tag);
        Ok(())
    }

    fn receive_count(&mut self, rank: Rank) -> Result<usize> {
        self.check_peer(rank)?;
        let (count, _): (Count, Status) = self.world.process_at_rank(rank).receive_with_tag(self.tag);
        validate_count(rank, count)
    }

    fn send_values(&mut self, rank: Rank, values: &[f64]) -> Result<()> {
        self.check_peer(rank)?;
        if !values.is_empty() {
            self.world
                .process_at_rank(rank)
                .send_with_tag(values, self.tag);
        }
        Ok(())
    }

    fn receive_values(&mut self, rank: Rank, count: usize) -> Result<Vec<f64>> {
        self.check_peer(rank)?;
        if count == 0 {
            return Ok(vec![]);
        }
        let (values, _): (Vec<f64>, Status) = self
            .world
            .process_at_rank(rank)
            .receive_vec_with_tag(self.tag);
        validate_payload(rank, count, values)
    }
}

impl SizedCommunicator for MpiWorld {
    fn rank(&self) -> Rank {
        self.world.rank()
    }

    fn size(&self) -> usize {
        self.world.size() as usize
    }
}
