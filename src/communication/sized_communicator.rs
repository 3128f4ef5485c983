use super::Rank;
use super::WorldRank;
use crate::error::BalanceError;
use crate::error::Result;

pub trait SizedCommunicator {
    fn size(&self) -> usize;
    fn rank(&self) -> Rank;

    /// All ranks except the main rank, in ascending order.
    fn worker_ranks(&self) -> std::ops::Range<Rank> {
        WorldRank::main() + 1..self.size() as Rank
    }

    fn num_workers(&self) -> usize {
        self.size().saturating_sub(1)
    }

    fn check_peer(&self, rank: Rank) -> Result<()> {
        if rank < 0 || rank as usize >= self.size() || rank == self.rank() {
            Err(BalanceError::RankOutOfRange {
                rank,
                own_rank: self.rank(),
                size: self.size(),
            })
        } else {
            Ok(())
        }
    }
}
