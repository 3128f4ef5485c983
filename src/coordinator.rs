use log::debug;
use log::info;

use crate::communication::Rank;
use crate::communication::Transport;
use crate::communication::WorldRank;
use crate::error::BalanceError;
use crate::error::Result;
use crate::repartition::compute_chunks;
use crate::repartition::Chunk;

/// What the coordinator saw during one balancing run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// All contributions, concatenated in ascending rank order.
    pub combined: Vec<f64>,
    /// The chunk each worker received, in ascending rank order.
    pub chunks: Vec<Chunk>,
    /// The transformed chunks, concatenated in ascending rank order.
    pub results: Vec<f64>,
}

impl RunSummary {
    pub fn chunk_lengths(&self) -> Vec<usize> {
        self.chunks.iter().map(|chunk| chunk.len).collect()
    }
}

/// Runs on the main rank. Collects the contributions of all workers,
/// splits them evenly, hands the chunks back out and collects the
/// results. All exchanges with the workers happen one rank after the
/// other in ascending order.
pub struct Coordinator<'a, T> {
    transport: &'a mut T,
}

impl<'a, T: Transport> Coordinator<'a, T> {
    pub fn new(transport: &'a mut T) -> Result<Self> {
        let rank = transport.rank();
        if !WorldRank(rank).is_main() {
            return Err(BalanceError::NotCoordinator(rank));
        }
        Ok(Self { transport })
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Number of ranks = {}", self.transport.size());
        let combined = self.gather_contributions()?;
        info!("Master vector ({})", combined.len());
        debug!("Master vector: {:?}", combined);
        let chunks = self.scatter(&combined)?;
        let results = self.gather_results()?;
        info!("Final master vector ({})", results.len());
        debug!("Final master vector: {:?}", results);
        Ok(RunSummary {
            combined,
            chunks,
            results,
        })
    }

    pub fn gather_contributions(&mut self) -> Result<Vec<f64>> {
        self.gather(|rank, values| {
            info!("Received no. of angles = {} from rank {}", values.len(), rank);
            debug!("Received vector from rank {}: {:?}", rank, values);
        })
    }

    /// Splits `combined` among the workers and sends each worker its
    /// chunk. Returns the chunks in the order they were sent.
    pub fn scatter(&mut self, combined: &[f64]) -> Result<Vec<Chunk>> {
        let num_workers = self.transport.num_workers();
        if num_workers == 0 {
            info!("No workers, nothing to scatter");
            return Ok(vec![]);
        }
        let chunks = compute_chunks(combined.len(), num_workers)?;
        for (rank, chunk) in self.transport.worker_ranks().zip(chunks.iter()) {
            debug!("Sending {} angles to rank {}", chunk.len, rank);
            self.transport.send_vec(rank, chunk.slice(combined))?;
        }
        Ok(chunks)
    }

    pub fn gather_results(&mut self) -> Result<Vec<f64>> {
        self.gather(|rank, values| {
            debug!("Received {} results from rank {}", values.len(), rank);
        })
    }

    fn gather(&mut self, mut report: impl FnMut(Rank, &[f64])) -> Result<Vec<f64>> {
        let mut collected = vec![];
        for rank in self.transport.worker_ranks() {
            let values = self.transport.receive_vec(rank)?;
            report(rank, &values);
            collected.extend(values);
        }
        Ok(collected)
    }
}
