use log::debug;
use log::info;

use crate::communication::Rank;
use crate::communication::Transport;
use crate::communication::WorldRank;
use crate::contribution::WorkerContribution;
use crate::error::BalanceError;
use crate::error::Result;
use crate::transform::apply_transform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerReport {
    pub rank: Rank,
    pub contribution_len: usize,
    pub chunk_len: usize,
}

/// Runs on every rank except the main rank: hands in a contribution,
/// receives a chunk of the balanced work, transforms it and sends the
/// result back.
pub struct WorkerAgent<'a, T, F> {
    transport: &'a mut T,
    transform: F,
}

impl<'a, T, F> WorkerAgent<'a, T, F>
where
    T: Transport,
    F: Fn(f64) -> f64,
{
    pub fn new(transport: &'a mut T, transform: F) -> Result<Self> {
        if WorldRank(transport.rank()).is_main() {
            return Err(BalanceError::NotWorker);
        }
        Ok(Self {
            transport,
            transform,
        })
    }

    pub fn run(&mut self, contribution: WorkerContribution) -> Result<WorkerReport> {
        let rank = self.transport.rank();
        let main = WorldRank::main();
        self.transport.send_vec(main, &contribution.values)?;
        let chunk = self.transport.receive_vec(main)?;
        info!("Received vector by worker {} ({})", rank, chunk.len());
        let results = apply_transform(&chunk, &self.transform);
        debug!(
            "{}",
            chunk
                .iter()
                .zip(results.iter())
                .map(|(input, output)| format!("{}->({})", input, output))
                .collect::<Vec<_>>()
                .join(" ")
        );
        self.transport.send_vec(main, &results)?;
        Ok(WorkerReport {
            rank,
            contribution_len: contribution.len(),
            chunk_len: chunk.len(),
        })
    }
}
