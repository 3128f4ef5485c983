use log::info;

use crate::communication::run_on_local_world;
use crate::communication::Identity;
use crate::communication::Transport;
use crate::contribution::ContributionGenerator;
use crate::contribution::ContributionParameters;
use crate::coordinator::Coordinator;
use crate::coordinator::RunSummary;
use crate::error::BalanceError;
use crate::error::Result;
use crate::worker::WorkerAgent;
use crate::worker::WorkerReport;

#[derive(Clone, Debug, PartialEq)]
pub enum RankOutcome {
    Coordinator(RunSummary),
    Worker(WorkerReport),
}

impl RankOutcome {
    pub fn into_summary(self) -> Option<RunSummary> {
        match self {
            RankOutcome::Coordinator(summary) => Some(summary),
            RankOutcome::Worker(_) => None,
        }
    }
}

/// Plays the part of this rank in one balancing run.
pub fn run_rank<T, F>(
    transport: &mut T,
    parameters: &ContributionParameters,
    transform: F,
) -> Result<RankOutcome>
where
    T: Transport,
    F: Fn(f64) -> f64,
{
    match Identity::of(&*transport) {
        Identity::Coordinator => Ok(RankOutcome::Coordinator(
            Coordinator::new(transport)?.run()?,
        )),
        Identity::Worker(rank) => {
            let contribution = ContributionGenerator::new(parameters, rank).generate();
            let report = WorkerAgent::new(transport, transform)?.run(contribution)?;
            Ok(RankOutcome::Worker(report))
        }
    }
}

/// Runs the balancing with `num_ranks` ranks as threads of this
/// process. Returns what the coordinator collected.
pub fn run_local<F>(
    num_ranks: usize,
    parameters: &ContributionParameters,
    transform: F,
) -> Result<RunSummary>
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    parameters.validate()?;
    let parameters = parameters.with_seed(parameters.base_seed());
    info!(
        "Running {} local ranks with base seed {}",
        num_ranks,
        parameters.base_seed()
    );
    let outcomes = run_on_local_world(num_ranks, move |mut communicator| {
        run_rank(&mut communicator, &parameters, &transform)
    })?;
    outcomes
        .into_iter()
        .find_map(RankOutcome::into_summary)
        .ok_or(BalanceError::InvalidWorldSize(num_ranks))
}

/// Runs this process's rank of an MPI world. Only the main rank
/// returns a summary.
#[cfg(feature = "mpi")]
pub fn run_mpi<F>(parameters: &ContributionParameters, transform: F) -> Result<Option<RunSummary>>
where
    F: Fn(f64) -> f64,
{
    use crate::communication::MpiWorld;
    use crate::communication::SizedCommunicator;
    use crate::communication::WorldRank;

    parameters.validate()?;
    let mut world = MpiWorld::new(0)?;
    let mut seed = parameters.base_seed();
    world.broadcast_from_main(&mut seed);
    if WorldRank(world.rank()).is_main() {
        info!("Running {} MPI ranks with base seed {}", world.size(), seed);
    }
    let parameters = parameters.with_seed(seed);
    Ok(run_rank(&mut world, &parameters, transform)?.into_summary())
}
