use std::sync::Arc;
use std::thread;

use log::error;

use super::get_local_communicators;
use super::DataByRank;
use super::LocalCommunicator;
use super::Rank;
use crate::error::BalanceError;
use crate::error::Result;

/// Runs `run_rank` once per rank, each rank on its own thread named
/// `rank-<n>`, connected through local communicators. Blocks until
/// every rank has finished and returns the per-rank results in rank
/// order.
pub fn run_on_local_world<T, F>(num_ranks: usize, run_rank: F) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(LocalCommunicator) -> Result<T> + Send + Sync + 'static,
{
    if num_ranks == 0 {
        return Err(BalanceError::InvalidWorldSize(num_ranks));
    }
    let run_rank = Arc::new(run_rank);
    let mut handles = vec![];
    for (rank, communicator) in get_local_communicators(num_ranks).into_sorted() {
        let run_rank = run_rank.clone();
        let handle = thread::Builder::new()
            .name(format!("rank-{}", rank))
            .spawn(move || run_rank(communicator))
            .map_err(|source| BalanceError::Spawn { rank, source })?;
        handles.push((rank, handle));
    }
    let results: DataByRank<Result<T>> = handles
        .into_iter()
        .map(|(rank, handle)| {
            let result = handle
                .join()
                .unwrap_or(Err(BalanceError::RankPanicked(rank)));
            (rank, result)
        })
        .collect();
    collect_results(results)
}

fn collect_results<T>(results: DataByRank<Result<T>>) -> Result<Vec<T>> {
    let mut values = vec![];
    let mut first_error: Option<(Rank, BalanceError)> = None;
    for (rank, result) in results.into_sorted() {
        match result {
            Ok(value) => values.push(value),
            Err(err) => {
                error!("Rank {} failed: {}", rank, err);
                // A disconnect is the consequence of another rank
                // giving up, so report the root cause instead.
                let replace = match &first_error {
                    None => true,
                    Some((_, BalanceError::Disconnected(_))) => {
                        !matches!(err, BalanceError::Disconnected(_))
                    }
                    Some(_) => false,
                };
                if replace {
                    first_error = Some((rank, err));
                }
            }
        }
    }
    match first_error {
        Some((_, err)) => Err(err),
        None => Ok(values),
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::run_on_local_world;
    use crate::communication::SizedCommunicator;
    use crate::communication::Transport;
    use crate::error::BalanceError;

    #[test]
    fn every_rank_runs_on_its_own_named_thread() {
        let names = run_on_local_world(3, |communicator| {
            let name = thread::current().name().map(|name| name.to_owned());
            Ok((communicator.rank(), name))
        })
        .unwrap();
        assert_eq!(
            names,
            vec![
                (0, Some("rank-0".to_owned())),
                (1, Some("rank-1".to_owned())),
                (2, Some("rank-2".to_owned())),
            ]
        );
    }

    #[test]
    fn empty_world_is_rejected() {
        assert!(matches!(
            run_on_local_world(0, |_| Ok(())),
            Err(BalanceError::InvalidWorldSize(0))
        ));
    }

    #[test]
    fn root_cause_is_reported_instead_of_disconnect() {
        let result = run_on_local_world(2, |mut communicator| {
            if communicator.rank() == 0 {
                communicator.receive_vec(1)?;
                Ok(())
            } else {
                Err(BalanceError::InvalidWorkerCount(0))
            }
        });
        assert!(matches!(result, Err(BalanceError::InvalidWorkerCount(0))));
    }

    #[test]
    fn panicking_rank_is_reported() {
        let result = run_on_local_world(2, |communicator| {
            if communicator.rank() == 1 {
                panic!("rank 1 gives up");
            }
            Ok(())
        });
        assert!(matches!(result, Err(BalanceError::RankPanicked(1))));
    }
}
