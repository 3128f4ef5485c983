use std::sync::mpsc::channel;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;

use super::transport::validate_count;
use super::transport::validate_payload;
use super::Count;
use super::DataByRank;
use super::Rank;
use super::SizedCommunicator;
use super::Transport;
use crate::error::BalanceError;
use crate::error::Result;

#[derive(Debug)]
pub(super) enum Payload {
    Count(Count),
    Values(Vec<f64>),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::Count(_) => "a count header",
            Payload::Values(_) => "a payload",
        }
    }
}

/// Transport between ranks living in threads of the same process.
/// Every ordered pair of ranks has its own channel.
pub struct LocalCommunicator {
    senders: DataByRank<Sender<Payload>>,
    receivers: DataByRank<Receiver<Payload>>,
    rank: Rank,
    size: usize,
}

impl LocalCommunicator {
    pub(super) fn new(
        rank: Rank,
        size: usize,
        senders: DataByRank<Sender<Payload>>,
        receivers: DataByRank<Receiver<Payload>>,
    ) -> Self {
        Self {
            senders,
            receivers,
            rank,
            size,
        }
    }

    pub(super) fn send(&mut self, rank: Rank, payload: Payload) -> Result<()> {
        self.check_peer(rank)?;
        let sender = self
            .senders
            .get(&rank)
            .ok_or(BalanceError::Disconnected(rank))?;
        sender
            .send(payload)
            .map_err(|_| BalanceError::Disconnected(rank))
    }

    fn receive(&mut self, rank: Rank) -> Result<Payload> {
        self.check_peer(rank)?;
        let receiver = self
            .receivers
            .get(&rank)
            .ok_or(BalanceError::Disconnected(rank))?;
        receiver.recv().map_err(|_| BalanceError::Disconnected(rank))
    }
}

pub fn get_local_communicators(num_ranks: usize) -> DataByRank<LocalCommunicator> {
    let mut senders: Vec<DataByRank<Sender<Payload>>> =
        (0..num_ranks).map(|_| DataByRank::empty()).collect();
    let mut receivers: Vec<DataByRank<Receiver<Payload>>> =
        (0..num_ranks).map(|_| DataByRank::empty()).collect();
    for source in 0..num_ranks {
        for destination in 0..num_ranks {
            if source == destination {
                continue;
            }
            let (sender, receiver) = channel();
            senders[source].insert(destination as Rank, sender);
            receivers[destination].insert(source as Rank, receiver);
        }
    }
    senders
        .into_iter()
        .zip(receivers)
        .enumerate()
        .map(|(rank, (senders, receivers))| {
            (
                rank as Rank,
                LocalCommunicator::new(rank as Rank, num_ranks, senders, receivers),
            )
        })
        .collect()
}

impl Transport for LocalCommunicator {
    fn send_count(&mut self, rank: Rank, count: usize) -> Result<()> {
        self.send(rank, Payload::Count(count as Count))
    }

    fn receive_count(&mut self, rank: Rank) -> Result<usize> {
        match self.receive(rank)? {
            Payload::Count(count) => validate_count(rank, count),
            other => Err(BalanceError::UnexpectedMessage {
                rank,
                expected: "a count header",
                received: other.kind(),
            }),
        }
    }

    fn send_values(&mut self, rank: Rank, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        self.send(rank, Payload::Values(values.to_vec()))
    }

    fn receive_values(&mut self, rank: Rank, count: usize) -> Result<Vec<f64>> {
        if count == 0 {
            return Ok(vec![]);
        }
        match self.receive(rank)? {
            Payload::Values(values) => validate_payload(rank, count, values),
            other => Err(BalanceError::UnexpectedMessage {
                rank,
                expected: "a payload",
                received: other.kind(),
            }),
        }
    }
}

impl SizedCommunicator for LocalCommunicator {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::get_local_communicators;
    use super::Payload;
    use crate::communication::SizedCommunicator;
    use crate::communication::Transport;
    use crate::error::BalanceError;

    #[test]
    fn send_receive_vec() {
        let mut communicators = get_local_communicators(2);
        let mut communicator0 = communicators.remove(&0).unwrap();
        let mut communicator1 = communicators.remove(&1).unwrap();
        let thread = thread::spawn(move || {
            let received = communicator1.receive_vec(0).unwrap();
            assert_eq!(received, vec![1.0, 2.0, 3.0]);
            communicator1.send_vec(0, &[3.0, 2.0, 1.0]).unwrap();
        });
        communicator0.send_vec(1, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(communicator0.receive_vec(1).unwrap(), vec![3.0, 2.0, 1.0]);
        thread.join().unwrap();
    }

    #[test]
    fn empty_vec_only_sends_header() {
        let mut communicators = get_local_communicators(2);
        let mut communicator0 = communicators.remove(&0).unwrap();
        let mut communicator1 = communicators.remove(&1).unwrap();
        communicator0.send_vec(1, &[]).unwrap();
        communicator0.send_vec(1, &[5.0]).unwrap();
        assert_eq!(communicator1.receive_vec(0).unwrap(), Vec::<f64>::new());
        assert_eq!(communicator1.receive_vec(0).unwrap(), vec![5.0]);
    }

    #[test]
    fn messages_between_a_pair_are_fifo() {
        let mut communicators = get_local_communicators(3);
        let mut communicator0 = communicators.remove(&0).unwrap();
        let mut communicator1 = communicators.remove(&1).unwrap();
        let mut communicator2 = communicators.remove(&2).unwrap();
        for i in 0..10 {
            communicator2.send_vec(0, &[i as f64]).unwrap();
            communicator1.send_vec(0, &[-i as f64]).unwrap();
        }
        for i in 0..10 {
            assert_eq!(communicator0.receive_vec(1).unwrap(), vec![-i as f64]);
        }
        for i in 0..10 {
            assert_eq!(communicator0.receive_vec(2).unwrap(), vec![i as f64]);
        }
    }

    #[test]
    fn negative_count_header_is_a_protocol_violation() {
        let mut communicators = get_local_communicators(2);
        let mut communicator0 = communicators.remove(&0).unwrap();
        let mut communicator1 = communicators.remove(&1).unwrap();
        communicator1.send(0, Payload::Count(-3)).unwrap();
        let err = communicator0.receive_vec(1).unwrap_err();
        assert!(err.is_protocol_violation());
        assert!(matches!(
            err,
            BalanceError::NegativeCount { rank: 1, count: -3 }
        ));
    }

    #[test]
    fn mismatched_payload_is_a_protocol_violation() {
        let mut communicators = get_local_communicators(2);
        let mut communicator0 = communicators.remove(&0).unwrap();
        let mut communicator1 = communicators.remove(&1).unwrap();
        communicator1.send_count(0, 3).unwrap();
        communicator1.send_values(0, &[1.0, 2.0]).unwrap();
        assert!(matches!(
            communicator0.receive_vec(1),
            Err(BalanceError::CountMismatch {
                rank: 1,
                expected: 3,
                received: 2
            })
        ));
    }

    #[test]
    fn payload_instead_of_header_is_a_protocol_violation() {
        let mut communicators = get_local_communicators(2);
        let mut communicator0 = communicators.remove(&0).unwrap();
        let mut communicator1 = communicators.remove(&1).unwrap();
        communicator1.send_values(0, &[1.0]).unwrap();
        let err = communicator0.receive_count(1).unwrap_err();
        assert!(err.is_protocol_violation());
    }

    #[test]
    fn out_of_range_ranks_are_rejected() {
        let mut communicators = get_local_communicators(2);
        let mut communicator0 = communicators.remove(&0).unwrap();
        for rank in [-1, 0, 2] {
            let err = communicator0.send_count(rank, 1).unwrap_err();
            assert!(err.is_protocol_violation());
            let err = communicator0.receive_count(rank).unwrap_err();
            assert!(err.is_protocol_violation());
        }
    }

    #[test]
    fn dropped_peer_disconnects() {
        let mut communicators = get_local_communicators(2);
        let mut communicator0 = communicators.remove(&0).unwrap();
        drop(communicators);
        assert!(matches!(
            communicator0.receive_count(1),
            Err(BalanceError::Disconnected(1))
        ));
        assert!(matches!(
            communicator0.send_count(1, 0),
            Err(BalanceError::Disconnected(1))
        ));
    }

    #[test]
    fn communicators_know_their_place() {
        let communicators = get_local_communicators(4);
        assert_eq!(communicators.len(), 4);
        for (rank, communicator) in communicators.into_sorted() {
            assert_eq!(communicator.rank(), rank);
            assert_eq!(communicator.size(), 4);
            assert_eq!(communicator.worker_ranks().collect::<Vec<_>>(), vec![1, 2, 3]);
            assert_eq!(communicator.num_workers(), 3);
        }
    }
}
