use log::trace;

use super::Count;
use super::Rank;
use super::SizedCommunicator;
use crate::error::BalanceError;
use crate::error::Result;

/// Blocking point-to-point exchange of count headers and flat `f64`
/// payloads. Messages between a fixed pair of ranks arrive in the
/// order they were sent.
///
/// Empty payloads are never transmitted: `send_values` with an empty
/// slice sends nothing and `receive_values` with a count of zero
/// returns immediately. Both sides of an exchange therefore stay in
/// step as long as they agree on the count header.
pub trait Transport: SizedCommunicator {
    fn send_count(&mut self, rank: Rank, count: usize) -> Result<()>;
    fn receive_count(&mut self, rank: Rank) -> Result<usize>;
    fn send_values(&mut self, rank: Rank, values: &[f64]) -> Result<()>;
    fn receive_values(&mut self, rank: Rank, count: usize) -> Result<Vec<f64>>;

    /// Sends the length of `values` followed by the values themselves.
    fn send_vec(&mut self, rank: Rank, values: &[f64]) -> Result<()> {
        trace!("Sending {} values to rank {}", values.len(), rank);
        self.send_count(rank, values.len())?;
        self.send_values(rank, values)
    }

    fn receive_vec(&mut self, rank: Rank) -> Result<Vec<f64>> {
        let count = self.receive_count(rank)?;
        trace!("Expecting {} values from rank {}", count, rank);
        self.receive_values(rank, count)
    }
}

pub(super) fn validate_count(rank: Rank, count: Count) -> Result<usize> {
    usize::try_from(count).map_err(|_| BalanceError::NegativeCount { rank, count })
}

pub(super) fn validate_payload(rank: Rank, expected: usize, values: Vec<f64>) -> Result<Vec<f64>> {
    if values.len() == expected {
        Ok(values)
    } else {
        Err(BalanceError::CountMismatch {
            rank,
            expected,
            received: values.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::validate_count;
    use super::validate_payload;
    use crate::error::BalanceError;

    #[test]
    fn negative_counts_are_rejected() {
        assert_eq!(validate_count(1, 0).unwrap(), 0);
        assert_eq!(validate_count(1, 17).unwrap(), 17);
        assert!(matches!(
            validate_count(2, -1),
            Err(BalanceError::NegativeCount { rank: 2, count: -1 })
        ));
    }

    #[test]
    fn payload_length_must_match_header() {
        assert_eq!(validate_payload(1, 2, vec![1.0, 2.0]).unwrap(), vec![1.0, 2.0]);
        assert!(matches!(
            validate_payload(1, 3, vec![1.0, 2.0]),
            Err(BalanceError::CountMismatch {
                rank: 1,
                expected: 3,
                received: 2
            })
        ));
    }
}
