use chrono::Utc;
use derive_custom::balance_parameters;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::communication::Rank;
use crate::error::BalanceError;
use crate::error::Result;

#[balance_parameters("contributions")]
pub struct ContributionParameters {
    /// Smallest number of items a worker contributes.
    pub min_items: usize,
    /// Largest number of items a worker contributes (inclusive).
    pub max_items: usize,
    pub min_angle: f64,
    /// Exclusive upper bound of the generated values.
    pub max_angle: f64,
    /// Base seed. Each worker seeds its generator with `seed + rank`.
    /// If not given, the current time is used.
    pub seed: Option<u64>,
}

impl Default for ContributionParameters {
    fn default() -> Self {
        Self {
            min_items: 1,
            max_items: 50,
            min_angle: 0.0,
            max_angle: 360.0,
            seed: None,
        }
    }
}

impl ContributionParameters {
    pub fn validate(&self) -> Result<()> {
        if self.min_items > self.max_items {
            return Err(BalanceError::InvalidParameters(format!(
                "min_items ({}) is larger than max_items ({})",
                self.min_items, self.max_items
            )));
        }
        if !(self.min_angle < self.max_angle) {
            return Err(BalanceError::InvalidParameters(format!(
                "min_angle ({}) must be smaller than max_angle ({})",
                self.min_angle, self.max_angle
            )));
        }
        Ok(())
    }

    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self.clone()
        }
    }

    pub fn base_seed(&self) -> u64 {
        self.seed
            .unwrap_or_else(|| Utc::now().timestamp().unsigned_abs())
    }
}

/// The items a worker generated locally, before any balancing.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkerContribution {
    pub rank: Rank,
    pub values: Vec<f64>,
}

impl WorkerContribution {
    pub fn new(rank: Rank, values: Vec<f64>) -> Self {
        Self { rank, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub struct ContributionGenerator {
    rank: Rank,
    rng: StdRng,
    parameters: ContributionParameters,
}

impl ContributionGenerator {
    pub fn new(parameters: &ContributionParameters, rank: Rank) -> Self {
        let seed = parameters.base_seed().wrapping_add(rank as u64);
        debug!("Seeding contribution generator of rank {} with {}", rank, seed);
        Self {
            rank,
            rng: StdRng::seed_from_u64(seed),
            parameters: parameters.clone(),
        }
    }

    pub fn generate(&mut self) -> WorkerContribution {
        let num_items = self
            .rng
            .gen_range(self.parameters.min_items..=self.parameters.max_items);
        let values = (0..num_items)
            .map(|_| {
                self.rng
                    .gen_range(self.parameters.min_angle..self.parameters.max_angle)
            })
            .collect();
        WorkerContribution::new(self.rank, values)
    }
}
