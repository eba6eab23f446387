// Ticket generation from a raffle-owned pseudo-random source
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::raffle_error::RaffleError;
use crate::raffle_state::{RaffleConfig, Ticket};

/// Sequential random source for tickets. Not cryptographically secure.
///
/// Holds the game config it was built with; construction fails for a config
/// whose number range cannot fill a ticket.
#[derive(Debug, Clone)]
pub struct TicketGenerator {
    config: RaffleConfig,
    rng: StdRng,
}

impl TicketGenerator {
    /// Generator seeded from OS entropy
    pub fn from_entropy(config: RaffleConfig) -> Result<Self, RaffleError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic generator; the same seed yields the same ticket sequence
    pub fn from_seed(config: RaffleConfig, seed: u64) -> Result<Self, RaffleError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: RaffleConfig, rng: StdRng) -> Result<Self, RaffleError> {
        config.validate().map_err(RaffleError::logged)?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }

    /// Draw `numbers_per_ticket` distinct numbers from `1..=max_number`,
    /// rejecting repeats, in the order they were drawn.
    pub fn generate(&mut self) -> Ticket {
        let max_number = self.config.max_number;
        let mut used = vec![false; max_number as usize + 1];
        let mut numbers = Vec::with_capacity(self.config.numbers_per_ticket);

        while numbers.len() < self.config.numbers_per_ticket {
            let n: u8 = self.rng.gen_range(1..=max_number);
            if !used[n as usize] {
                used[n as usize] = true;
                numbers.push(n);
            }
        }

        let ticket = Ticket::new(numbers);
        debug!("Generated ticket: {}", ticket);
        ticket
    }
}
