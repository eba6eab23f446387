use std::fmt;

use crate::raffle_error::RaffleError;

/// Number of reward tiers paid out at settlement
pub const TIER_COUNT: usize = 4;

/// Fixed game constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaffleConfig {
    /// Added to the pot each time a new draw is opened
    pub opening_contribution: f64,
    /// Added to the pot for every ticket sold
    pub ticket_price: f64,
    /// Distinct numbers on each ticket
    pub numbers_per_ticket: usize,
    /// Highest number that can appear on a ticket (lowest is always 1)
    pub max_number: u8,
    /// Share of the pot for each tier, lowest tier first
    pub tier_shares: [f64; TIER_COUNT],
    /// Most tickets one purchase may buy
    pub max_tickets_per_purchase: usize,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        // Opening contribution: $100
        // Ticket price: $5
        // Tickets: 5 distinct numbers from 1..=15
        // Tiers: 2, 3, 4, 5 matches take 10%, 15%, 25%, 50% of the pot
        // Purchase limit: 5 tickets
        Self {
            opening_contribution: 100.0,
            ticket_price: 5.0,
            numbers_per_ticket: 5,
            max_number: 15,
            tier_shares: [0.10, 0.15, 0.25, 0.50],
            max_tickets_per_purchase: 5,
        }
    }
}

impl RaffleConfig {
    /// Check the constants describe a game that can be played
    pub fn validate(&self) -> Result<(), RaffleError> {
        if self.numbers_per_ticket < TIER_COUNT {
            return Err(RaffleError::InvalidConfig(
                "numbers per ticket must cover every reward tier",
            ));
        }
        if (self.max_number as usize) < self.numbers_per_ticket {
            return Err(RaffleError::InvalidConfig(
                "number range is too small for distinct ticket numbers",
            ));
        }
        if self.max_tickets_per_purchase == 0 {
            return Err(RaffleError::InvalidConfig("purchase limit must allow one ticket"));
        }
        if self.opening_contribution < 0.0 || self.ticket_price < 0.0 {
            return Err(RaffleError::InvalidConfig("amounts cannot be negative"));
        }
        if self.tier_shares.iter().any(|share| !(0.0..=1.0).contains(share)) {
            return Err(RaffleError::InvalidConfig("tier shares must lie within 0..=1"));
        }
        if self.tier_shares.iter().sum::<f64>() > 1.0 + f64::EPSILON {
            return Err(RaffleError::InvalidConfig("tier shares exceed the whole pot"));
        }
        Ok(())
    }

    /// Match count that qualifies for the tier at `index` (0 = lowest tier)
    pub fn tier_matches(&self, index: usize) -> usize {
        self.numbers_per_ticket + 1 - TIER_COUNT + index
    }

    /// Tier index for a match count, or `None` if it wins nothing
    pub fn tier_index(&self, matches: usize) -> Option<usize> {
        let lowest = self.tier_matches(0);
        if matches < lowest || matches > self.numbers_per_ticket {
            return None;
        }
        Some(matches - lowest)
    }
}

/// A raffle ticket: distinct numbers in the order they were drawn
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    numbers: Vec<u8>,
}

impl Ticket {
    pub fn new(numbers: Vec<u8>) -> Self {
        Self { numbers }
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    /// Right length, every number in range, no repeats
    pub fn is_well_formed(&self, config: &RaffleConfig) -> bool {
        let mut seen = vec![false; config.max_number as usize + 1];
        self.numbers.len() == config.numbers_per_ticket
            && self.numbers.iter().all(|&n| {
                let n = n as usize;
                if n == 0 || n >= seen.len() || seen[n] {
                    return false;
                }
                seen[n] = true;
                true
            })
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for n in &self.numbers {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", n)?;
            first = false;
        }
        Ok(())
    }
}

/// One purchase: a buyer and the tickets they bought in that transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Buyer name (not unique across participants)
    pub name: String,
    /// Tickets in purchase order, never empty
    pub tickets: Vec<Ticket>,
}

impl Participant {
    pub fn new(name: impl Into<String>, tickets: Vec<Ticket>) -> Self {
        Self {
            name: name.into(),
            tickets,
        }
    }

    /// The ticket used for tier grouping at settlement
    pub fn first_ticket(&self) -> Option<&Ticket> {
        self.tickets.first()
    }
}

/// Status of the current draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RaffleStatus {
    /// No draw has been opened yet
    #[default]
    NotStarted,
    /// Draw is accepting purchases
    Open,
    /// Last draw has been settled; its results stay readable until the next open
    Settled,
}

impl RaffleStatus {
    pub fn is_open(self) -> bool {
        self == RaffleStatus::Open
    }
}

/// Raffle ledger data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Raffle {
    /// Status of the current draw
    pub status: RaffleStatus,
    /// Money available for payout
    pub pot_size: f64,
    /// Purchases in the current (or just-settled) draw
    pub participants: Vec<Participant>,
    /// Winning ticket of the last settled draw
    pub winning_ticket: Option<Ticket>,
}

impl Raffle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger holding `pot_size` with no draw open
    pub fn with_pot(pot_size: f64) -> Self {
        Self {
            pot_size,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn tickets_sold(&self) -> usize {
        self.participants.iter().map(|p| p.tickets.len()).sum()
    }
}
