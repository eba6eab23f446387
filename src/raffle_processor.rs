use log::{debug, info};

use crate::raffle_error::RaffleError;
use crate::raffle_instruction::RaffleInstruction;
use crate::raffle_state::{Participant, Raffle, RaffleConfig, RaffleStatus, Ticket};
use crate::rewards::{self, TierResult};
use crate::ticket_generator::TicketGenerator;

/// A successful purchase, copied out of the ledger for display
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub participant: Participant,
    pub ticket_count: usize,
}

/// Result of settling a draw, copied out of the ledger for display
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub winning_ticket: Ticket,
    /// One entry per tier, lowest match count first
    pub tiers: Vec<TierResult>,
    /// Total taken out of the pot
    pub total_paid: f64,
    /// Pot left for the next draw
    pub remaining_pot: f64,
}

/// What an instruction produced
#[derive(Debug, Clone, PartialEq)]
pub enum RaffleOutcome {
    /// Pot size after opening
    DrawStarted { pot_size: f64 },
    Purchased(Purchase),
    Settled(Settlement),
}

/// Owns the raffle ledger and the ticket generator, and applies operations to them
#[derive(Debug)]
pub struct Processor {
    generator: TicketGenerator,
    raffle: Raffle,
}

impl Processor {
    /// Fresh ledger with an empty pot
    pub fn new(generator: TicketGenerator) -> Self {
        Self::with_raffle(generator, Raffle::new())
    }

    /// Resume from existing ledger data
    pub fn with_raffle(generator: TicketGenerator, raffle: Raffle) -> Self {
        Self { generator, raffle }
    }

    pub fn raffle(&self) -> &Raffle {
        &self.raffle
    }

    fn config(&self) -> &RaffleConfig {
        self.generator.config()
    }

    /// Dispatch a parsed instruction
    pub fn process(&mut self, instruction: RaffleInstruction) -> Result<RaffleOutcome, RaffleError> {
        info!("Instruction: {}", instruction.label());

        match instruction {
            RaffleInstruction::StartDraw => Ok(RaffleOutcome::DrawStarted {
                pot_size: self.open_draw(),
            }),
            RaffleInstruction::BuyTickets { name, ticket_count } => self
                .process_buy_tickets(name, ticket_count)
                .map(RaffleOutcome::Purchased),
            RaffleInstruction::RunRaffle => self.settle_draw().map(RaffleOutcome::Settled),
        }
    }

    /// Open a new draw. Idempotent while a draw is already open.
    ///
    /// Clears the previous draw's participants and winning ticket, then adds
    /// the opening contribution to the pot. Returns the pot size.
    pub fn open_draw(&mut self) -> f64 {
        if self.raffle.is_open() {
            debug!("Draw already open, pot stays at {}", self.raffle.pot_size);
            return self.raffle.pot_size;
        }

        self.raffle.participants.clear();
        self.raffle.winning_ticket = None;
        self.raffle.pot_size += self.config().opening_contribution;
        self.raffle.status = RaffleStatus::Open;

        info!("New draw started, pot = {}", self.raffle.pot_size);
        self.raffle.pot_size
    }

    /// Buy tickets from a raw `<name>,<count>` line.
    /// A closed ledger reports `NotOpen` before the line is looked at.
    pub fn register_purchase(&mut self, input: &str) -> Result<Purchase, RaffleError> {
        if !self.raffle.is_open() {
            return Err(RaffleError::NotOpen.logged());
        }

        match RaffleInstruction::unpack_purchase(input).map_err(RaffleError::logged)? {
            RaffleInstruction::BuyTickets { name, ticket_count } => {
                self.process_buy_tickets(name, ticket_count)
            }
            _ => Err(RaffleError::InvalidInput.logged()),
        }
    }

    fn process_buy_tickets(
        &mut self,
        name: String,
        ticket_count: usize,
    ) -> Result<Purchase, RaffleError> {
        if !self.raffle.is_open() {
            return Err(RaffleError::NotOpen.logged());
        }
        let name = name.trim();
        if name.is_empty()
            || ticket_count == 0
            || ticket_count > self.config().max_tickets_per_purchase
        {
            return Err(RaffleError::InvalidInput.logged());
        }

        let tickets: Vec<Ticket> = (0..ticket_count)
            .map(|_| self.generator.generate())
            .collect();
        let ticket_price = self.config().ticket_price;
        self.raffle.pot_size += ticket_price * ticket_count as f64;

        let participant = Participant::new(name, tickets);
        self.raffle.participants.push(participant.clone());

        info!(
            "{} purchased {} tickets at {} each. Pot: {}",
            participant.name, ticket_count, ticket_price, self.raffle.pot_size
        );
        Ok(Purchase {
            participant,
            ticket_count,
        })
    }

    /// Settle the open draw.
    ///
    /// Tier rewards are fixed from the pot before the winning ticket is
    /// drawn. Only tiers with winners are taken out of the pot. Participants
    /// and the winning ticket stay readable until the next draw opens.
    pub fn settle_draw(&mut self) -> Result<Settlement, RaffleError> {
        if !self.raffle.is_open() {
            return Err(RaffleError::NotOpen.logged());
        }

        let pot_before = self.raffle.pot_size;
        let winning_ticket = self.generator.generate();
        info!("Winning ticket is {}", winning_ticket);

        let tiers = rewards::compute_payouts(
            pot_before,
            &self.raffle.participants,
            &winning_ticket,
            self.generator.config(),
        );
        let total_paid = rewards::total_paid(&tiers);
        for tier in &tiers {
            debug!(
                "Group {}: {} winners sharing {}",
                tier.matches,
                tier.winners.len(),
                tier.tier_amount
            );
        }

        self.raffle.pot_size = pot_before - total_paid;
        self.raffle.winning_ticket = Some(winning_ticket.clone());
        self.raffle.status = RaffleStatus::Settled;

        info!(
            "Draw settled: paid {}, remaining pot {}",
            total_paid, self.raffle.pot_size
        );
        Ok(Settlement {
            winning_ticket,
            tiers,
            total_paid,
            remaining_pot: self.raffle.pot_size,
        })
    }
}
