use crate::raffle_error::RaffleError;

#[derive(Clone, Debug, PartialEq)]
pub enum RaffleInstruction {
    /// Open a new draw, adding the opening contribution to the pot.
    /// No-op while a draw is already open.
    StartDraw,

    /// Buy tickets for the open draw
    BuyTickets {
        /// Buyer name, trimmed and non-empty
        name: String,
        /// Number of tickets to generate, at least one
        ticket_count: usize,
    },

    /// Settle the open draw: draw a winning ticket and pay out each tier
    RunRaffle,
}

impl RaffleInstruction {
    /// Unpacks a purchase line of the form `<name>,<count>`
    pub fn unpack_purchase(input: &str) -> Result<Self, RaffleError> {
        let mut parts = input.split(',');
        let (name, count) = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(count), None) => (name.trim(), count.trim()),
            _ => return Err(RaffleError::InvalidInput),
        };

        if name.is_empty() {
            return Err(RaffleError::InvalidInput);
        }

        let ticket_count = count
            .parse::<usize>()
            .map_err(|_| RaffleError::InvalidInput)?;
        if ticket_count == 0 {
            return Err(RaffleError::InvalidInput);
        }

        Ok(Self::BuyTickets {
            name: name.to_string(),
            ticket_count,
        })
    }

    /// Display name used when logging the instruction
    pub fn label(&self) -> &'static str {
        match self {
            Self::StartDraw => "Start Draw",
            Self::BuyTickets { .. } => "Buy Tickets",
            Self::RunRaffle => "Run Raffle",
        }
    }
}
