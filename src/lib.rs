// Raffle Simulator
// A terminal raffle: buy numbered tickets, draw a winner, pay out by match tier

// Core modules
pub mod raffle_error;
pub mod raffle_instruction;
pub mod raffle_processor;
pub mod raffle_state;

// Ticket generation and reward engine
pub mod rewards;
pub mod ticket_generator;

// Display helpers
pub mod utils;

pub use raffle_error::RaffleError;
pub use raffle_instruction::RaffleInstruction;
pub use raffle_processor::{Processor, Purchase, RaffleOutcome, Settlement};
pub use raffle_state::{Participant, Raffle, RaffleConfig, RaffleStatus, Ticket};
pub use ticket_generator::TicketGenerator;
