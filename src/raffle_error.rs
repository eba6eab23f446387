use log::warn;
use thiserror::Error;

/// Errors that may be returned by the raffle ledger
#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum RaffleError {
    /// Purchase line was not `<name>,<count>` with a positive count
    #[error("Invalid input format. Please enter name and number of tickets.")]
    InvalidInput,

    /// Purchase or settlement attempted while no draw is open
    #[error("Draw has not started")]
    NotOpen,

    /// Game constants the ticket generator or reward engine cannot work with
    #[error("Invalid raffle configuration: {0}")]
    InvalidConfig(&'static str),
}

impl RaffleError {
    /// Log the error at warn level and hand it back, for use in `map_err`/`Err(..)` chains
    pub fn logged(self) -> Self {
        warn!("{}", self);
        self
    }
}
