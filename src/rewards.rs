// Reward engine: match counting, tier grouping and payouts
use std::collections::HashMap;

use crate::raffle_state::{Participant, RaffleConfig, Ticket, TIER_COUNT};

/// Count numbers of `ticket` that also appear on `winning`.
///
/// Each number on `winning` can be matched once, so repeated numbers on
/// `ticket` only count as often as they appear on `winning`.
pub fn match_count(ticket: &Ticket, winning: &Ticket) -> usize {
    let mut remaining: HashMap<u8, usize> = HashMap::with_capacity(winning.numbers().len());
    for &n in winning.numbers() {
        *remaining.entry(n).or_default() += 1;
    }

    ticket
        .numbers()
        .iter()
        .filter(|n| match remaining.get_mut(n) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        })
        .count()
}

/// Reward for each tier, lowest tier first, as a share of `pot_size`
pub fn tier_amounts(pot_size: f64, config: &RaffleConfig) -> [f64; TIER_COUNT] {
    config.tier_shares.map(|share| share * pot_size)
}

/// Equal share of a tier's reward, `None` for a tier with no winners
pub fn split_reward(tier_amount: f64, winner_count: usize) -> Option<f64> {
    if winner_count == 0 {
        return None;
    }
    Some(tier_amount / winner_count as f64)
}

/// Bucket participants by how many numbers their first ticket shares with
/// `winning`. Participants below the lowest tier land nowhere.
pub fn group_winners(
    participants: &[Participant],
    winning: &Ticket,
    config: &RaffleConfig,
) -> [Vec<Participant>; TIER_COUNT] {
    let mut groups: [Vec<Participant>; TIER_COUNT] = Default::default();

    for participant in participants {
        let Some(ticket) = participant.first_ticket() else {
            continue;
        };
        if let Some(index) = config.tier_index(match_count(ticket, winning)) {
            groups[index].push(participant.clone());
        }
    }

    groups
}

/// Outcome of one reward tier
#[derive(Debug, Clone, PartialEq)]
pub struct TierResult {
    /// Exact match count for this tier
    pub matches: usize,
    /// Whole tier reward, computed from the pot before payout
    pub tier_amount: f64,
    /// Participants whose first ticket hit `matches` numbers
    pub winners: Vec<Participant>,
}

impl TierResult {
    pub fn is_paid(&self) -> bool {
        !self.winners.is_empty()
    }

    pub fn reward_per_winner(&self) -> Option<f64> {
        split_reward(self.tier_amount, self.winners.len())
    }

    /// Amount leaving the pot for this tier
    pub fn paid_amount(&self) -> f64 {
        if self.is_paid() {
            self.tier_amount
        } else {
            0.0
        }
    }
}

/// Compute every tier's winners and reward for a draw.
/// Only tiers with at least one winner contribute to the total paid out.
pub fn compute_payouts(
    pot_size: f64,
    participants: &[Participant],
    winning: &Ticket,
    config: &RaffleConfig,
) -> Vec<TierResult> {
    let amounts = tier_amounts(pot_size, config);
    let groups = group_winners(participants, winning, config);

    groups
        .into_iter()
        .zip(amounts)
        .enumerate()
        .map(|(index, (winners, tier_amount))| TierResult {
            matches: config.tier_matches(index),
            tier_amount,
            winners,
        })
        .collect()
}

/// Sum of the rewards actually paid
pub fn total_paid(tiers: &[TierResult]) -> f64 {
    tiers.iter().map(TierResult::paid_amount).sum()
}
