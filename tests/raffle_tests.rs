use raffle_sim::{
    rewards::{self, match_count},
    Participant, Processor, Raffle, RaffleConfig, RaffleError, RaffleStatus, Ticket,
    TicketGenerator,
};

// Setup a processor over existing ledger data
fn setup(seed: u64, raffle: Raffle) -> Processor {
    Processor::with_raffle(generator(seed), raffle)
}

fn generator(seed: u64) -> TicketGenerator {
    TicketGenerator::from_seed(RaffleConfig::default(), seed).unwrap()
}

// Open ledger holding `participants` and `pot_size`
fn open_raffle(pot_size: f64, participants: Vec<Participant>) -> Raffle {
    Raffle {
        status: RaffleStatus::Open,
        pot_size,
        participants,
        winning_ticket: None,
    }
}

// The ticket a fresh generator with `seed` produces after skipping `skip` tickets
fn nth_ticket(seed: u64, skip: usize) -> Ticket {
    let mut generator = generator(seed);
    for _ in 0..skip {
        generator.generate();
    }
    generator.generate()
}

// Numbers 1..=15 that are not on `ticket`
fn complement(ticket: &Ticket) -> Vec<u8> {
    (1..=15u8)
        .filter(|n| !ticket.numbers().contains(n))
        .collect()
}

#[test]
fn test_open_purchase_and_reject_bad_input() {
    let mut processor = setup(1, Raffle::with_pot(100.0));
    assert!(!processor.raffle().is_open());

    assert_eq!(processor.open_draw(), 200.0);
    assert!(processor.raffle().is_open());

    let purchase = processor.register_purchase("John,3").unwrap();
    assert_eq!(purchase.ticket_count, 3);
    assert_eq!(purchase.participant.name, "John");
    assert_eq!(purchase.participant.tickets.len(), 3);
    assert_eq!(processor.raffle().pot_size, 215.0);
    assert_eq!(processor.raffle().tickets_sold(), 3);

    let config = RaffleConfig::default();
    for ticket in &purchase.participant.tickets {
        assert!(ticket.is_well_formed(&config), "bad ticket {}", ticket);
    }

    assert_eq!(
        processor.register_purchase("bad input"),
        Err(RaffleError::InvalidInput)
    );
    assert_eq!(processor.raffle().pot_size, 215.0);
    assert_eq!(processor.raffle().participants.len(), 1);
}

#[test]
fn test_open_draw_is_idempotent() {
    let mut processor = setup(1, Raffle::new());
    assert_eq!(processor.open_draw(), 100.0);
    assert_eq!(processor.open_draw(), 100.0);
    assert_eq!(processor.raffle().pot_size, 100.0);
}

#[test]
fn test_open_draw_keeps_purchases_when_already_open() {
    let mut processor = setup(1, Raffle::new());
    processor.open_draw();
    processor.register_purchase("Ann,1").unwrap();
    processor.open_draw();
    assert_eq!(processor.raffle().participants.len(), 1);
    assert_eq!(processor.raffle().pot_size, 105.0);
}

#[test]
fn test_purchase_rejected_while_closed() {
    let mut processor = setup(1, Raffle::with_pot(110.0));
    assert_eq!(
        processor.register_purchase("Alice,2"),
        Err(RaffleError::NotOpen)
    );
    assert_eq!(processor.raffle().pot_size, 110.0);
    assert!(processor.raffle().participants.is_empty());
}

#[test]
fn test_closed_ledger_reports_not_open_before_parsing() {
    let mut processor = setup(1, Raffle::with_pot(110.0));
    for input in ["bad input", "", "John,0", "John,18446744073709551615"] {
        assert_eq!(
            processor.register_purchase(input),
            Err(RaffleError::NotOpen),
            "wrong error for {:?}",
            input
        );
    }
    assert_eq!(processor.raffle().pot_size, 110.0);
    assert!(processor.raffle().participants.is_empty());
}

#[test]
fn test_purchase_limit() {
    let limit = RaffleConfig::default().max_tickets_per_purchase;
    let mut processor = setup(6, Raffle::new());
    processor.open_draw();

    let purchase = processor
        .register_purchase(&format!("Max,{}", limit))
        .unwrap();
    assert_eq!(purchase.participant.tickets.len(), limit);
    let pot = 100.0 + 5.0 * limit as f64;
    assert_eq!(processor.raffle().pot_size, pot);

    for input in [
        format!("Over,{}", limit + 1),
        "John,1000000000".to_string(),
        "John,18446744073709551615".to_string(),
    ] {
        assert_eq!(
            processor.register_purchase(&input),
            Err(RaffleError::InvalidInput),
            "accepted {:?}",
            input
        );
    }
    assert_eq!(processor.raffle().pot_size, pot);
    assert_eq!(processor.raffle().participants.len(), 1);
}

#[test]
fn test_settle_rejected_while_closed() {
    let mut processor = setup(1, Raffle::with_pot(110.0));
    assert_eq!(processor.settle_draw(), Err(RaffleError::NotOpen));
    assert_eq!(processor.raffle().pot_size, 110.0);
    assert_eq!(processor.raffle().status, RaffleStatus::NotStarted);
    assert!(processor.raffle().winning_ticket.is_none());
}

#[test]
fn test_purchases_are_deterministic_for_a_seed() {
    let mut processor = setup(11, Raffle::new());
    processor.open_draw();
    let ann = processor.register_purchase("Ann,2").unwrap();
    let bob = processor.register_purchase("Bob,1").unwrap();

    assert_eq!(ann.participant.tickets, vec![nth_ticket(11, 0), nth_ticket(11, 1)]);
    assert_eq!(bob.participant.tickets, vec![nth_ticket(11, 2)]);
    assert_eq!(processor.raffle().pot_size, 115.0);

    let settlement = processor.settle_draw().unwrap();
    assert_eq!(settlement.winning_ticket, nth_ticket(11, 3));

    let expected = rewards::compute_payouts(
        115.0,
        &[ann.participant, bob.participant],
        &settlement.winning_ticket,
        &RaffleConfig::default(),
    );
    assert_eq!(settlement.tiers, expected);
    assert_eq!(settlement.remaining_pot, 115.0 - rewards::total_paid(&expected));
    assert_eq!(processor.raffle().pot_size, settlement.remaining_pot);
    assert_eq!(processor.raffle().status, RaffleStatus::Settled);
}

#[test]
fn test_co_winners_split_tier() {
    let seed = 5;
    let winning = nth_ticket(seed, 0);
    let w = winning.numbers();
    let spare = complement(&winning);

    // Both share exactly four numbers with the winning ticket
    let first = Ticket::new(vec![w[0], w[1], w[2], w[3], spare[0]]);
    let second = Ticket::new(vec![w[0], w[1], w[2], w[4], spare[1]]);
    assert_eq!(match_count(&first, &winning), 4);
    assert_eq!(match_count(&second, &winning), 4);

    let participants = vec![
        Participant::new("User4", vec![first]),
        Participant::new("User5", vec![second]),
    ];
    let mut processor = setup(seed, open_raffle(110.0, participants));

    let settlement = processor.settle_draw().unwrap();
    assert_eq!(settlement.winning_ticket, winning);

    let tier4 = &settlement.tiers[2];
    assert_eq!(tier4.matches, 4);
    assert_eq!(tier4.winners.len(), 2);
    assert_eq!(tier4.tier_amount, 27.5);
    assert_eq!(tier4.reward_per_winner(), Some(13.75));

    for index in [0, 1, 3] {
        assert!(!settlement.tiers[index].is_paid());
        assert_eq!(settlement.tiers[index].reward_per_winner(), None);
    }
    assert_eq!(settlement.total_paid, 27.5);
    assert_eq!(settlement.remaining_pot, 82.5);
}

#[test]
fn test_no_winners_keeps_pot() {
    let seed = 8;
    let winning = nth_ticket(seed, 0);
    let spare = complement(&winning);
    let losing = Ticket::new(spare[..5].to_vec());
    let near_miss = Ticket::new(vec![
        winning.numbers()[0],
        spare[5],
        spare[6],
        spare[7],
        spare[8],
    ]);

    let participants = vec![
        Participant::new("User1", vec![losing]),
        Participant::new("User2", vec![near_miss]),
    ];
    let mut processor = setup(seed, open_raffle(110.0, participants));

    let settlement = processor.settle_draw().unwrap();
    assert!(settlement.tiers.iter().all(|tier| !tier.is_paid()));
    assert_eq!(settlement.total_paid, 0.0);
    assert_eq!(settlement.remaining_pot, 110.0);
    assert!(!processor.raffle().is_open());
}

#[test]
fn test_only_first_ticket_counts() {
    let seed = 21;
    let winning = nth_ticket(seed, 0);
    let losing = Ticket::new(complement(&winning)[..5].to_vec());

    let participants = vec![Participant::new("Lucky", vec![losing, winning.clone()])];
    let mut processor = setup(seed, open_raffle(200.0, participants));

    let settlement = processor.settle_draw().unwrap();
    assert_eq!(settlement.winning_ticket, winning);
    assert!(settlement.tiers.iter().all(|tier| !tier.is_paid()));
    assert_eq!(settlement.remaining_pot, 200.0);
}

#[test]
fn test_jackpot_pays_half_the_pot() {
    let seed = 2;
    let winning = nth_ticket(seed, 0);

    let participants = vec![Participant::new("Jack", vec![winning.clone()])];
    let mut processor = setup(seed, open_raffle(200.0, participants));

    let settlement = processor.settle_draw().unwrap();
    let jackpot = &settlement.tiers[3];
    assert_eq!(jackpot.matches, 5);
    assert_eq!(jackpot.reward_per_winner(), Some(100.0));
    assert_eq!(settlement.remaining_pot, 100.0);
}

#[test]
fn test_tiers_are_disjoint_across_many_purchases() {
    let mut processor = setup(99, Raffle::new());
    processor.open_draw();
    for i in 0..40 {
        processor
            .register_purchase(&format!("Player{},{}", i, 1 + i % 3))
            .unwrap();
    }
    let participants = processor.raffle().participants.clone();
    let pot_before = processor.raffle().pot_size;

    let settlement = processor.settle_draw().unwrap();
    let placed: usize = settlement.tiers.iter().map(|t| t.winners.len()).sum();
    let qualifying = participants
        .iter()
        .filter(|p| match_count(&p.tickets[0], &settlement.winning_ticket) >= 2)
        .count();
    assert_eq!(placed, qualifying);

    for tier in &settlement.tiers {
        for winner in &tier.winners {
            assert_eq!(match_count(&winner.tickets[0], &settlement.winning_ticket), tier.matches);
        }
    }
    assert!(settlement.remaining_pot >= 0.0);
    assert!(settlement.remaining_pot <= pot_before);
}

#[test]
fn test_next_draw_starts_clean() {
    let mut processor = setup(4, Raffle::new());
    processor.open_draw();
    processor.register_purchase("Ann,2").unwrap();
    let settlement = processor.settle_draw().unwrap();

    // Results stay readable after settlement
    assert_eq!(processor.raffle().participants.len(), 1);
    assert_eq!(
        processor.raffle().winning_ticket.as_ref(),
        Some(&settlement.winning_ticket)
    );
    assert_eq!(processor.register_purchase("Bob,1"), Err(RaffleError::NotOpen));

    let pot = processor.open_draw();
    assert_eq!(pot, settlement.remaining_pot + 100.0);
    assert!(processor.raffle().participants.is_empty());
    assert!(processor.raffle().winning_ticket.is_none());
}
