// Raffle Simulator - interactive menu
use std::env;
use std::error::Error;
use std::io::{self, BufRead, Write};

use log::{info, warn};

use raffle_sim::rewards::TierResult;
use raffle_sim::utils::{format_amount, plural, status_line};
use raffle_sim::{
    Processor, Purchase, RaffleConfig, RaffleInstruction, RaffleOutcome, Settlement,
    TicketGenerator,
};

const TIER_TITLES: [&str; 4] = [
    "Group 2 Winners",
    "Group 3 Winners",
    "Group 4 Winners",
    "Group 5 Winners (Jackpot)",
];

#[derive(Clone, Copy)]
enum MenuChoice {
    StartDraw,
    BuyTickets,
    RunRaffle,
    Quit,
    Invalid,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = RaffleConfig::default();
    let generator = match env::var("RAFFLE_SEED") {
        Ok(seed) => {
            let seed: u64 = seed.trim().parse()?;
            info!("Using fixed ticket seed {}", seed);
            TicketGenerator::from_seed(config, seed)?
        }
        Err(_) => TicketGenerator::from_entropy(config)?,
    };
    let mut processor = Processor::new(generator);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    loop {
        clear_screen(&mut out)?;
        writeln!(out, "Welcome to My Raffle App")?;
        writeln!(out, "Status: {}\n", status_line(processor.raffle()))?;
        writeln!(out, "[1] Start a New Draw")?;
        writeln!(out, "[2] Buy Tickets")?;
        writeln!(out, "[3] Run Raffle")?;
        writeln!(out)?;

        let Some(line) = prompt(&mut input, &mut out, "Enter your choice: ")? else {
            break;
        };

        let choice = parse_choice(&line);
        match choice {
            MenuChoice::Quit => break,
            MenuChoice::Invalid => {
                writeln!(out, "Invalid choice. Please enter 1, 2, or 3.")?;
                if !pause(&mut input, &mut out)? {
                    break;
                }
                continue;
            }
            _ => clear_screen(&mut out)?,
        }

        match choice {
            MenuChoice::StartDraw => {
                if let Ok(RaffleOutcome::DrawStarted { pot_size }) =
                    processor.process(RaffleInstruction::StartDraw)
                {
                    writeln!(
                        out,
                        "New Raffle draw has been started. Initial pot size: ${}",
                        format_amount(pot_size)
                    )?;
                }
            }
            MenuChoice::BuyTickets => {
                if let Some(line) = prompt(
                    &mut input,
                    &mut out,
                    "Enter your name, number of tickets to purchase (e.g., James,1): ",
                )? {
                    match processor.register_purchase(&line) {
                        Ok(purchase) => show_purchase(&mut out, &purchase)?,
                        Err(e) => writeln!(out, "{}", e)?,
                    }
                }
            }
            MenuChoice::RunRaffle => match processor.process(RaffleInstruction::RunRaffle) {
                Ok(RaffleOutcome::Settled(settlement)) => show_settlement(&mut out, &settlement)?,
                Ok(other) => warn!("Unexpected outcome {:?}", other),
                Err(e) => writeln!(out, "{}", e)?,
            },
            MenuChoice::Quit | MenuChoice::Invalid => {}
        }

        if !pause(&mut input, &mut out)? {
            break;
        }
    }

    Ok(())
}

fn parse_choice(line: &str) -> MenuChoice {
    match line.trim() {
        "1" => MenuChoice::StartDraw,
        "2" => MenuChoice::BuyTickets,
        "3" => MenuChoice::RunRaffle,
        "q" | "Q" => MenuChoice::Quit,
        _ => MenuChoice::Invalid,
    }
}

fn show_purchase(out: &mut impl Write, purchase: &Purchase) -> io::Result<()> {
    writeln!(
        out,
        "Hi {}, you have purchased {} ticket{}",
        purchase.participant.name,
        purchase.ticket_count,
        plural(purchase.ticket_count)
    )?;
    for (i, ticket) in purchase.participant.tickets.iter().enumerate() {
        writeln!(out, "Ticket {}: {}", i + 1, ticket)?;
    }
    writeln!(out)
}

fn show_settlement(out: &mut impl Write, settlement: &Settlement) -> io::Result<()> {
    writeln!(out, "Running Raffle..")?;
    writeln!(out, "Winning Ticket is {}", settlement.winning_ticket)?;
    for (title, tier) in TIER_TITLES.iter().zip(&settlement.tiers) {
        show_tier(out, title, tier)?;
    }
    writeln!(
        out,
        "Remaining pot: ${}",
        format_amount(settlement.remaining_pot)
    )
}

fn show_tier(out: &mut impl Write, title: &str, tier: &TierResult) -> io::Result<()> {
    writeln!(out, "{}:", title)?;
    match tier.reward_per_winner() {
        None => writeln!(out, "Nil")?,
        Some(reward) => {
            for winner in &tier.winners {
                let count = winner.tickets.len();
                writeln!(
                    out,
                    "{} with {} ticket{} - ${}",
                    winner.name,
                    count,
                    plural(count),
                    format_amount(reward)
                )?;
            }
        }
    }
    writeln!(out)
}

/// Print `message` and read one line; `None` at end of input
fn prompt(input: &mut impl BufRead, out: &mut impl Write, message: &str) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Wait for Enter; false at end of input
fn pause(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    Ok(prompt(input, out, "Press Enter to return to the main menu")?.is_some())
}

fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\x1B[2J\x1B[1;1H")?;
    out.flush()
}
