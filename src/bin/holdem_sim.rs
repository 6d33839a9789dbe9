use clap::Parser;
use holdem_core::agents::{BotAgent, BotProfile, Difficulty};
use holdem_core::cards::Card;
use holdem_core::config::TableConfig;
use holdem_core::player::Player;
use holdem_core::table::{Table, TableError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(name = "holdem-sim")]
#[command(about = "Play seeded bot-vs-bot Hold'em hands and report the final stacks")]
struct Cli {
    /// Number of seated bots
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Hands to play (stops early once one player holds every chip)
    #[arg(short = 'n', long, default_value_t = 10)]
    hands: u64,

    /// Starting stack for every player
    #[arg(short, long, default_value_t = 1000)]
    stack: u64,

    /// Big blind; the small blind is half of it rounded up
    #[arg(short, long, default_value_t = 5)]
    blind: u64,

    /// Seed for the deck and the bots
    #[arg(long)]
    seed: Option<u64>,

    /// Print every blind, action and payout of each hand
    #[arg(long)]
    history: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<(), TableError> {
    init_logging();
    let cli = Cli::parse();

    let mut config = TableConfig::default()
        .with_starting_stack(cli.stack)
        .with_big_blind(cli.blind)
        .with_max_seats(cli.players.max(2));
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let mut table = Table::new(config)?;

    let tiers = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
    for i in 0..cli.players {
        let mut profile = BotProfile::for_difficulty(tiers[i % tiers.len()]);
        if let Some(seed) = cli.seed {
            profile = profile.with_seed(seed.wrapping_add(i as u64 + 1));
        }
        let agent = Box::new(BotAgent::new(profile));
        table.seat_player(format!("bot{i}"), agent)?;
    }

    for summary in table.play_hands(cli.hands)? {
        let outcome = &summary.outcome;
        println!(
            "hand {:>3}  dealer {}  board {}  ended at {}  winners {:?}",
            summary.hand_number,
            summary.dealer,
            join(&summary.community),
            outcome.ended_at,
            outcome.winners,
        );
        if cli.history {
            for entry in &outcome.history {
                println!("    {entry}");
            }
        }
        for (seat, eval) in &outcome.evaluations {
            let best = join(&eval.best_five);
            println!("    seat {seat}: {} [{best}]", eval.category);
        }
    }

    println!("after {} hands:", table.hands_played());
    for (seat, p) in table.players().iter().enumerate() {
        let kind = table.agent_kind(seat);
        println!("  {:<8} {:>8}  {kind:?}", p.name(), p.chips());
    }
    Ok(())
}
