//! doubles-schedule CLI
//!
//! Prints a round-robin doubles schedule for a number of players and courts.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use doubles_schedule::{metrics, optimize, tournament, Params, DEFAULT_TRIES};

#[derive(Parser)]
#[command(name = "doubles-schedule")]
#[command(about = "Round-robin doubles pairing scheduler")]
struct Cli {
    /// Number of players, numbered from 1
    #[arg(long, short)]
    players: u32,
    /// Games played at the same time
    #[arg(long, short, default_value = "1")]
    courts: usize,
    /// Hillclimbing iterations
    #[arg(long, default_value_t = DEFAULT_TRIES)]
    tries: usize,
    #[arg(long, default_value = "0")]
    seed: u64,
    /// Skip hillclimbing and print the first-fit schedule
    #[arg(long)]
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (schedule, optimal) = if cli.plain {
        let schedule = tournament(cli.players, cli.courts)?;
        let games: Vec<_> = schedule.games().copied().collect();
        let dispersion = metrics::dispersion(&games, cli.players, metrics::DEFAULT_TARGET);
        let optimal = metrics::is_optimal(&schedule, dispersion, cli.players, cli.courts);
        (schedule, optimal)
    } else {
        let params = Params::default().with_max_iterations(cli.tries).with_seed(cli.seed);
        let outcome = optimize(cli.players, cli.courts, &params)?;
        (outcome.schedule, outcome.optimal)
    };

    for (index, round) in schedule.rounds().iter().enumerate() {
        println!("Round {:>2}: {}", index + 1, round);
    }

    let games: Vec<_> = schedule.games().copied().collect();
    let counts = metrics::opponent_counts(&games);
    println!();
    println!("Opponent meetings:");
    for player in 1..=cli.players {
        let row = counts.for_player(player, cli.players);
        let cells: Vec<String> = row.iter().map(|count| format!("{:>2}", count)).collect();
        println!("{:>3} |{}", player, cells.join(""));
    }
    println!();
    println!(
        "{} rounds (minimum {}), dispersion {}, {}",
        schedule.len(),
        metrics::min_rounds(cli.players, cli.courts),
        metrics::dispersion(&games, cli.players, metrics::DEFAULT_TARGET),
        if optimal { "optimal" } else { "best found" },
    );

    Ok(())
}
