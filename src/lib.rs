//! Round-robin doubles scheduling.
//!
//! Every pair of players partners once and, ideally, faces every other pair
//! of players twice. Games are spread over rounds of at most `courts`
//! concurrent games with no player booked twice in a round.
//!
//! Pipeline:
//! - `pairing`: enumerate partner pairs, pack them into games
//! - `rounds`: first-fit games into rounds
//! - `hillclimb`: swap pairs between games to even out opponent counts
//! - `metrics`: opponent counts and the dispersion score

pub mod action;
pub mod error;
pub mod hillclimb;
pub mod metrics;
pub mod model;
pub mod pairing;
pub mod rounds;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub use error::ScheduleError;
pub use hillclimb::{Hillclimber, Outcome, Params, Step, DEFAULT_TRIES};
pub use metrics::{is_optimal, min_rounds, OpponentCounts, PartnerCounts, Score};
pub use model::entity::{Pair, Player};
pub use model::game::{Game, Round, Schedule};

/// Packs every partner pair of `players` into games, in enumeration order.
pub fn packed_games(players: Player, courts: usize) -> Result<Vec<Game>, ScheduleError> {
    error::check_input(players, courts)?;
    pairing::pack_games(&pairing::enumerate_pairs(players))
}

/// The unoptimized schedule: enumerate, pack, then fit into rounds.
pub fn tournament(players: Player, courts: usize) -> Result<Schedule, ScheduleError> {
    let games = packed_games(players, courts)?;
    let schedule = rounds::schedule_rounds(&games, courts);
    tracing::info!(players, courts, games = games.len(), rounds = schedule.len(), "tournament scheduled");
    Ok(schedule)
}

/// `tournament` followed by up to `tries` hillclimbing swaps seeded by `seed`.
pub fn tournament_optimized(
    players: Player,
    courts: usize,
    tries: usize,
    seed: u64,
) -> Result<Schedule, ScheduleError> {
    let params = Params::default().with_max_iterations(tries).with_seed(seed);
    optimize(players, courts, &params).map(|outcome| outcome.schedule)
}

/// Hillclimbs from the packed games with a generator seeded from `params`.
pub fn optimize(players: Player, courts: usize, params: &Params) -> Result<Outcome, ScheduleError> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    optimize_with_rng(players, courts, params, &mut rng)
}

/// Same as `optimize`, drawing swaps from the caller's generator.
pub fn optimize_with_rng<R: Rng>(
    players: Player,
    courts: usize,
    params: &Params,
    rng: &mut R,
) -> Result<Outcome, ScheduleError> {
    let games = packed_games(players, courts)?;
    let climber = Hillclimber::new(games, players, courts, params.target);
    Ok(climber.run(params.max_iterations, rng))
}
