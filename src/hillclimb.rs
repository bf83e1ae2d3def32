use rand::Rng;

use crate::action::{Action, ActionError, Position};
use crate::metrics::{self, Score, DEFAULT_TARGET};
use crate::model::entity::Player;
use crate::model::game::{Game, Schedule};
use crate::rounds::schedule_rounds;

/// Iteration budget used when none is given.
pub const DEFAULT_TRIES: usize = 200_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub max_iterations: usize,
    /// Opponent meetings wanted for every pair.
    pub target: u32,
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_TRIES,
            target: DEFAULT_TARGET,
            seed: 0,
        }
    }
}

impl Params {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Draws swaps between two distinct games, each on a uniformly chosen side.
struct SwapGenerator {
    n_games: usize,
}

impl SwapGenerator {
    fn next<R: Rng>(&self, rng: &mut R) -> Action {
        debug_assert!(self.n_games > 1);
        let first = rng.gen_range(0..self.n_games);
        let mut second = rng.gen_range(0..self.n_games - 1);
        if second >= first {
            second += 1;
        }
        Action::Swap(
            Position::new(first, rng.gen_range(0..2)),
            Position::new(second, rng.gen_range(0..2)),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Invalid(ActionError),
    WorseDispersion(Score),
    MoreRounds(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Nothing left to improve; no swap was tried.
    Optimal,
    /// Fewer than two games, so no swap exists.
    Stuck,
    Accepted,
    Rejected(Rejection),
}

/// Result of a hillclimbing run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub schedule: Schedule,
    pub games: Vec<Game>,
    pub dispersion: Score,
    pub iterations: usize,
    pub accepted: usize,
    /// False when the budget ran out first.
    pub optimal: bool,
}

/// Local search over a game list. A swap is kept only when neither the
/// dispersion nor the round count gets worse, so both are non-increasing
/// from one step to the next.
pub struct Hillclimber {
    players: Player,
    courts: usize,
    target: u32,
    games: Vec<Game>,
    schedule: Schedule,
    dispersion: Score,
    iterations: usize,
    accepted: usize,
    swaps: SwapGenerator,
}

impl Hillclimber {
    pub fn new(games: Vec<Game>, players: Player, courts: usize, target: u32) -> Hillclimber {
        let schedule = schedule_rounds(&games, courts);
        let dispersion = metrics::dispersion(&games, players, target);
        let swaps = SwapGenerator { n_games: games.len() };
        Hillclimber {
            players,
            courts,
            target,
            games,
            schedule,
            dispersion,
            iterations: 0,
            accepted: 0,
            swaps,
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
    pub fn dispersion(&self) -> Score {
        self.dispersion
    }
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn is_optimal(&self) -> bool {
        metrics::is_optimal(&self.schedule, self.dispersion, self.players, self.courts)
    }

    /// Tries one random swap, keeping it or undoing it.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Step {
        if self.is_optimal() {
            return Step::Optimal;
        }
        if self.games.len() < 2 {
            return Step::Stuck;
        }
        self.iterations += 1;

        let action = self.swaps.next(rng);
        if let Err(err) = action.apply(&mut self.games) {
            tracing::trace!(?action, %err, "swap rejected");
            return Step::Rejected(Rejection::Invalid(err));
        }

        let dispersion = metrics::dispersion(&self.games, self.players, self.target);
        if dispersion > self.dispersion {
            self.undo(&action);
            return Step::Rejected(Rejection::WorseDispersion(dispersion));
        }
        let schedule = schedule_rounds(&self.games, self.courts);
        if schedule.len() > self.schedule.len() {
            self.undo(&action);
            return Step::Rejected(Rejection::MoreRounds(schedule.len()));
        }

        self.dispersion = dispersion;
        self.schedule = schedule;
        self.accepted += 1;
        tracing::debug!(
            iteration = self.iterations,
            dispersion,
            rounds = self.schedule.len(),
            "swap accepted"
        );
        Step::Accepted
    }

    /// Steps until optimal or `max_iterations` swaps have been tried in total.
    pub fn run<R: Rng>(mut self, max_iterations: usize, rng: &mut R) -> Outcome {
        while self.iterations < max_iterations {
            match self.step(rng) {
                Step::Optimal | Step::Stuck => break,
                Step::Accepted | Step::Rejected(_) => {}
            }
        }
        let optimal = self.is_optimal();
        tracing::info!(
            players = self.players,
            courts = self.courts,
            rounds = self.schedule.len(),
            dispersion = self.dispersion,
            iterations = self.iterations,
            accepted = self.accepted,
            optimal,
            "hillclimb finished"
        );
        Outcome {
            schedule: self.schedule,
            games: self.games,
            dispersion: self.dispersion,
            iterations: self.iterations,
            accepted: self.accepted,
            optimal,
        }
    }

    fn undo(&mut self, action: &Action) {
        // The swap was valid, so reapplying it restores a valid list.
        let undone = action.apply(&mut self.games);
        debug_assert!(undone.is_ok());
    }
}
