use std::collections::HashMap;

use itertools::Itertools;

use crate::model::entity::{Pair, Player};
use crate::model::game::{Game, Schedule};

pub type Score = u64;

/// Opponent meetings per pair in an ideal schedule.
pub const DEFAULT_TARGET: u32 = 2;

/// Odd so that a pair off by two costs eight times a pair off by one.
pub const DISPERSION_EXPONENT: u32 = 3;

/// How often each pair of players faces each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpponentCounts(HashMap<Pair, u32>);

impl OpponentCounts {
    pub fn from_games<'a>(games: impl IntoIterator<Item = &'a Game>) -> OpponentCounts {
        let mut counts = HashMap::new();
        for game in games {
            for pair in game.opponents() {
                *counts.entry(pair).or_insert(0) += 1;
            }
        }
        OpponentCounts(counts)
    }

    pub fn get(&self, a: Player, b: Player) -> u32 {
        Pair::new(a, b).map_or(0, |pair| self.get_pair(&pair))
    }

    pub fn get_pair(&self, pair: &Pair) -> u32 {
        self.0.get(pair).copied().unwrap_or(0)
    }

    /// Meetings of `player` with each of `1..=players`, in order.
    pub fn for_player(&self, player: Player, players: Player) -> Vec<u32> {
        (1..=players).map(|other| self.get(player, other)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pair, u32)> + '_ {
        self.0.iter().map(|(pair, count)| (*pair, *count))
    }

    /// Sum over every pair of `1..=players` of `|count - target|^3`.
    ///
    /// Pairs that never meet count as zero meetings.
    pub fn dispersion(&self, players: Player, target: u32) -> Score {
        (1..=players)
            .tuple_combinations()
            .map(|(a, b)| Score::from(self.get(a, b).abs_diff(target)).pow(DISPERSION_EXPONENT))
            .sum()
    }
}

/// How often each pair of players partners on the same side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartnerCounts(HashMap<Pair, u32>);

impl PartnerCounts {
    pub fn from_games<'a>(games: impl IntoIterator<Item = &'a Game>) -> PartnerCounts {
        let mut counts = HashMap::new();
        for game in games {
            for side in game.sides {
                *counts.entry(side).or_insert(0) += 1;
            }
        }
        PartnerCounts(counts)
    }

    pub fn get_pair(&self, pair: &Pair) -> u32 {
        self.0.get(pair).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pair, u32)> + '_ {
        self.0.iter().map(|(pair, count)| (*pair, *count))
    }

    /// Pairs of `1..=players` that never partner.
    pub fn missing(&self, players: Player) -> Vec<Pair> {
        (1..=players)
            .tuple_combinations()
            .filter_map(|(a, b)| Pair::new(a, b))
            .filter(|pair| self.get_pair(pair) == 0)
            .collect()
    }

    /// Every pair of `1..=players` partners exactly once.
    pub fn is_complete(&self, players: Player) -> bool {
        (1..=players)
            .tuple_combinations()
            .filter_map(|(a, b)| Pair::new(a, b))
            .all(|pair| self.get_pair(&pair) == 1)
    }
}

pub fn opponent_counts(games: &[Game]) -> OpponentCounts {
    OpponentCounts::from_games(games)
}

pub fn dispersion(games: &[Game], players: Player, target: u32) -> Score {
    opponent_counts(games).dispersion(players, target)
}

/// Fewest rounds that can hold every game: one game per two partner pairs,
/// `courts` games per round.
pub fn min_rounds(players: Player, courts: usize) -> usize {
    let players = players as usize;
    let games = players * players.saturating_sub(1) / 4;
    if courts == 0 {
        return games;
    }
    (games + courts - 1) / courts
}

pub fn is_optimal(schedule: &Schedule, dispersion: Score, players: Player, courts: usize) -> bool {
    dispersion == 0 && schedule.len() == min_rounds(players, courts)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::{enumerate_pairs, pack_games};
    use crate::rounds::schedule_rounds;

    fn game(a: u32, b: u32, c: u32, d: u32) -> Game {
        Game::new(Pair::new(a, b).unwrap(), Pair::new(c, d).unwrap()).unwrap()
    }

    #[test]
    fn counts_cross_side_meetings() {
        let games = [game(1, 2, 3, 4), game(1, 3, 2, 4)];
        let counts = opponent_counts(&games);
        assert_eq!(counts.get(1, 4), 2);
        assert_eq!(counts.get(4, 1), 2);
        assert_eq!(counts.get(1, 2), 1);
        assert_eq!(counts.get(1, 1), 0);
        assert_eq!(counts.for_player(1, 4), vec![0, 1, 1, 2]);
    }

    #[test]
    fn dispersion_penalizes_missing_meetings() {
        // 4 players, no games: 6 pairs each off by 2.
        assert_eq!(dispersion(&[], 4, DEFAULT_TARGET), 6 * 8);
        let games = [game(1, 2, 3, 4)];
        // 4 pairs met once (cost 1), 2 partner pairs never met (cost 8).
        assert_eq!(dispersion(&games, 4, DEFAULT_TARGET), 4 + 16);
    }

    #[test]
    fn four_players_disperse_perfectly() {
        let games = pack_games(&enumerate_pairs(4)).unwrap();
        assert_eq!(dispersion(&games, 4, DEFAULT_TARGET), 0);
        let schedule = schedule_rounds(&games, 1);
        assert!(is_optimal(&schedule, 0, 4, 1));
        assert!(!is_optimal(&schedule, 1, 4, 1));
    }

    #[test]
    fn min_rounds_rounds_up() {
        assert_eq!(min_rounds(4, 1), 3);
        assert_eq!(min_rounds(8, 2), 7);
        assert_eq!(min_rounds(9, 2), 9);
        assert_eq!(min_rounds(6, 1), 7);
        assert_eq!(min_rounds(12, 3), 11);
    }

    #[test]
    fn partner_counts_find_missing_pair() {
        let games = pack_games(&enumerate_pairs(6)).unwrap();
        let partners = PartnerCounts::from_games(&games);
        assert!(!partners.is_complete(6));
        assert_eq!(partners.missing(6).len(), 1);
        assert_eq!(partners.iter().map(|(_, count)| count).sum::<u32>(), 14);
    }
}
