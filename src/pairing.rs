use itertools::Itertools;

use crate::action::Index;
use crate::error::ScheduleError;
use crate::model::entity::{Pair, Player};
use crate::model::game::Game;

/// Upper bound on partner scans before packing gives up.
pub const MAX_PACK_ATTEMPTS: usize = 1_000_000;

/// All unordered pairs of players `1..=players`, lexicographic by (low, high).
pub fn enumerate_pairs(players: Player) -> Vec<Pair> {
    (1..=players)
        .tuple_combinations()
        .filter_map(|(a, b)| Pair::new(a, b))
        .collect()
}

pub fn pack_games(pairs: &[Pair]) -> Result<Vec<Game>, ScheduleError> {
    pack_games_with_limit(pairs, MAX_PACK_ATTEMPTS)
}

/// A pair matched with the pair it plays against.
struct Choice {
    first: Index,
    partner: Index,
}

/// Groups `pairs` two at a time into games, using every pair once.
///
/// The first unused pair is matched with the earliest later pair it shares no
/// player with. When the rest cannot be packed, the most recent choice is
/// undone and its scan resumes after the partner it had picked. With an odd
/// number of pairs the last one left over is dropped.
pub fn pack_games_with_limit(pairs: &[Pair], max_attempts: usize) -> Result<Vec<Game>, ScheduleError> {
    let mut used = vec![false; pairs.len()];
    let mut remaining = pairs.len();
    let mut trail: Vec<Choice> = Vec::with_capacity(pairs.len() / 2);
    let mut resume: Option<(Index, Index)> = None;
    let mut attempts = 0;

    loop {
        let (first, start) = match resume.take() {
            Some(point) => point,
            None => {
                if remaining < 2 {
                    break;
                }
                let first = used.iter().position(|u| !u).ok_or(ScheduleError::NoPacking)?;
                (first, first + 1)
            }
        };

        attempts += 1;
        if attempts > max_attempts {
            return Err(ScheduleError::SearchLimit { attempts: max_attempts });
        }

        let partner = (start..pairs.len())
            .find(|&index| !used[index] && !pairs[first].shares_player(&pairs[index]));
        match partner {
            Some(partner) => {
                used[first] = true;
                used[partner] = true;
                remaining -= 2;
                trail.push(Choice { first, partner });
            }
            None => {
                let choice = trail.pop().ok_or(ScheduleError::NoPacking)?;
                used[choice.first] = false;
                used[choice.partner] = false;
                remaining += 2;
                resume = Some((choice.first, choice.partner + 1));
            }
        }
    }

    if let Some(index) = used.iter().position(|u| !u) {
        tracing::debug!(pair = %pairs[index], "odd pair count, pair left without a game");
    }
    tracing::debug!(pairs = pairs.len(), games = trail.len(), attempts, "packed games");

    Ok(trail
        .into_iter()
        .map(|choice| Game { sides: [pairs[choice.first], pairs[choice.partner]] })
        .collect())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::PartnerCounts;

    fn pair(a: u32, b: u32) -> Pair {
        Pair::new(a, b).unwrap()
    }

    #[test]
    fn enumerates_all_pairs_in_order() {
        assert_eq!(
            enumerate_pairs(4),
            vec![pair(1, 2), pair(1, 3), pair(1, 4), pair(2, 3), pair(2, 4), pair(3, 4)]
        );
        assert_eq!(enumerate_pairs(8).len(), 28);
        assert!(enumerate_pairs(1).is_empty());
    }

    #[test]
    fn packs_four_players() {
        let games = pack_games(&enumerate_pairs(4)).unwrap();
        assert_eq!(games, vec![
            Game::new(pair(1, 2), pair(3, 4)).unwrap(),
            Game::new(pair(1, 3), pair(2, 4)).unwrap(),
            Game::new(pair(1, 4), pair(2, 3)).unwrap(),
        ]);
    }

    #[test]
    fn packing_covers_every_partnership() {
        for players in 4..=16 {
            let pairs = enumerate_pairs(players);
            let games = pack_games(&pairs).unwrap();
            assert_eq!(games.len(), pairs.len() / 2);
            assert!(games.iter().all(Game::is_valid));

            let partners = PartnerCounts::from_games(&games);
            let missing = partners.missing(players);
            if pairs.len() % 2 == 0 {
                assert!(partners.is_complete(players), "players={}", players);
            } else {
                assert_eq!(missing.len(), 1, "players={}", players);
            }
            assert!(partners.iter().all(|(_, count)| count == 1));
        }
    }

    #[test]
    fn backtracks_past_dead_end() {
        let pairs = [pair(1, 2), pair(3, 4), pair(5, 6), pair(3, 5)];
        let games = pack_games(&pairs).unwrap();
        assert_eq!(games, vec![
            Game::new(pair(1, 2), pair(3, 5)).unwrap(),
            Game::new(pair(3, 4), pair(5, 6)).unwrap(),
        ]);
    }

    #[test]
    fn reports_unpackable_pairs() {
        assert_eq!(pack_games(&[pair(1, 2), pair(1, 3)]), Err(ScheduleError::NoPacking));
    }

    #[test]
    fn stops_at_attempt_limit() {
        assert_eq!(
            pack_games_with_limit(&enumerate_pairs(8), 1),
            Err(ScheduleError::SearchLimit { attempts: 1 })
        );
    }

    #[test]
    fn drops_single_leftover_pair() {
        let games = pack_games(&[pair(1, 2)]).unwrap();
        assert!(games.is_empty());
    }
}
