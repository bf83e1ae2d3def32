use crate::model::game::{Game, Round, Schedule};

/// First-fit packing of `games` into rounds of at most `courts` games.
///
/// Each game goes into the earliest round with a free court and none of its
/// players, or opens a new round. The result depends on the input order.
pub fn schedule_rounds(games: &[Game], courts: usize) -> Schedule {
    let mut rounds: Vec<Round> = Vec::new();
    for game in games {
        match rounds.iter_mut().find(|round| round.can_host(game, courts)) {
            Some(round) => round.push(*game),
            None => rounds.push(Round::new(vec![*game])),
        }
    }
    Schedule::new(rounds)
}
