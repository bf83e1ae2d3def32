use thiserror::Error;
use crate::model::{entity::Player, game::Game};

pub type Index = usize;

/// One side of one game in a flat game list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub game_index: Index,
    pub side_index: Index,
}

impl Position {
    pub fn new(game_index: Index, side_index: Index) -> Position {
        Position { game_index, side_index }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Exchange the pairs at two positions. Applying it twice is a no-op.
    Swap(Position, Position),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Both positions are in the same game")]
    SameGame,
    #[error("Player {0} would appear twice in one game")]
    DuplicatePlayer(Player),
}

impl Action {
    /// Applies the action to `games` in place.
    ///
    /// On error the list is left exactly as it was.
    pub fn apply(&self, games: &mut [Game]) -> Result<(), ActionError> {
        match self {
            Action::Swap(pos1, pos2) => {
                if pos1.side_index > 1 || pos2.side_index > 1
                    || pos1.game_index >= games.len() || pos2.game_index >= games.len()
                {
                    return Err(ActionError::InvalidPosition);
                }
                if pos1.game_index == pos2.game_index {
                    return Err(ActionError::SameGame);
                }
                exchange(games, pos1, pos2);
                let duplicate = [pos1.game_index, pos2.game_index]
                    .into_iter()
                    .find_map(|index| duplicate_player(&games[index]));
                if let Some(player) = duplicate {
                    exchange(games, pos1, pos2);
                    return Err(ActionError::DuplicatePlayer(player));
                }
                Ok(())
            }
        }
    }
}

fn exchange(games: &mut [Game], pos1: &Position, pos2: &Position) {
    let pair1 = games[pos1.game_index].sides[pos1.side_index];
    games[pos1.game_index].sides[pos1.side_index] = games[pos2.game_index].sides[pos2.side_index];
    games[pos2.game_index].sides[pos2.side_index] = pair1;
}

fn duplicate_player(game: &Game) -> Option<Player> {
    let [left, right] = game.sides;
    left.players().into_iter().find(|p| right.contains(*p))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::Pair;

    fn game(a: u32, b: u32, c: u32, d: u32) -> Game {
        Game::new(Pair::new(a, b).unwrap(), Pair::new(c, d).unwrap()).unwrap()
    }

    #[test]
    fn swap_is_self_inverse() {
        let original = vec![game(1, 2, 3, 4), game(5, 6, 7, 8)];
        let mut games = original.clone();
        let swap = Action::Swap(Position::new(0, 1), Position::new(1, 0));
        swap.apply(&mut games).unwrap();
        assert_eq!(games[0], game(1, 2, 5, 6));
        assert_eq!(games[1], game(3, 4, 7, 8));
        swap.apply(&mut games).unwrap();
        assert_eq!(games, original);
    }

    #[test]
    fn swap_creating_duplicate_is_undone() {
        let original = vec![game(1, 2, 3, 4), game(1, 5, 6, 7)];
        let mut games = original.clone();
        let result = Action::Swap(Position::new(0, 1), Position::new(1, 0)).apply(&mut games);
        assert_eq!(result, Err(ActionError::DuplicatePlayer(1)));
        assert_eq!(games, original);
    }

    #[test]
    fn swap_rejects_bad_positions() {
        let mut games = vec![game(1, 2, 3, 4), game(5, 6, 7, 8)];
        assert_eq!(
            Action::Swap(Position::new(0, 0), Position::new(2, 0)).apply(&mut games),
            Err(ActionError::InvalidPosition)
        );
        assert_eq!(
            Action::Swap(Position::new(0, 2), Position::new(1, 0)).apply(&mut games),
            Err(ActionError::InvalidPosition)
        );
        assert_eq!(
            Action::Swap(Position::new(1, 0), Position::new(1, 1)).apply(&mut games),
            Err(ActionError::SameGame)
        );
    }
}
