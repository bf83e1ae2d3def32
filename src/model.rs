pub mod entity {
    use std::fmt;

    pub type Player = u32;

    /// Two distinct players partnering on one side of a game, stored low-first.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Pair([Player; 2]);

    impl Pair {
        pub fn new(a: Player, b: Player) -> Option<Pair> {
            if a == b {
                return None;
            }
            Some(Pair([a.min(b), a.max(b)]))
        }
        pub fn low(&self) -> Player {
            self.0[0]
        }
        pub fn high(&self) -> Player {
            self.0[1]
        }
        pub fn players(&self) -> [Player; 2] {
            self.0
        }
        pub fn contains(&self, player: Player) -> bool {
            self.0.contains(&player)
        }
        pub fn shares_player(&self, other: &Pair) -> bool {
            self.0.iter().any(|p| other.contains(*p))
        }
    }

    impl fmt::Display for Pair {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}&{}", self.0[0], self.0[1])
        }
    }
}


pub mod game {
    use std::fmt;
    use std::hash::{Hash, Hasher};

    use itertools::{iproduct, Itertools};

    use super::entity::{Pair, Player};

    /// Two opposing pairs. Equality ignores which pair sits on which side.
    ///
    /// `sides` is public so that pairs can be exchanged between games in
    /// place; an exchange may leave the game invalid until it is undone.
    #[derive(Debug, Clone, Copy)]
    pub struct Game {
        pub sides: [Pair; 2],
    }

    impl Game {
        /// `None` when the two pairs share a player.
        pub fn new(a: Pair, b: Pair) -> Option<Game> {
            let game = Game { sides: [a, b] };
            game.is_valid().then_some(game)
        }

        pub fn is_valid(&self) -> bool {
            !self.sides[0].shares_player(&self.sides[1])
        }

        pub fn players(&self) -> [Player; 4] {
            let [a, b] = self.sides[0].players();
            let [c, d] = self.sides[1].players();
            [a, b, c, d]
        }

        pub fn contains(&self, player: Player) -> bool {
            self.sides.iter().any(|side| side.contains(player))
        }

        pub fn shares_player(&self, other: &Game) -> bool {
            self.players().iter().any(|p| other.contains(*p))
        }

        /// Every cross-side pairing of this game, i.e. the four opponent pairs.
        pub fn opponents(&self) -> impl Iterator<Item = Pair> {
            let [left, right] = self.sides;
            iproduct!(left.players(), right.players()).filter_map(|(a, b)| Pair::new(a, b))
        }

        fn canonical(&self) -> (Pair, Pair) {
            let [a, b] = self.sides;
            (a.min(b), a.max(b))
        }
    }

    impl PartialEq for Game {
        fn eq(&self, other: &Self) -> bool {
            self.canonical() == other.canonical()
        }
    }

    impl Eq for Game {}

    impl Hash for Game {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.canonical().hash(state);
        }
    }

    impl fmt::Display for Game {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{} v {}", self.sides[0], self.sides[1])
        }
    }

    /// Games played at the same time, on distinct courts.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Round {
        games: Vec<Game>,
    }

    impl Round {
        pub fn new(games: Vec<Game>) -> Round {
            Round { games }
        }
        pub fn games(&self) -> &[Game] {
            &self.games
        }
        pub fn len(&self) -> usize {
            self.games.len()
        }
        pub fn is_empty(&self) -> bool {
            self.games.is_empty()
        }
        pub fn contains(&self, player: Player) -> bool {
            self.games.iter().any(|game| game.contains(player))
        }

        /// Whether `game` fits into a free court without double-booking a player.
        pub fn can_host(&self, game: &Game, courts: usize) -> bool {
            self.games.len() < courts && self.games.iter().all(|g| !g.shares_player(game))
        }

        pub(crate) fn push(&mut self, game: Game) {
            self.games.push(game);
        }
    }

    impl fmt::Display for Round {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.games.iter().join(", "))
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Schedule {
        rounds: Vec<Round>,
    }

    impl Schedule {
        pub fn new(rounds: Vec<Round>) -> Schedule {
            Schedule { rounds }
        }

        /// Builds a schedule from literal game lists, one per round.
        pub fn from_games(rounds: Vec<Vec<Game>>) -> Schedule {
            Schedule { rounds: rounds.into_iter().map(Round::new).collect() }
        }

        pub fn rounds(&self) -> &[Round] {
            &self.rounds
        }
        pub fn len(&self) -> usize {
            self.rounds.len()
        }
        pub fn is_empty(&self) -> bool {
            self.rounds.is_empty()
        }
        pub fn games(&self) -> impl Iterator<Item = &Game> {
            self.rounds.iter().flat_map(|round| round.games().iter())
        }
        pub fn num_games(&self) -> usize {
            self.rounds.iter().map(Round::len).sum()
        }

        /// Every game has four distinct players, no round exceeds `courts`,
        /// and no player appears twice within a round.
        pub fn is_valid(&self, courts: usize) -> bool {
            self.rounds.iter().all(|round| {
                round.len() <= courts
                    && round.games.iter().all(Game::is_valid)
                    && round.games.iter().tuple_combinations().all(|(a, b)| !a.shares_player(b))
            })
        }
    }
}
