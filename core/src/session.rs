use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Active
/// - Ready -> Won
/// - Ready -> Lost
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Result of a move played through [`Game`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport<O> {
    pub outcome: O,
    pub state: GameState,
    /// Every cell changed by the move, including the end-of-game reveal.
    pub changed: Vec<ChangedCell>,
}

/// A board plus the win/loss bookkeeping a front end would otherwise do
/// after every click: the win check runs after each move and no move is
/// accepted once the game is over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Game {
    #[cfg(feature = "std")]
    pub fn new_game(size: Coord) -> Result<Self> {
        Ok(Self::from_board(Board::new_game(size)?))
    }

    pub fn with_rng<R: rand::Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        Ok(Self::from_board(Board::with_rng(config, rng)?))
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<MoveReport<RevealOutcome>> {
        self.check_not_finished()?;

        let RevealReport {
            outcome,
            mut changed,
        } = self.board.reveal(coords)?;

        match outcome {
            RevealOutcome::MineHit => {
                self.triggered_mine = Some(coords);
                self.end_game(false, &mut changed);
            }
            RevealOutcome::Continue if changed.is_empty() => {}
            RevealOutcome::Continue => self.after_update(&mut changed),
        }

        Ok(self.report(outcome, changed))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MoveReport<FlagOutcome>> {
        self.check_not_finished()?;

        let FlagReport { outcome, .. } = self.board.toggle_flag(coords)?;
        let mut changed = Vec::new();

        if outcome.has_update() {
            changed.push(ChangedCell::new(coords, &self.board.cell_at(coords)));
            self.after_update(&mut changed);
        }

        Ok(self.report(outcome, changed))
    }

    fn report<O>(&self, outcome: O, changed: Vec<ChangedCell>) -> MoveReport<O> {
        MoveReport {
            outcome,
            state: self.state,
            changed,
        }
    }

    fn after_update(&mut self, changed: &mut Vec<ChangedCell>) {
        if self.board.check_win() {
            self.end_game(true, changed);
        } else {
            self.mark_started();
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            log::debug!("Game started");
            self.state = GameState::Active;
        }
    }

    fn end_game(&mut self, won: bool, changed: &mut Vec<ChangedCell>) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("Game ended: {:?}", self.state);
        if won {
            changed.extend(self.board.settle_win());
        } else {
            changed.extend(self.board.reveal_all());
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord, mines: &[Coord2]) -> Game {
        Game::from_board(Board::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn mine_hit_loses_and_reveals_board() {
        let mut game = game(3, &[(0, 0), (2, 2)]);
        game.toggle_flag((2, 2)).unwrap();

        let report = game.reveal((0, 0)).unwrap();

        assert_eq!(report.outcome, RevealOutcome::MineHit);
        assert_eq!(report.state, GameState::Lost);
        assert_eq!(game.triggered_mine(), Some((0, 0)));
        // the hit mine plus the seven other hidden cells, the flag stays
        assert_eq!(report.changed.len(), 8);
        assert_eq!(
            game.board().cell((2, 2)).unwrap().state(),
            CellState::Flagged
        );
        assert!(!game.board().check_win());
    }

    #[test]
    fn lost_board_is_not_a_win() {
        let mut game = game(3, &[(0, 0)]);

        let report = game.reveal((0, 0)).unwrap();

        assert_eq!(report.state, GameState::Lost);
        assert!(
            game.board()
                .cells()
                .iter()
                .all(|cell| cell.state() == CellState::Revealed)
        );
        assert!(!game.board().check_win());
    }

    #[test]
    fn finished_game_rejects_moves() {
        let mut game = game(3, &[(0, 0)]);
        game.reveal((0, 0)).unwrap();
        let before = game.clone();

        assert_eq!(game.reveal((2, 2)), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag((2, 2)), Err(GameError::AlreadyEnded));
        assert_eq!(game, before);
    }

    #[test]
    fn clearing_the_board_wins() {
        let mut game = game(9, &[(0, 0); 9]);

        let report = game.reveal((8, 8)).unwrap();

        assert_eq!(report.state, GameState::Won);
        assert!(game.is_finished());
        // 80 from the cascade, then the mine flagged when the game settles
        assert_eq!(report.changed.len(), 81);
        assert_eq!(
            game.board().cell((0, 0)).unwrap().state(),
            CellState::Flagged
        );
        assert_eq!(game.board().remaining_flags(), 8);
        assert!(game.board().check_win());
        assert_eq!(game.triggered_mine(), None);
    }

    #[test]
    fn flagging_last_mine_wins() {
        let mut game = game(9, &[(2, 2), (6, 6)]);

        let first = game.toggle_flag((2, 2)).unwrap();
        assert_eq!(first.outcome, FlagOutcome::Flagged);
        assert_eq!(first.state, GameState::Active);

        let last = game.toggle_flag((6, 6)).unwrap();
        assert_eq!(last.outcome, FlagOutcome::Flagged);
        assert_eq!(last.state, GameState::Won);
        assert_eq!(game.board().remaining_flags(), 0);
    }

    #[test]
    fn noop_moves_report_no_changes() {
        let mut game = game(3, &[(0, 0)]);
        assert!(game.state().is_ready());

        let flagged = game.toggle_flag((1, 1)).unwrap();
        assert_eq!(flagged.state, GameState::Active);

        let blocked = game.toggle_flag((2, 2)).unwrap();
        assert_eq!(blocked.outcome, FlagOutcome::NoOp);
        assert!(blocked.changed.is_empty());

        let on_flag = game.reveal((1, 1)).unwrap();
        assert!(on_flag.changed.is_empty());
        assert_eq!(on_flag.state, GameState::Active);
    }

    #[test]
    fn out_of_bounds_move_is_an_error() {
        let mut game = game(3, &[(0, 0)]);

        assert_eq!(
            game.reveal((3, 3)),
            Err(GameError::InvalidCoords {
                coords: (3, 3),
                size: 3
            })
        );
        assert!(game.state().is_ready());
    }

    #[test]
    fn seeded_games_are_reproducible() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let a = Game::with_rng(GameConfig::default(), &mut SmallRng::seed_from_u64(9)).unwrap();
        let b = Game::with_rng(GameConfig::default(), &mut SmallRng::seed_from_u64(9)).unwrap();

        assert_eq!(a.snapshot(), b.snapshot());
    }
}
