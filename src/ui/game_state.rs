//! Game state management for the GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use derive_more::{Display, Error, From};
use tracing::{debug, warn};

use crate::error::BoardError;
use crate::rules::{outcome, winning_line, Outcome, WinLine};
use crate::{Board, EngineConfig, Mark, MoveResult, Pos, Solver, Variant};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs computer
    PvE { human: Mark },
    /// Player vs Player (hotseat)
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Mark::X }
    }
}

/// Why a click did not place a mark
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum MoveRejected {
    #[display("Game is over")]
    GameOver,
    #[display("Computer is thinking")]
    SolverThinking,
    #[display("Not your turn")]
    NotYourTurn,
    #[display("{_0}")]
    #[from]
    Board(BoardError),
}

/// Solver computation state
pub enum SolverState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub solver_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            solver_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Mark,
    pub game_over: Option<Outcome>,
    pub winning_line: Option<&'static WinLine>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Mark)>,
    pub last_solver_result: Option<MoveResult>,
    pub solver_state: SolverState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
    config: EngineConfig,
}

impl GameState {
    pub fn new(variant: Variant, mode: GameMode) -> Self {
        Self::with_config(variant, mode, EngineConfig::for_variant(variant))
    }

    pub fn with_config(variant: Variant, mode: GameMode, config: EngineConfig) -> Self {
        Self {
            board: Board::new(variant),
            mode,
            current_turn: Mark::X,
            game_over: None,
            winning_line: None,
            last_move: None,
            move_history: Vec::new(),
            last_solver_result: None,
            solver_state: SolverState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            config,
        }
    }

    pub fn variant(&self) -> Variant {
        self.board.variant()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start over with the same variant, mode and config
    pub fn reset(&mut self) {
        *self = Self::with_config(self.variant(), self.mode, self.config.clone());
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn == human,
            GameMode::PvP => true,
        }
    }

    /// Check if it's the computer's turn
    pub fn is_solver_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn != human,
            GameMode::PvP => false,
        }
    }

    pub fn is_solver_thinking(&self) -> bool {
        matches!(self.solver_state, SolverState::Thinking { .. })
    }

    /// Attempt to place the current side's mark at the given position
    pub fn try_place(&mut self, pos: Pos) -> Result<(), MoveRejected> {
        if self.game_over.is_some() {
            return Err(MoveRejected::GameOver);
        }
        if self.is_solver_thinking() {
            return Err(MoveRejected::SolverThinking);
        }
        if !self.is_human_turn() {
            return Err(MoveRejected::NotYourTurn);
        }

        self.board.try_place(pos, self.current_turn)?;
        self.record_move(pos);
        Ok(())
    }

    /// Book-keeping after a mark lands, for both human and computer moves
    fn record_move(&mut self, pos: Pos) {
        let side = self.current_turn;
        self.move_history.push((pos, side));
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.message = None;
        self.move_timer.stop();

        if let Some(result) = outcome(&self.board) {
            debug!(?result, moves = self.move_history.len(), "Game over");
            self.winning_line = winning_line(&self.board, side);
            self.game_over = Some(result);
            return;
        }

        self.current_turn = side.opponent();
        self.move_timer.start();
    }

    /// Start the solver on a worker thread
    pub fn start_solver(&mut self) {
        if !self.is_solver_turn() || self.is_solver_thinking() || self.game_over.is_some() {
            return;
        }

        let board = self.board.clone();
        let side = self.current_turn;
        let solver = Solver::new(self.config.clone());

        let (tx, rx) = channel();
        thread::spawn(move || {
            let result = solver.best_move_with_stats(&board, side);
            let _ = tx.send(result);
        });

        self.solver_state = SolverState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Apply the solver's move once it arrives
    pub fn check_solver_result(&mut self) {
        let result = match &self.solver_state {
            SolverState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("Solver thread exited without a result");
                    self.solver_state = SolverState::Idle;
                    self.message = Some("Solver error".to_string());
                    return;
                }
            },
            SolverState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.solver_state = SolverState::Idle;
            self.move_timer.solver_time = Some(elapsed);

            match move_result.best_move {
                Some(pos) if self.board.is_empty(pos) => {
                    self.board.place(pos, self.current_turn);
                    self.record_move(pos);
                }
                _ => self.message = Some("Solver could not find a move".to_string()),
            }
            self.last_solver_result = Some(move_result);
        }
    }

    /// Time the solver has been running, if it is
    pub fn solver_elapsed(&self) -> Option<Duration> {
        match &self.solver_state {
            SolverState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            SolverState::Idle => None,
        }
    }

    /// Suggest a move for the side to move
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_solver_thinking() {
            return;
        }

        let result = Solver::new(self.config.clone()).best_move_with_stats(&self.board, self.current_turn);
        self.suggested_move = result.best_move;
        self.last_solver_result = Some(result);
    }

    /// Undo last move
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_solver_thinking() {
            return;
        }

        // In PvE take back the computer's reply as well
        let undo_count = match self.mode {
            GameMode::PvE { human } => {
                let last_side = self.move_history.last().map(|&(_, side)| side);
                if last_side != Some(human) && self.move_history.len() >= 2 {
                    2
                } else {
                    1
                }
            }
            GameMode::PvP => 1,
        };

        let keep = self.move_history.len().saturating_sub(undo_count);
        for (pos, _) in self.move_history.drain(keep..) {
            self.board.clear(pos);
        }

        self.current_turn = self
            .move_history
            .last()
            .map_or(Mark::X, |&(_, side)| side.opponent());
        self.last_move = self.move_history.last().map(|&(pos, _)| pos);
        self.game_over = None;
        self.winning_line = None;
        self.suggested_move = None;
        self.message = None;
        self.move_timer.start();
    }
}
