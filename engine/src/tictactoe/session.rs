use crate::log;
use crate::session_rng::{RandomSource, SessionRng};
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::error::{EngineError, IllegalMoveReason};
use super::types::{BotDifficulty, Mark, Outcome};
use super::win_detector::{evaluate, open_lines};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    SelectingRounds,
    RoundActive,
    RoundResolved,
    SeriesComplete,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub human_wins: u32,
    pub computer_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn rounds_played(&self) -> u32 {
        self.human_wins + self.computer_wins + self.draws
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub human_mark: Mark,
    pub difficulty: BotDifficulty,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            human_mark: Mark::X,
            difficulty: BotDifficulty::Normal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub human_cell: usize,
    /// Lines the human could complete next, counted before the computer replies.
    pub human_open_lines: usize,
    pub computer_cell: Option<usize>,
    pub outcome: Outcome,
}

/// A multi-round series against the computer.
///
/// The human opens every round; the computer reply is computed and applied
/// inside the same `apply_human_move` call. Transitions take `&mut self`, so
/// a session shared between callers needs external serialization (one UI
/// event handler at a time).
pub struct TicTacToeSession<R: RandomSource = SessionRng> {
    settings: SessionSettings,
    computer_mark: Mark,
    phase: SessionPhase,
    board: Board,
    total_rounds: u32,
    current_round: u32,
    scoreboard: Scoreboard,
    last_outcome: Option<Outcome>,
    last_computer_move: Option<usize>,
    rng: R,
}

impl TicTacToeSession<SessionRng> {
    pub fn with_seed(settings: SessionSettings, seed: u64) -> Result<Self, EngineError> {
        Self::new(settings, SessionRng::new(seed))
    }
}

impl<R: RandomSource> TicTacToeSession<R> {
    pub fn new(settings: SessionSettings, rng: R) -> Result<Self, EngineError> {
        let computer_mark = settings.human_mark.opponent().ok_or(EngineError::InvalidMarks {
            bot: Mark::Empty,
            human: settings.human_mark,
        })?;

        Ok(Self {
            settings,
            computer_mark,
            phase: SessionPhase::SelectingRounds,
            board: Board::new(),
            total_rounds: 0,
            current_round: 0,
            scoreboard: Scoreboard::default(),
            last_outcome: None,
            last_computer_move: None,
            rng,
        })
    }

    pub fn select_rounds(&mut self, rounds: i64) -> Result<(), EngineError> {
        self.expect_phase("select rounds", SessionPhase::SelectingRounds)?;

        let total_rounds = u32::try_from(rounds)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or(EngineError::InvalidRoundCount(rounds))?;

        self.total_rounds = total_rounds;
        self.current_round = 1;
        self.scoreboard = Scoreboard::default();
        self.last_outcome = None;
        self.start_round();

        log!("Series of {} rounds started ({:?})", total_rounds, self.settings.difficulty);
        Ok(())
    }

    /// Places the human mark and, unless that ended the round, the computer
    /// reply. A rejected move leaves the session untouched.
    pub fn apply_human_move(&mut self, cell: usize) -> Result<MoveReport, EngineError> {
        if self.phase != SessionPhase::RoundActive {
            return Err(EngineError::IllegalMove(IllegalMoveReason::WrongPhase(self.phase)));
        }

        self.board.place(cell, self.settings.human_mark)?;
        self.last_computer_move = None;
        let human_open_lines = open_lines(&self.board, self.settings.human_mark);

        let mut outcome = evaluate(&self.board);
        if outcome == Outcome::InProgress {
            let input = BotInput {
                board: self.board,
                bot_mark: self.computer_mark,
                human_mark: self.settings.human_mark,
            };
            if let Some(reply) = calculate_move(self.settings.difficulty, &input, &mut self.rng) {
                self.board.set(reply, self.computer_mark);
                self.last_computer_move = Some(reply);
                outcome = evaluate(&self.board);
            }
        }

        if outcome.is_over() {
            self.resolve_round(outcome);
        }

        Ok(MoveReport {
            human_cell: cell,
            human_open_lines,
            computer_cell: self.last_computer_move,
            outcome,
        })
    }

    pub fn advance(&mut self) -> Result<SessionPhase, EngineError> {
        self.expect_phase("advance", SessionPhase::RoundResolved)?;

        if self.current_round < self.total_rounds {
            self.current_round += 1;
            self.start_round();
        } else {
            self.phase = SessionPhase::SeriesComplete;
            log!(
                "Series complete: human {}, computer {}, draws {}",
                self.scoreboard.human_wins,
                self.scoreboard.computer_wins,
                self.scoreboard.draws
            );
        }
        Ok(self.phase)
    }

    pub fn play_again(&mut self) -> Result<(), EngineError> {
        self.expect_phase("play again", SessionPhase::SeriesComplete)?;

        self.phase = SessionPhase::SelectingRounds;
        self.board = Board::new();
        self.total_rounds = 0;
        self.current_round = 0;
        self.scoreboard = Scoreboard::default();
        self.last_outcome = None;
        self.last_computer_move = None;
        Ok(())
    }

    fn expect_phase(&self, operation: &'static str, expected: SessionPhase) -> Result<(), EngineError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn start_round(&mut self) {
        self.board = Board::new();
        self.last_computer_move = None;
        self.phase = SessionPhase::RoundActive;
        log!("Round {}/{} started", self.current_round, self.total_rounds);
    }

    fn resolve_round(&mut self, outcome: Outcome) {
        match outcome.winner() {
            Some(mark) if mark == self.settings.human_mark => self.scoreboard.human_wins += 1,
            Some(_) => self.scoreboard.computer_wins += 1,
            None => self.scoreboard.draws += 1,
        }
        self.last_outcome = Some(outcome);
        self.phase = SessionPhase::RoundResolved;
        log!("Round {}/{} resolved: {:?}", self.current_round, self.total_rounds, outcome);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn human_wins(&self) -> u32 {
        self.scoreboard.human_wins
    }

    pub fn computer_wins(&self) -> u32 {
        self.scoreboard.computer_wins
    }

    pub fn draws(&self) -> u32 {
        self.scoreboard.draws
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    pub fn final_tally(&self) -> Option<Scoreboard> {
        (self.phase == SessionPhase::SeriesComplete).then_some(self.scoreboard)
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn last_computer_move(&self) -> Option<usize> {
        self.last_computer_move
    }

    pub fn human_mark(&self) -> Mark {
        self.settings.human_mark
    }

    pub fn computer_mark(&self) -> Mark {
        self.computer_mark
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.settings.difficulty
    }
}
