mod board;
mod bot_controller;
mod error;
mod session;
mod types;
mod win_detector;

pub use board::{Board, CELL_COUNT, CENTER, CORNERS, SIDES};
pub use bot_controller::{BotInput, calculate_minimax_move, calculate_move, choose_move};
pub use error::{EngineError, IllegalMoveReason, InvalidBoardReason};
pub use session::{MoveReport, Scoreboard, SessionPhase, SessionSettings, TicTacToeSession};
pub use types::{BotDifficulty, Mark, Outcome, WinningLine};
pub use win_detector::{LINES, check_win, evaluate, evaluate_cells, open_lines, winning_line};
