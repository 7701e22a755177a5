use super::session::SessionPhase;
use super::types::Mark;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidBoardReason {
    WrongLength { found: usize },
    UnknownSymbol { index: usize, symbol: char },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveReason {
    CellOccupied(usize),
    OutOfRange(usize),
    EmptyMark,
    WrongPhase(SessionPhase),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidBoard(InvalidBoardReason),
    IllegalMove(IllegalMoveReason),
    InvalidRoundCount(i64),
    InvalidMarks { bot: Mark, human: Mark },
    WrongPhase { operation: &'static str, phase: SessionPhase },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidBoard(InvalidBoardReason::WrongLength { found }) => {
                write!(f, "Invalid board: expected 9 cells, found {}", found)
            }
            EngineError::InvalidBoard(InvalidBoardReason::UnknownSymbol { index, symbol }) => {
                write!(f, "Invalid board: unknown symbol '{}' at cell {}", symbol, index)
            }
            EngineError::IllegalMove(IllegalMoveReason::CellOccupied(cell)) => {
                write!(f, "Illegal move: cell {} is already marked", cell)
            }
            EngineError::IllegalMove(IllegalMoveReason::OutOfRange(cell)) => {
                write!(f, "Illegal move: cell {} is outside the board", cell)
            }
            EngineError::IllegalMove(IllegalMoveReason::EmptyMark) => {
                write!(f, "Illegal move: a move must place X or O")
            }
            EngineError::IllegalMove(IllegalMoveReason::WrongPhase(phase)) => {
                write!(f, "Illegal move: no round is active ({:?})", phase)
            }
            EngineError::InvalidRoundCount(count) => {
                write!(f, "Invalid round count {}: must be at least 1", count)
            }
            EngineError::InvalidMarks { bot, human } => {
                write!(f, "Invalid marks: bot {:?} and human {:?} must be distinct and non-empty", bot, human)
            }
            EngineError::WrongPhase { operation, phase } => {
                write!(f, "Cannot {} while session is in {:?}", operation, phase)
            }
        }
    }
}

impl std::error::Error for EngineError {}
