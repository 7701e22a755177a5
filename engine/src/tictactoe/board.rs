use super::error::{EngineError, IllegalMoveReason, InvalidBoardReason};
use super::types::Mark;

pub const CELL_COUNT: usize = 9;
pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const SIDES: [usize; 4] = [1, 3, 5, 7];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: &[Mark]) -> Result<Self, EngineError> {
        let cells: [Mark; CELL_COUNT] = cells.try_into().map_err(|_| {
            EngineError::InvalidBoard(InvalidBoardReason::WrongLength { found: cells.len() })
        })?;
        Ok(Self { cells })
    }

    /// Parses nine symbols (`X`, `O`, and `.`, `-` or `_` for empty).
    /// Whitespace is ignored so boards can be written as three rows.
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        let symbols: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != CELL_COUNT {
            return Err(EngineError::InvalidBoard(InvalidBoardReason::WrongLength {
                found: symbols.len(),
            }));
        }

        let mut cells = [Mark::Empty; CELL_COUNT];
        for (index, &symbol) in symbols.iter().enumerate() {
            cells[index] = Mark::from_symbol(symbol).ok_or(EngineError::InvalidBoard(
                InvalidBoardReason::UnknownSymbol { index, symbol },
            ))?;
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn available_moves(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.cells[i] == Mark::Empty).collect()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), EngineError> {
        if mark == Mark::Empty {
            return Err(EngineError::IllegalMove(IllegalMoveReason::EmptyMark));
        }
        match self.get(index) {
            None => Err(EngineError::IllegalMove(IllegalMoveReason::OutOfRange(index))),
            Some(Mark::Empty) => {
                self.cells[index] = mark;
                Ok(())
            }
            Some(_) => Err(EngineError::IllegalMove(IllegalMoveReason::CellOccupied(index))),
        }
    }

    /// Copy of the board with `mark` at `index`, for hypothetical play.
    pub(crate) fn with_mark(&self, index: usize, mark: Mark) -> Self {
        let mut next = *self;
        next.cells[index] = mark;
        next
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{}{}{}", chunk[0], chunk[1], chunk[2])?;
        }
        Ok(())
    }
}
