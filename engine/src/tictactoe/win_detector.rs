use super::board::Board;
use super::error::EngineError;
use super::types::{Mark, Outcome, WinningLine};

/// Rows, then columns, then diagonals. Detection scans in this order.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn winning_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();
    LINES.iter().find_map(|&[a, b, c]| {
        let mark = cells[a];
        if mark != Mark::Empty && cells[b] == mark && cells[c] == mark {
            Some(WinningLine::new(mark, [a, b, c]))
        } else {
            None
        }
    })
}

pub fn check_win(board: &Board) -> Option<Mark> {
    winning_line(board).map(|line| line.mark)
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_win(board) {
        return Outcome::won_by(mark);
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Checked entry point for callers holding raw cells.
pub fn evaluate_cells(cells: &[Mark]) -> Result<Outcome, EngineError> {
    Board::from_cells(cells).map(|board| evaluate(&board))
}

/// Lines where `mark` holds two cells and the third is still empty.
pub fn open_lines(board: &Board, mark: Mark) -> usize {
    let cells = board.cells();
    LINES
        .iter()
        .filter(|line| {
            let owned = line.iter().filter(|&&i| cells[i] == mark).count();
            let empty = line.iter().filter(|&&i| cells[i] == Mark::Empty).count();
            owned == 2 && empty == 1
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_board_is_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_detects_every_line() {
        for line in LINES {
            let mut board = Board::new();
            for i in line {
                board.set(i, Mark::O);
            }
            assert_eq!(evaluate(&board), Outcome::OWon, "line {:?}", line);
            assert_eq!(winning_line(&board).map(|l| l.cells), Some(line));
        }
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = Board::parse("XOX XOO OXX").unwrap();
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_win_on_last_cell_is_not_draw() {
        let board = Board::parse("XOX OXO OXX").unwrap();
        assert_eq!(evaluate(&board), Outcome::XWon);
    }

    #[test]
    fn test_first_line_in_canonical_order_is_reported() {
        // Row 0 and column 0 both complete; rows come first.
        let board = Board::parse("XXX XO. XOO").unwrap();
        assert_eq!(winning_line(&board).map(|l| l.cells), Some([0, 1, 2]));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board = Board::parse("XO. .X. ..O").unwrap();
        let first = evaluate(&board);
        assert_eq!(first, evaluate(&board));
        assert_eq!(first, Outcome::InProgress);
    }

    #[test]
    fn test_evaluate_cells_rejects_short_board() {
        let result = evaluate_cells(&[Mark::X, Mark::O]);
        assert!(matches!(result, Err(EngineError::InvalidBoard(_))));
    }

    #[test]
    fn test_evaluate_cells_accepts_nine_cells() {
        let mut cells = [Mark::Empty; 9];
        cells[2] = Mark::X;
        cells[4] = Mark::X;
        cells[6] = Mark::X;
        assert_eq!(evaluate_cells(&cells), Ok(Outcome::XWon));
    }

    #[test]
    fn test_open_lines_counts_two_with_gap() {
        let board = Board::parse("XX. .OO X..").unwrap();
        // Row 0 and column 0 are open for X.
        assert_eq!(open_lines(&board, Mark::X), 2);
        assert_eq!(open_lines(&board, Mark::O), 1);
    }

    fn collect_reachable(board: Board, to_move: Mark, seen: &mut HashSet<Board>) {
        if !seen.insert(board) || evaluate(&board).is_over() {
            return;
        }
        let next = to_move.opponent().unwrap();
        for index in board.available_moves() {
            collect_reachable(board.with_mark(index, to_move), next, seen);
        }
    }

    #[test]
    fn test_reachable_boards_never_have_two_winners() {
        let mut seen = HashSet::new();
        collect_reachable(Board::new(), Mark::X, &mut seen);
        assert_eq!(seen.len(), 5478);

        for board in &seen {
            let x_lines = LINES
                .iter()
                .filter(|line| line.iter().all(|&i| board.cells()[i] == Mark::X))
                .count();
            let o_lines = LINES
                .iter()
                .filter(|line| line.iter().all(|&i| board.cells()[i] == Mark::O))
                .count();
            assert!(x_lines == 0 || o_lines == 0, "both marks won on\n{}", board);

            let diff = board.count(Mark::X) as isize - board.count(Mark::O) as isize;
            assert!((0..=1).contains(&diff));
        }
    }
}
