use crate::session_rng::RandomSource;
use super::board::{Board, CENTER, CORNERS, SIDES};
use super::error::EngineError;
use super::types::{BotDifficulty, Mark, Outcome};
use super::win_detector::{check_win, evaluate};

const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
    pub human_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, bot_mark: Mark, human_mark: Mark) -> Result<Self, EngineError> {
        if bot_mark == Mark::Empty || human_mark == Mark::Empty || bot_mark == human_mark {
            return Err(EngineError::InvalidMarks {
                bot: bot_mark,
                human: human_mark,
            });
        }
        Ok(Self {
            board,
            bot_mark,
            human_mark,
        })
    }
}

/// Returns `None` only when the board has no empty cell.
pub fn calculate_move<R: RandomSource + ?Sized>(
    difficulty: BotDifficulty,
    input: &BotInput,
    rng: &mut R,
) -> Option<usize> {
    match difficulty {
        BotDifficulty::Easy => calculate_random_move(&input.board, rng),
        BotDifficulty::Normal => choose_move(&input.board, input.bot_mark, input.human_mark, rng),
        BotDifficulty::Hard => calculate_minimax_move(input),
    }
}

/// Win, then block, then center, then a random corner, then a random side.
/// Never mutates `board`; hypothetical placements happen on copies.
pub fn choose_move<R: RandomSource + ?Sized>(
    board: &Board,
    bot_mark: Mark,
    human_mark: Mark,
    rng: &mut R,
) -> Option<usize> {
    let available_moves = board.available_moves();
    if available_moves.is_empty() {
        return None;
    }

    if let Some(index) = find_winning_move(board, bot_mark, &available_moves) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(board, human_mark, &available_moves) {
        return Some(index);
    }

    if board.is_empty_cell(CENTER) {
        return Some(CENTER);
    }

    let corners: Vec<usize> = CORNERS.into_iter().filter(|&i| board.is_empty_cell(i)).collect();
    if let Some(index) = pick_random(&corners, rng) {
        return Some(index);
    }

    let sides: Vec<usize> = SIDES.into_iter().filter(|&i| board.is_empty_cell(i)).collect();
    pick_random(&sides, rng)
}

fn find_winning_move(board: &Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    moves
        .iter()
        .copied()
        .find(|&index| check_win(&board.with_mark(index, mark)) == Some(mark))
}

fn pick_random<R: RandomSource + ?Sized>(candidates: &[usize], rng: &mut R) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let idx = rng.pick_index(candidates.len());
    candidates.get(idx).copied()
}

fn calculate_random_move<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    pick_random(&board.available_moves(), rng)
}

/// Perfect play: scores every reply with a full-depth search and keeps the
/// lowest index among the best.
pub fn calculate_minimax_move(input: &BotInput) -> Option<usize> {
    let mut board = input.board;
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in input.board.available_moves() {
        board.set(index, input.bot_mark);
        let score = minimax(&mut board, 1, false, input.bot_mark, input.human_mark, i32::MIN, i32::MAX);
        board.set(index, Mark::Empty);

        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    human_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    match evaluate(board) {
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
        outcome => {
            return if outcome.winner() == Some(bot_mark) {
                WIN_SCORE - depth
            } else {
                depth - WIN_SCORE
            };
        }
    }

    let moves = board.available_moves();

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in moves {
            board.set(index, bot_mark);
            let eval = minimax(board, depth + 1, false, bot_mark, human_mark, alpha, beta);
            board.set(index, Mark::Empty);

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in moves {
            board.set(index, human_mark);
            let eval = minimax(board, depth + 1, true, bot_mark, human_mark, alpha, beta);
            board.set(index, Mark::Empty);

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
