use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tictactoe_engine::SessionRng;
use tictactoe_engine::tictactoe::{BotDifficulty, BotInput, Board, Mark, Outcome, calculate_move, evaluate};

fn play_out_round(difficulty: BotDifficulty, rng: &mut SessionRng) {
    let mut board = Board::new();
    let mut current_mark = Mark::X;

    while evaluate(&board) == Outcome::InProgress {
        let input = match BotInput::new(board, current_mark, current_mark.opponent().unwrap()) {
            Ok(input) => input,
            Err(_) => break,
        };
        match calculate_move(difficulty, &input, rng) {
            Some(index) => {
                board.place(index, current_mark).unwrap();
                current_mark = current_mark.opponent().unwrap();
            }
            None => break,
        }
    }
}

fn bench_heuristic_single_move_mid_game(c: &mut Criterion) {
    let board = Board::parse("X.. .O. ..X").unwrap();
    let input = BotInput::new(board, Mark::O, Mark::X).unwrap();
    let mut rng = SessionRng::new(1);
    c.bench_function("heuristic_single_move_mid_game", |b| {
        b.iter(|| calculate_move(BotDifficulty::Normal, black_box(&input), &mut rng))
    });
}

fn bench_minimax_single_move_empty_board(c: &mut Criterion) {
    let input = BotInput::new(Board::new(), Mark::X, Mark::O).unwrap();
    let mut rng = SessionRng::new(1);
    c.bench_function("minimax_single_move_empty_board", |b| {
        b.iter(|| calculate_move(BotDifficulty::Hard, black_box(&input), &mut rng))
    });
}

fn bench_full_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_round");
    let mut rng = SessionRng::new(7);
    group.bench_function("normal_vs_normal", |b| {
        b.iter(|| play_out_round(BotDifficulty::Normal, &mut rng))
    });
    group.bench_function("hard_vs_hard", |b| {
        b.iter(|| play_out_round(BotDifficulty::Hard, &mut rng))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_heuristic_single_move_mid_game,
    bench_minimax_single_move_empty_board,
    bench_full_rounds
);
criterion_main!(benches);
