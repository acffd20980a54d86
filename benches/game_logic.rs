use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use match_three::core::{Board, Position, TileBag};
use match_three::types::TileKind;

fn fresh_board(seed: u32) -> Board<TileKind, TileBag<TileKind>> {
    let bag = TileBag::new(TileKind::palette(5), seed).unwrap();
    Board::new(bag, 8, 8).unwrap()
}

fn bench_check_matches(c: &mut Criterion) {
    let board = fresh_board(12345);

    c.bench_function("check_matches_8x8", |b| {
        b.iter(|| black_box(board.check_matches().unwrap()))
    });
}

fn bench_can_move(c: &mut Criterion) {
    let mut board = fresh_board(12345);

    c.bench_function("can_move_adjacent", |b| {
        b.iter(|| {
            board
                .can_move(black_box(Position::new(3, 3)), black_box(Position::new(3, 4)))
                .unwrap()
        })
    });
}

fn bench_find_move(c: &mut Criterion) {
    let mut board = fresh_board(12345);

    c.bench_function("find_move_8x8", |b| {
        b.iter(|| black_box(board.find_move().unwrap()))
    });
}

fn bench_try_move(c: &mut Criterion) {
    // Pick a seed whose opening board has a legal swap.
    let (seed, swap) = (1..100)
        .find_map(|seed| fresh_board(seed).find_move().unwrap().map(|swap| (seed, swap)))
        .unwrap();

    c.bench_function("try_move_cascade", |b| {
        b.iter_batched(
            || fresh_board(seed),
            |mut board| board.try_move(swap.0, swap.1).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_check_matches,
    bench_can_move,
    bench_find_move,
    bench_try_move
);
criterion_main!(benches);
