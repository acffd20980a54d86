//! Board tests - engine behaviour through the public API

use std::cell::RefCell;
use std::rc::Rc;

use match_three::core::{Board, BoardEvent, Cycle, Generator, Position, TileBag};
use match_three::types::TileKind;

fn recorder<T, G>(board: &mut Board<T, G>) -> Rc<RefCell<Vec<BoardEvent<T>>>>
where
    T: Clone + PartialEq + 'static,
    G: Generator<T>,
{
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    board.add_listener(move |event: &BoardEvent<T>| sink.borrow_mut().push(event.clone()));
    events
}

fn random_board(seed: u32) -> Board<TileKind, TileBag<TileKind>> {
    let bag = TileBag::new(TileKind::palette(4), seed).unwrap();
    Board::new(bag, 7, 6).unwrap()
}

#[test]
fn test_board_full_after_construction() {
    for seed in 1..20 {
        let board = random_board(seed);
        assert_eq!(board.positions().count(), 42);
        for p in board.positions() {
            assert!(board.piece(p).is_some(), "seed {} cell {:?} empty", seed, p);
        }
    }
}

#[test]
fn test_positions_row_major_and_stable() {
    let board = random_board(1);
    let first: Vec<Position> = board.positions().collect();
    let second: Vec<Position> = board.positions().collect();
    assert_eq!(first, second);
    assert_eq!(first[0], Position::new(0, 0));
    assert_eq!(first[1], Position::new(0, 1));
    assert_eq!(first[7], Position::new(1, 0));
    assert!(first.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_piece_out_of_bounds() {
    let board = random_board(3);
    assert_eq!(board.piece(Position::new(6, 0)), None);
    assert_eq!(board.piece(Position::new(0, 7)), None);
    assert!(board.piece(Position::new(5, 6)).is_some());
}

#[test]
fn test_can_move_never_mutates() {
    let mut board = random_board(11);
    let before = board.cells().to_vec();
    let positions: Vec<Position> = board.positions().collect();

    for &a in &positions {
        for &b in &positions {
            board.can_move(a, b).unwrap();
        }
    }
    assert_eq!(board.cells(), before.as_slice());
}

#[test]
fn test_rejected_move_does_nothing() {
    let mut board = random_board(5);
    let events = recorder(&mut board);
    let before = board.cells().to_vec();

    let positions: Vec<Position> = board.positions().collect();
    let rejected = positions
        .iter()
        .flat_map(|&a| positions.iter().map(move |&b| (a, b)))
        .find(|&(a, b)| !board.can_move(a, b).unwrap());
    let (a, b) = rejected.expect("some swap must be illegal");

    assert!(!board.try_move(a, b).unwrap());
    assert_eq!(board.cells(), before.as_slice());
    assert!(events.borrow().is_empty());
}

#[test]
fn test_board_stable_after_every_move() {
    for seed in 1..30 {
        let mut board = random_board(seed);
        for _ in 0..5 {
            let Some((a, b)) = board.find_move().unwrap() else {
                break;
            };
            assert!(board.try_move(a, b).unwrap());
            assert!(board.check_matches().unwrap().is_empty(), "seed {}", seed);
            assert!(board.cells().iter().all(Option::is_some), "seed {}", seed);
        }
    }
}

#[test]
fn test_first_pass_matches_hold_matched_value() {
    for seed in 1..30 {
        let mut board = random_board(seed);
        let Some((a, b)) = board.find_move().unwrap() else {
            continue;
        };

        // The grid as the first cascade pass sees it: the swap applied.
        let mut swapped = board.snapshot();
        let tmp = swapped.rows[a.row][a.col];
        swapped.rows[a.row][a.col] = swapped.rows[b.row][b.col];
        swapped.rows[b.row][b.col] = tmp;

        let events = recorder(&mut board);
        board.try_move(a, b).unwrap();

        let events = events.borrow();
        let first_pass = events.iter().take_while(|e| !e.is_refill());
        let mut seen = 0;
        for event in first_pass {
            let m = event.as_match().unwrap();
            for p in m.positions {
                assert_eq!(swapped.rows[p.row][p.col], Some(m.matched));
            }
            seen += 1;
        }
        assert!(seen >= 1);
    }
}

#[test]
fn test_every_pass_ends_with_one_refill() {
    let (mut board, (a, b)) = (1..50)
        .find_map(|seed| {
            let mut board = random_board(seed);
            let swap = board.find_move().unwrap()?;
            Some((board, swap))
        })
        .expect("some seed has a legal move");
    let events = recorder(&mut board);
    board.try_move(a, b).unwrap();

    let events = events.borrow();
    assert!(events.last().unwrap().is_refill());
    // No two refills in a row: every pass reports at least one match first.
    assert!(events
        .windows(2)
        .all(|w| !(w[0].is_refill() && w[1].is_refill())));
    assert!(events[0].as_match().is_some());
}

/// Constant generator on a single line: every in-line swap keeps the run.
#[test]
fn test_constant_line_every_swap_is_legal() {
    let mut row = Board::<char, _>::new(|| 'x', 3, 1).unwrap();
    let mut column = Board::<char, _>::new(|| 'x', 1, 3).unwrap();

    for i in 0..3 {
        for j in 0..3 {
            assert!(row.can_move(Position::new(0, i), Position::new(0, j)).unwrap());
            assert!(column
                .can_move(Position::new(i, 0), Position::new(j, 0))
                .unwrap());
        }
    }
}

/// Two-value cycle with no opening run; one swap makes exactly one match.
#[test]
fn test_two_value_cycle_single_match() {
    // Rows "aaba" / "bbab" repeated: no 3-run in any row or column.
    let cycle = Cycle::new(vec!['a', 'a', 'b', 'a', 'b', 'b', 'a', 'b']).unwrap();
    let mut board = Board::new(cycle, 4, 4).unwrap();
    assert!(board.check_matches().unwrap().is_empty());

    let events = recorder(&mut board);
    assert!(board
        .try_move(Position::new(0, 2), Position::new(0, 3))
        .unwrap());

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    let m = events[0].as_match().unwrap();
    assert_eq!(m.matched, 'a');
    assert_eq!(
        m.positions,
        [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
    );
    assert!(events[1].is_refill());

    // The cycle wrapped, so the top row refills with "aab".
    let top: Vec<char> = (0..4)
        .map(|col| *board.piece(Position::new(0, col)).unwrap())
        .collect();
    assert_eq!(top, vec!['a', 'a', 'b', 'b']);
}

#[test]
fn test_out_of_bounds_pair_is_rejected_quietly() {
    let mut board = random_board(2);
    let before = board.cells().to_vec();

    assert!(!board
        .can_move(Position::new(0, 0), Position::new(0, 99))
        .unwrap());
    assert!(!board
        .can_move(Position::new(50, 1), Position::new(51, 1))
        .unwrap());
    assert_eq!(board.cells(), before.as_slice());
}
