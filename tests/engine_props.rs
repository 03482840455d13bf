//! Property tests for occupancy, piece control and row clearing

use proptest::prelude::*;

use blockfall::core::{get_shape, Board, PiecePicker, PieceRule};
use blockfall::engine::Engine;
use blockfall::types::{CellTag, Command, PieceKind, Rotation};

const W: u16 = 10;
const H: u16 = 20;

fn board_from(filled: &[bool]) -> Board {
    let mut board = Board::new(W, H);
    for (i, &on) in filled.iter().enumerate() {
        if on {
            let (row, col) = ((i / W as usize) as i16, (i % W as usize) as i16);
            board.set_block(row, col, Some(CellTag::Piece(PieceKind::O)));
        }
    }
    board
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Rotate),
        Just(Command::MoveLeft),
        Just(Command::MoveRight),
        Just(Command::SoftDrop),
        Just(Command::HardDrop),
    ]
}

fn piece_cells(board: &Board) -> Vec<(i16, i16)> {
    let mut cells = Vec::new();
    for row in 0..board.height() as i16 {
        for col in 0..board.width() as i16 {
            if board.block_at(row, col).is_some() {
                cells.push((row, col));
            }
        }
    }
    cells
}

proptest! {
    #[test]
    fn is_occupied_matches_naive_check(
        filled in prop::collection::vec(prop::bool::weighted(0.3), (W * H) as usize),
        row in -4i16..24,
        col in -5i16..14,
        kind in 0usize..7,
        rot in 0usize..4,
    ) {
        let board = board_from(&filled);
        let kind = PieceKind::ALL[kind];
        let rotation = Rotation::from_index(rot);

        let expected = get_shape(kind, rotation).iter().any(|&(dx, dy)| {
            let (r, c) = (row + dy as i16, col + dx as i16);
            if c < 0 || c >= W as i16 || r >= H as i16 {
                true
            } else if r < 0 {
                false
            } else {
                filled[r as usize * W as usize + c as usize]
            }
        });

        prop_assert_eq!(board.is_occupied(row, col, kind, rotation), expected);
    }

    #[test]
    fn active_piece_is_always_on_the_board_exactly_once(
        seed in any::<u32>(),
        commands in prop::collection::vec(command(), 1..60),
    ) {
        let mut engine = Engine::new(Board::new(W, H), PiecePicker::new(seed, PieceRule::Uniform));
        prop_assert!(engine.start());

        for command in commands {
            engine.apply(command);
            let piece = engine.active().unwrap();
            let mut expected = piece.cells(engine.board()).to_vec();
            expected.sort();
            prop_assert_eq!(piece_cells(engine.board()), expected);
        }
    }

    #[test]
    fn clear_rows_removes_exactly_the_full_rows(
        rows in prop::collection::vec(
            prop_oneof![
                2 => Just(vec![true; W as usize]),
                3 => prop::collection::vec(any::<bool>(), W as usize),
            ],
            H as usize,
        ),
    ) {
        let filled: Vec<bool> = rows.iter().flatten().copied().collect();
        let mut engine = Engine::new(board_from(&filled), PiecePicker::new(1, PieceRule::Uniform));

        let full = rows.iter().filter(|r| r.iter().all(|&on| on)).count();
        prop_assert_eq!(engine.clear_rows() as usize, full);
        prop_assert_eq!(engine.cleared_rows() as usize, full);

        // Surviving rows keep their order and sink to the bottom.
        let survivors: Vec<&Vec<bool>> = rows.iter().filter(|r| !r.iter().all(|&on| on)).collect();
        let board = engine.board();
        for row in 0..H as usize {
            let expected: Vec<bool> = if row < full {
                vec![false; W as usize]
            } else {
                survivors[row - full].clone()
            };
            let actual: Vec<bool> = (0..W as i16)
                .map(|col| board.block_at(row as i16, col).is_some())
                .collect();
            prop_assert_eq!(actual, expected, "row {}", row);
        }
    }
}
