//! Board invariants checked over generated boards

use proptest::prelude::*;
use tstack::game::piece::{Point, Shape, DIRECTION_COUNT, SHAPE_COUNT};
use tstack::{Board, ShapeCatalog};

const W: usize = 6;
const H: usize = 8;

fn dot() -> Shape {
    Shape::new([Point::new(0, 0); 4])
}

// Builds a board from per-row fill masks; a mask of all ones makes a full row
fn board_from(rows: &[Vec<u8>]) -> Board {
    let mut board = Board::new(W, rows.len());
    for (y, row) in rows.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell != 0 {
                board.add_shape(&dot(), x as i32, y as i32, cell);
            }
        }
    }
    board
}

fn row_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(0u8..=4, W),
        prop::collection::vec(1u8..=4, W),
    ]
}

proptest! {
    #[test]
    fn full_rows_are_exactly_rows_without_gaps(rows in prop::collection::vec(row_strategy(), H)) {
        let board = board_from(&rows);
        let expected: Vec<usize> = (0..H).filter(|&y| rows[y].iter().all(|&c| c != 0)).collect();
        prop_assert_eq!(board.find_full_rows(), expected);
    }

    #[test]
    fn remove_full_rows_keeps_order_and_pads_top(rows in prop::collection::vec(row_strategy(), H)) {
        let mut board = board_from(&rows);
        let kept: Vec<Vec<u8>> = rows.iter().filter(|r| r.iter().any(|&c| c == 0)).cloned().collect();
        let removed = H - kept.len();

        prop_assert_eq!(board.remove_full_rows(), removed);

        for y in 0..removed {
            prop_assert!(board.row(y).iter().all(|&c| c == 0));
        }
        for (i, row) in kept.iter().enumerate() {
            prop_assert_eq!(board.row(removed + i), row.as_slice());
        }

        // nothing left to remove the second time
        let after = board.clone();
        prop_assert_eq!(board.remove_full_rows(), 0);
        prop_assert_eq!(board, after);
    }

    #[test]
    fn can_put_matches_brute_force(
        rows in prop::collection::vec(prop::collection::vec(0u8..=1, W), H),
        shape_type in 0..SHAPE_COUNT,
        direction in 0..DIRECTION_COUNT,
    ) {
        let board = board_from(&rows);
        let catalog = ShapeCatalog::new();
        let shape = catalog.get(shape_type, direction);

        for y in -4..(H as i32 + 1) {
            for x in -4..(W as i32 + 1) {
                let fits = shape.blocks_at(x, y).all(|(bx, by)| {
                    bx >= 0 && by >= 0 && (bx as usize) < W && (by as usize) < H
                        && rows[by as usize][bx as usize] == 0
                });
                prop_assert_eq!(board.can_put(shape, x, y), fits, "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn add_shape_after_can_put_marks_four_cells(
        shape_type in 0..SHAPE_COUNT,
        direction in 0..DIRECTION_COUNT,
        x in 0i32..W as i32,
        y in 0i32..H as i32,
        color in 1u8..=4,
    ) {
        let catalog = ShapeCatalog::new();
        let shape = catalog.get(shape_type, direction);
        let mut board = Board::new(W, H);
        prop_assume!(board.can_put(shape, x, y));

        board.add_shape(shape, x, y, color);
        let filled = board.rows().flatten().filter(|&&c| c == color).count();
        prop_assert_eq!(filled, 4);
        prop_assert!(!board.can_put(shape, x, y));
    }
}

#[test]
fn single_row_fill_clears_bottom_row() {
    let catalog = ShapeCatalog::new();
    // shape 2 turned once is the flat 4-wide line
    let line = catalog.get(2, 1);
    assert_eq!((line.width(), line.height()), (4, 1));

    let mut board = Board::new(10, 20);
    for x in [0, 4] {
        assert!(board.can_put(line, x, 19));
        board.add_shape(line, x, 19, 1);
    }
    assert!(board.find_full_rows().is_empty());
    board.add_shape(&dot(), 8, 19, 2);
    board.add_shape(&dot(), 9, 19, 3);

    assert_eq!(board.find_full_rows(), vec![19]);
    assert_eq!(board.remove_full_rows(), 1);
    assert!(board.rows().all(|row| row.iter().all(|&c| c == 0)));
}
