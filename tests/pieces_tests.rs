//! Piece catalog tests

use std::collections::HashSet;

use blockfall::core::{get_shape, shape_at, spawn_col, SPAWN_ROW};
use blockfall::types::{PieceKind, Rotation};

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

#[test]
fn test_every_state_has_four_distinct_minos() {
    for kind in PieceKind::ALL {
        for rot in ROTATIONS {
            let shape = get_shape(kind, rot);
            let unique: HashSet<_> = shape.iter().collect();
            assert_eq!(unique.len(), 4, "{kind:?} {rot:?}");
        }
    }
}

#[test]
fn test_shapes_fit_the_4x4_box() {
    for kind in PieceKind::ALL {
        for rot in ROTATIONS {
            for (dx, dy) in get_shape(kind, rot) {
                assert!((0..4).contains(&dx), "{kind:?} {rot:?} dx={dx}");
                assert!((0..4).contains(&dy), "{kind:?} {rot:?} dy={dy}");
            }
        }
    }
}

#[test]
fn test_o_is_rotation_invariant() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rot in ROTATIONS {
        assert_eq!(get_shape(PieceKind::O, rot), north);
    }
}

#[test]
fn test_i_states() {
    assert_eq!(
        get_shape(PieceKind::I, Rotation::North),
        [(0, 1), (1, 1), (2, 1), (3, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::East),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
}

#[test]
fn test_shape_at_wraps_index() {
    for kind in PieceKind::ALL {
        assert_eq!(shape_at(kind, 0), shape_at(kind, 4));
        assert_eq!(shape_at(kind, 3), get_shape(kind, Rotation::West));
        assert_eq!(shape_at(kind, 1), get_shape(kind, Rotation::East));
    }
}

#[test]
fn test_four_clockwise_turns_return_to_start() {
    let mut rot = Rotation::North;
    for _ in 0..4 {
        rot = rot.rotate_cw();
    }
    assert_eq!(rot, Rotation::North);
}

#[test]
fn test_spawn_position() {
    assert_eq!(SPAWN_ROW, 0);
    assert_eq!(spawn_col(10), 4);
    assert_eq!(spawn_col(12), 5);
    assert_eq!(spawn_col(7), 2);
}

#[test]
fn test_north_states_share_center_mino() {
    // Pieces spawned on top of each other always collide.
    for kind in PieceKind::ALL {
        assert!(get_shape(kind, Rotation::North).contains(&(1, 1)), "{kind:?}");
    }
}
