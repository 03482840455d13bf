use blockfall::core::{Frame, Status};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{Cell, CellTag, PieceKind};

fn empty_cells() -> Vec<Cell> {
    vec![None; 10 * 20]
}

fn line(fb: &FrameBuffer, y: u16) -> String {
    fb.row(y).iter().map(|g| g.ch).collect()
}

fn frame<'a>(cells: &'a [Cell], status: &'a Status) -> Frame<'a> {
    Frame {
        width: 10,
        height: 20,
        cells,
        status,
    }
}

#[test]
fn term_view_renders_border_corners() {
    let cells = empty_cells();
    let status = Status::default();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    assert_eq!(view.frame_size(10, 20), (22, 22));
    let fb = view.render(&frame(&cells, &status), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
    assert_eq!(fb.get(1, 1).unwrap().ch, '·');
}

#[test]
fn term_view_renders_piece_cell_as_two_chars_wide() {
    let mut cells = empty_cells();
    cells[19 * 10] = Some(CellTag::Piece(PieceKind::I));
    cells[19 * 10 + 9] = Some(CellTag::Obstacle);
    let status = Status::default();

    let fb = GameView::default().render(&frame(&cells, &status), Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let y0 = 1 + 19;
    assert_eq!(fb.get(1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(2, y0).unwrap().ch, '█');
    assert!(fb.get(1, y0).unwrap().style.bold);
    assert_eq!(fb.get(3, y0).unwrap().ch, '·');
    assert_eq!(fb.get(19, y0).unwrap().ch, '▒');
    assert_eq!(fb.get(20, y0).unwrap().ch, '▒');
}

#[test]
fn term_view_side_panel_shows_status() {
    let cells = empty_cells();
    let status = Status {
        next: Some(PieceKind::T),
        cleared_rows: 37,
        drop_interval_ms: 470,
        paused: false,
        game_over: false,
    };
    let view = GameView::default().with_help(vec!["up     rotate".to_string()]);

    // Playfield centered in 60 columns starts at x=19; panel at 19+22+2.
    let fb = view.render(&frame(&cells, &status), Viewport::new(60, 22));
    let panel = |y: u16| {
        let text: String = fb.row(y)[43..].iter().map(|g| g.ch).collect();
        text.trim_end().to_string()
    };

    assert_eq!(fb.get(19, 0).unwrap().ch, '┌');
    assert_eq!(panel(0), "NEXT");
    assert_eq!(panel(1), "T");
    assert_eq!(panel(3), "LINES");
    assert_eq!(panel(4), "37");
    assert_eq!(panel(6), "SPEED");
    assert_eq!(panel(7), "470ms");
    assert_eq!(panel(9), "CONTROLS");
    assert_eq!(panel(10), "up     rotate");
}

#[test]
fn term_view_skips_panel_when_narrow() {
    let cells = empty_cells();
    let status = Status {
        next: Some(PieceKind::O),
        ..Status::default()
    };
    let fb = GameView::default().render(&frame(&cells, &status), Viewport::new(30, 22));
    assert!((0..22).all(|y| !line(&fb, y).contains("NEXT")));
}

#[test]
fn term_view_overlays_game_over_and_pause() {
    let cells = empty_cells();
    let view = GameView::default();

    let over = Status {
        game_over: true,
        paused: true,
        ..Status::default()
    };
    let fb = view.render(&frame(&cells, &over), Viewport::new(22, 22));
    assert!(line(&fb, 11).contains("GAME OVER"));

    let paused = Status {
        paused: true,
        ..Status::default()
    };
    let fb = view.render(&frame(&cells, &paused), Viewport::new(22, 22));
    assert!(line(&fb, 11).contains("PAUSED"));
    assert!(!line(&fb, 11).contains("GAME OVER"));
}
