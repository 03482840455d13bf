//! Game loop tests on a paused tokio clock

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

use blockfall::core::{Board, PiecePicker, PieceRule};
use blockfall::engine::{run, Control, Engine, RunExit};
use blockfall::types::Command;

fn started(board: Board) -> Engine {
    let mut engine = Engine::new(board, PiecePicker::new(11, PieceRule::Bag));
    assert!(engine.start());
    engine
}

/// Send `controls` one after another, each after its delay
fn script(
    tx: mpsc::UnboundedSender<Control>,
    controls: Vec<(u64, Control)>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        for (delay_ms, control) in controls {
            sleep(Duration::from_millis(delay_ms)).await;
            if tx.send(control).is_err() {
                return;
            }
        }
    })
}

#[tokio::test(start_paused = true)]
async fn gravity_fires_every_drop_interval() {
    let mut engine = started(Board::new(10, 20));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let feeder = script(tx, vec![(1250, Control::Quit)]);

    assert_eq!(run(&mut engine, &mut rx).await, RunExit::Quit);
    feeder.await.unwrap();

    // Ticks at 500ms and 1000ms.
    assert_eq!(engine.active().unwrap().row, 2);
}

#[tokio::test(start_paused = true)]
async fn commands_apply_between_ticks() {
    let mut engine = started(Board::new(10, 20));
    let col = engine.active().unwrap().col;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let feeder = script(
        tx,
        vec![
            (100, Control::Command(Command::MoveRight)),
            (100, Control::Command(Command::SoftDrop)),
            (100, Control::Quit),
        ],
    );

    assert_eq!(run(&mut engine, &mut rx).await, RunExit::Quit);
    feeder.await.unwrap();

    let piece = engine.active().unwrap();
    assert_eq!(piece.col, col + 1);
    assert_eq!(piece.row, 1);
}

#[tokio::test(start_paused = true)]
async fn pause_stops_gravity_until_resumed() {
    let mut engine = started(Board::new(10, 20));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let feeder = script(
        tx,
        vec![
            (0, Control::TogglePause),
            (5000, Control::TogglePause),
            (700, Control::Quit),
        ],
    );

    assert_eq!(run(&mut engine, &mut rx).await, RunExit::Quit);
    feeder.await.unwrap();

    // Only the tick 500ms after resuming.
    assert_eq!(engine.active().unwrap().row, 1);
    assert!(!engine.paused());
}

#[tokio::test(start_paused = true)]
async fn game_over_stops_gravity_and_restart_resumes() {
    let rows = ["..........", "..........", "##########", "##########"];
    let mut engine = started(Board::from_rows(&rows));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let feeder = script(
        tx,
        vec![(3000, Control::Command(Command::MoveLeft)), (10, Control::Quit)],
    );

    assert_eq!(run(&mut engine, &mut rx).await, RunExit::Quit);
    feeder.await.unwrap();
    assert!(engine.is_game_over());
    assert!(engine.active().is_none());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let feeder = script(tx, vec![(0, Control::Restart), (600, Control::Quit)]);
    assert_eq!(run(&mut engine, &mut rx).await, RunExit::Quit);
    feeder.await.unwrap();

    // Restart clears the obstacles too, so the new piece falls freely.
    assert!(!engine.is_game_over());
    assert_eq!(engine.active().unwrap().row, 1);
}

#[tokio::test(start_paused = true)]
async fn closed_channel_ends_the_loop() {
    let mut engine = started(Board::new(10, 20));
    let (tx, mut rx) = mpsc::unbounded_channel::<Control>();
    drop(tx);

    assert_eq!(run(&mut engine, &mut rx).await, RunExit::Disconnected);
}
