//! Terminal runner (default binary).
//!
//! Owns the terminal, wires key presses through the input mapper into the
//! engine's control channel, and lets the scheduler drive gravity.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use log::info;
use tokio::sync::mpsc;

use blockfall::core::{Board, PiecePicker, PieceRule};
use blockfall::engine::{run, Control, Engine};
use blockfall::input::{
    host_key, key_name, spawn_terminal_reader, HostKey, InputMapper, KeyBindings, KeyBus,
    KeySource,
};
use blockfall::term::{GameView, TermDisplay, TerminalRenderer};
use blockfall::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle game in the terminal.",
    long_about = "Falling-block puzzle game in the terminal.\n\n\
        Steer falling pieces, fill rows to clear them; gravity speeds up every 10 rows.\n\n\
        CONTROLS (default):\n  Left/Right  Move    Up  Rotate    Down  Soft drop    /  Hard drop\n  \
        p  Pause    r  Restart    q / Esc  Quit\n\n\
        Set RUST_LOG and redirect stderr to a file to capture logs."
)]
struct Args {
    /// Board width in columns.
    #[arg(long, default_value_t = BOARD_WIDTH, value_parser = clap::value_parser!(u16).range(6..=64))]
    width: u16,

    /// Board height in rows.
    #[arg(long, default_value_t = BOARD_HEIGHT, value_parser = clap::value_parser!(u16).range(4..=64))]
    height: u16,

    /// Seed for the piece sequence (defaults to the clock).
    #[arg(long)]
    seed: Option<u32>,

    /// Deal pieces from shuffled bags of seven instead of uniformly.
    #[arg(long)]
    bag: bool,

    /// JSON key-binding table with UP, LEFT, RIGHT, DOWN and DROP entries.
    #[arg(long, value_name = "FILE")]
    keys: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // Raw mode and the alternate screen are process-wide; the board's display
    // draws through its own renderer.
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = play(args).await;

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

async fn play(args: Args) -> Result<()> {
    let bindings = KeyBindings::load_or_default(args.keys.as_deref());
    let seed = args.seed.unwrap_or_else(clock_seed);
    let rule = if args.bag {
        PieceRule::Bag
    } else {
        PieceRule::Uniform
    };
    info!(
        "starting {}x{} board, seed {}, {:?} pieces",
        args.width, args.height, seed, rule
    );

    let mut bus = KeyBus::new();
    let reader = spawn_terminal_reader(bus.clone());
    let mut mapper = InputMapper::new(bindings, &mut bus);
    let mapper_id = mapper.listener_id();
    let mut host = bus.subscribe();
    let host_id = host.id;

    let (tx, mut rx) = mpsc::unbounded_channel();

    let command_tx = tx.clone();
    let commands = tokio::spawn(async move {
        while let Some(command) = mapper.recv().await {
            if command_tx.send(Control::Command(command)).is_err() {
                break;
            }
        }
    });
    let host_keys = tokio::spawn(async move {
        while let Some(press) = host.events.recv().await {
            let control = match host_key(&bindings, press) {
                Some(HostKey::Quit) => Control::Quit,
                Some(HostKey::Pause) => Control::TogglePause,
                Some(HostKey::Restart) => Control::Restart,
                None => continue,
            };
            if tx.send(control).is_err() {
                break;
            }
        }
    });

    let view = GameView::default().with_help(help_lines(&bindings));
    let board = Board::with_display(args.width, args.height, Box::new(TermDisplay::new(view)));
    let mut engine = Engine::new(board, PiecePicker::new(seed, rule));
    engine.start();

    let exit = run(&mut engine, &mut rx).await;
    info!(
        "leaving ({:?}) after {} cleared rows",
        exit,
        engine.cleared_rows()
    );

    if let Some(id) = mapper_id {
        bus.unsubscribe(id);
    }
    bus.unsubscribe(host_id);
    commands.abort();
    host_keys.abort();
    reader.stop();
    Ok(())
}

fn help_lines(bindings: &KeyBindings) -> Vec<String> {
    vec![
        format!("{:<6} rotate", key_name(bindings.up)),
        format!("{:<6} left", key_name(bindings.left)),
        format!("{:<6} right", key_name(bindings.right)),
        format!("{:<6} down", key_name(bindings.down)),
        format!("{:<6} drop", key_name(bindings.drop)),
        "p      pause".to_string(),
        "r      restart".to_string(),
        "q      quit".to_string(),
    ]
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
