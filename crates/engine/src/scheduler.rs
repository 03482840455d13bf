//! Gravity scheduling and the single-owner game loop.
//!
//! The engine lives on one task. Gravity is a deadline that is re-armed after
//! every tick with the current drop interval, and only while the game runs
//! (started, not paused, not over). Stopping gravity means not re-arming it;
//! nothing is ever interrupted mid-operation.
//!
//! Everything else reaches the engine as a [`Control`] message on an mpsc
//! channel, so key handling and gravity never interleave.

use std::future;

use log::{debug, info};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};

use crate::engine::{Engine, TickOutcome};
use crate::types::Command;

/// Message delivered to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Command(Command),
    TogglePause,
    Restart,
    Quit,
}

/// Why [`run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// A [`Control::Quit`] arrived
    Quit,
    /// Every sender was dropped
    Disconnected,
}

/// Deadline of the next automatic tick
#[derive(Debug, Default, Clone, Copy)]
pub struct GravityTimer {
    deadline: Option<Instant>,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm a fresh deadline when the engine runs and none is pending; disarm otherwise
    pub fn sync(&mut self, engine: &Engine, now: Instant) {
        if !engine.is_running() {
            self.deadline = None;
        } else if self.deadline.is_none() {
            self.deadline = Some(now + interval(engine));
        }
    }

    /// Replace the deadline after a tick or restart
    pub fn reschedule(&mut self, engine: &Engine, now: Instant) {
        self.deadline = engine.is_running().then(|| now + interval(engine));
    }
}

fn interval(engine: &Engine) -> Duration {
    Duration::from_millis(engine.drop_interval_ms() as u64)
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}

/// Drive `engine` until a quit message arrives or the channel closes
///
/// The engine should already be started; a game that has ended keeps the loop
/// alive (for a restart) but never re-arms gravity.
pub async fn run(engine: &mut Engine, controls: &mut mpsc::UnboundedReceiver<Control>) -> RunExit {
    let mut timer = GravityTimer::new();

    loop {
        timer.sync(engine, Instant::now());

        tokio::select! {
            _ = wait_for(timer.deadline()) => {
                let outcome = engine.tick();
                if outcome == TickOutcome::GameOver {
                    info!("gravity stopped: game over");
                }
                timer.reschedule(engine, Instant::now());
            }
            msg = controls.recv() => {
                match msg {
                    None => return RunExit::Disconnected,
                    Some(Control::Quit) => return RunExit::Quit,
                    Some(Control::Command(command)) => {
                        engine.apply(command);
                    }
                    Some(Control::TogglePause) => engine.toggle_pause(),
                    Some(Control::Restart) => {
                        engine.restart();
                        timer.reschedule(engine, Instant::now());
                    }
                }
            }
        }
        debug!("next gravity deadline: {:?}", timer.deadline());
    }
}
