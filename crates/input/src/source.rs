//! Key event sources.
//!
//! A [`KeySource`] hands out listeners; each listener receives every key press
//! published after it subscribed, on its own channel, until it unsubscribes.
//! [`KeyBus`] is the in-process implementation; [`spawn_terminal_reader`]
//! feeds one from crossterm.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use tokio::sync::mpsc;

pub type ListenerId = u64;

/// A key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(key: KeyEvent) -> Self {
        Self {
            code: key.code,
            modifiers: key.modifiers,
        }
    }
}

/// Registered listener: its id and the channel it receives presses on
#[derive(Debug)]
pub struct Listener {
    pub id: ListenerId,
    pub events: mpsc::UnboundedReceiver<KeyPress>,
}

/// Something that delivers key presses to registered listeners
pub trait KeySource {
    fn subscribe(&mut self) -> Listener;
    fn unsubscribe(&mut self, id: ListenerId);
}

#[derive(Debug, Default)]
struct BusInner {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, mpsc::UnboundedSender<KeyPress>)>,
}

/// Fan-out of key presses to every listener
///
/// Clones share the same listener table.
#[derive(Debug, Clone, Default)]
pub struct KeyBus {
    inner: Arc<Mutex<BusInner>>,
}

impl KeyBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BusInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver `press` to every listener; returns how many received it
    ///
    /// Listeners whose receiver was dropped are forgotten.
    pub fn publish(&self, press: KeyPress) -> usize {
        let mut inner = self.lock();
        inner
            .listeners
            .retain(|(_, tx)| tx.send(press).is_ok());
        inner.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

impl KeySource for KeyBus {
    fn subscribe(&mut self) -> Listener {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listeners.push((id, tx));
        debug!("key listener {id} subscribed");
        Listener { id, events: rx }
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.lock().listeners.retain(|(lid, _)| *lid != id);
        debug!("key listener {id} unsubscribed");
    }
}

/// Background thread publishing terminal key presses to a [`KeyBus`]
///
/// Stops when dropped.
pub struct TerminalReader {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

/// Start reading crossterm key events into `bus`
///
/// Only presses are published; repeats and releases are dropped.
pub fn spawn_terminal_reader(bus: KeyBus) -> TerminalReader {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    let handle = thread::spawn(move || {
        while !flag.load(Ordering::Relaxed) {
            match event::poll(Duration::from_millis(50)) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(err) => {
                    warn!("terminal poll failed: {err}");
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    bus.publish(KeyPress::from(key));
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("terminal read failed: {err}");
                    break;
                }
            }
        }
    });
    TerminalReader {
        stop,
        handle: Some(handle),
    }
}

impl TerminalReader {
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TerminalReader {
    fn drop(&mut self) {
        self.shutdown();
    }
}
