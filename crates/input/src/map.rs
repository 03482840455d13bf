//! Key mapping from key presses to game commands.

use crossterm::event::{KeyCode, KeyModifiers};
use log::debug;

use crate::config::KeyBindings;
use crate::source::{KeyPress, KeySource, Listener, ListenerId};
use crate::types::Command;

/// What happened to a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Bound to a command; the key's default action is suppressed
    Consumed(Command),
    /// Not bound; left alone
    Ignored,
}

/// Keys the host handles itself, outside the binding table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    Quit,
    Pause,
    Restart,
}

/// Routes key presses from a [`KeySource`] to game commands
#[derive(Debug)]
pub struct InputMapper {
    bindings: KeyBindings,
    listener: Option<Listener>,
}

impl InputMapper {
    /// Register with `source` and start translating its presses
    pub fn new<S: KeySource + ?Sized>(bindings: KeyBindings, source: &mut S) -> Self {
        let listener = source.subscribe();
        debug!("input mapper attached as listener {}", listener.id);
        Self {
            bindings,
            listener: Some(listener),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Listener id while attached
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.listener.as_ref().map(|l| l.id)
    }

    /// Deregister from `source`; later presses are no longer seen
    pub fn detach<S: KeySource + ?Sized>(&mut self, source: &mut S) {
        if let Some(listener) = self.listener.take() {
            source.unsubscribe(listener.id);
        }
    }

    /// Command bound to a press
    ///
    /// Presses carrying Ctrl or Alt never map, so host shortcuts stay free.
    pub fn translate(&self, press: KeyPress) -> Option<Command> {
        bound_command(&self.bindings, press)
    }

    pub fn handle(&self, press: KeyPress) -> KeyOutcome {
        match self.translate(press) {
            Some(command) => KeyOutcome::Consumed(command),
            None => KeyOutcome::Ignored,
        }
    }

    /// Next pending command without waiting; unbound presses are skipped
    pub fn try_recv(&mut self) -> Option<Command> {
        loop {
            let press = self.listener.as_mut()?.events.try_recv().ok()?;
            if let KeyOutcome::Consumed(command) = self.handle(press) {
                return Some(command);
            }
        }
    }

    /// Wait for the next bound press
    ///
    /// Returns `None` once detached or when the source goes away.
    pub async fn recv(&mut self) -> Option<Command> {
        loop {
            let press = self.listener.as_mut()?.events.recv().await?;
            if let KeyOutcome::Consumed(command) = self.handle(press) {
                return Some(command);
            }
        }
    }
}

fn bound_command(bindings: &KeyBindings, press: KeyPress) -> Option<Command> {
    if press
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    bindings.command_for(press.code)
}

/// Host-level keys: `q`/`Esc`/`Ctrl-C` quit, `p` pauses, `r` restarts.
///
/// A press that `bindings` maps to a game command belongs to the game, so
/// rebinding `r` or `q` takes it away from the host. `Ctrl-C` always quits.
pub fn host_key(bindings: &KeyBindings, press: KeyPress) -> Option<HostKey> {
    if press.code == KeyCode::Char('c') && press.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(HostKey::Quit);
    }
    if bound_command(bindings, press).is_some() {
        return None;
    }
    match press.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(HostKey::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(HostKey::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostKey::Restart),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::KeyBus;

    fn mapper() -> (KeyBus, InputMapper) {
        let mut bus = KeyBus::new();
        let mapper = InputMapper::new(KeyBindings::default(), &mut bus);
        (bus, mapper)
    }

    #[test]
    fn test_default_bindings() {
        let (_bus, m) = mapper();
        let t = |code| m.translate(KeyPress::new(code));
        assert_eq!(t(KeyCode::Up), Some(Command::Rotate));
        assert_eq!(t(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(t(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(t(KeyCode::Down), Some(Command::SoftDrop));
        assert_eq!(t(KeyCode::Char('/')), Some(Command::HardDrop));
        assert_eq!(t(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_modified_keys_do_not_map() {
        let (_bus, m) = mapper();
        let press = KeyPress {
            code: KeyCode::Left,
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(m.handle(press), KeyOutcome::Ignored);
    }

    #[test]
    fn test_try_recv_skips_unbound() {
        let (bus, mut m) = mapper();
        bus.publish(KeyPress::new(KeyCode::Char('x')));
        bus.publish(KeyPress::new(KeyCode::Down));
        assert_eq!(m.try_recv(), Some(Command::SoftDrop));
        assert_eq!(m.try_recv(), None);
    }

    #[test]
    fn test_host_keys() {
        let keys = KeyBindings::default();
        let host = |code| host_key(&keys, KeyPress::new(code));
        assert_eq!(host(KeyCode::Char('q')), Some(HostKey::Quit));
        assert_eq!(host(KeyCode::Esc), Some(HostKey::Quit));
        assert_eq!(
            host_key(
                &keys,
                KeyPress {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL
                }
            ),
            Some(HostKey::Quit)
        );
        assert_eq!(host(KeyCode::Char('p')), Some(HostKey::Pause));
        assert_eq!(host(KeyCode::Char('r')), Some(HostKey::Restart));
        assert_eq!(host(KeyCode::Char('c')), None);
    }

    #[test]
    fn test_bound_keys_are_not_host_keys() {
        let keys = KeyBindings {
            drop: KeyCode::Char('r'),
            down: KeyCode::Esc,
            ..KeyBindings::default()
        };
        let host = |code| host_key(&keys, KeyPress::new(code));
        assert_eq!(host(KeyCode::Char('r')), None);
        assert_eq!(host(KeyCode::Esc), None);
        assert_eq!(host(KeyCode::Char('R')), Some(HostKey::Restart));
        assert_eq!(host(KeyCode::Char('q')), Some(HostKey::Quit));
        assert_eq!(
            host_key(
                &keys,
                KeyPress {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL
                }
            ),
            Some(HostKey::Quit)
        );
    }
}
