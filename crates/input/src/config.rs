//! Key-binding table.
//!
//! The table has five entries, `UP`, `LEFT`, `RIGHT`, `DOWN` and `DROP`, each
//! bound to one key. It can be loaded from a JSON object such as
//!
//! ```json
//! { "UP": "w", "LEFT": "a", "RIGHT": "d", "DOWN": "s", "DROP": "space" }
//! ```
//!
//! Missing entries keep their default. A file that cannot be read or parsed
//! falls back to the default table as a whole when loaded through
//! [`KeyBindings::load_or_default`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::types::Command;

/// Errors raised while loading a binding table
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read key bindings from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid key bindings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown key name {name:?} for {action}")]
    UnknownKey { action: &'static str, name: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct RawBindings {
    up: Option<String>,
    left: Option<String>,
    right: Option<String>,
    down: Option<String>,
    drop: Option<String>,
}

/// Keys bound to the five game commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Rotate
    pub up: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    /// Soft drop
    pub down: KeyCode,
    /// Hard drop
    pub drop: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: KeyCode::Up,
            left: KeyCode::Left,
            right: KeyCode::Right,
            down: KeyCode::Down,
            drop: KeyCode::Char('/'),
        }
    }
}

impl KeyBindings {
    /// Parse a JSON binding table; absent entries keep their default
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawBindings = serde_json::from_str(text)?;
        let defaults = Self::default();
        Ok(Self {
            up: resolve("UP", raw.up, defaults.up)?,
            left: resolve("LEFT", raw.left, defaults.left)?,
            right: resolve("RIGHT", raw.right, defaults.right)?,
            down: resolve("DOWN", raw.down, defaults.down)?,
            drop: resolve("DROP", raw.drop, defaults.drop)?,
        })
    }

    /// Read and parse a JSON binding table from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load `path` if given, falling back to the defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(bindings) => bindings,
            Err(err) => {
                warn!("{err}; using default key bindings");
                Self::default()
            }
        }
    }

    /// Command bound to `code`, checked in UP, LEFT, RIGHT, DOWN, DROP order
    pub fn command_for(&self, code: KeyCode) -> Option<Command> {
        if code == self.up {
            Some(Command::Rotate)
        } else if code == self.left {
            Some(Command::MoveLeft)
        } else if code == self.right {
            Some(Command::MoveRight)
        } else if code == self.down {
            Some(Command::SoftDrop)
        } else if code == self.drop {
            Some(Command::HardDrop)
        } else {
            None
        }
    }
}

fn resolve(
    action: &'static str,
    name: Option<String>,
    default: KeyCode,
) -> Result<KeyCode, ConfigError> {
    match name {
        None => {
            debug!("no binding for {action}, keeping {}", key_name(default));
            Ok(default)
        }
        Some(name) => parse_key(&name).ok_or(ConfigError::UnknownKey { action, name }),
    }
}

/// Parse a key name: `up`, `down`, `left`, `right`, `space`, `enter`, `tab`,
/// `esc`, `backspace`, or any single character.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(ch));
    }
    match name.to_lowercase().as_str() {
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "space" => Some(KeyCode::Char(' ')),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "esc" | "escape" => Some(KeyCode::Esc),
        "backspace" => Some(KeyCode::Backspace),
        _ => None,
    }
}

/// Display name of a key, the inverse of [`parse_key`] for the names it knows
pub fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Up => "up".into(),
        KeyCode::Down => "down".into(),
        KeyCode::Left => "left".into(),
        KeyCode::Right => "right".into(),
        KeyCode::Char(' ') => "space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".into(),
        KeyCode::Tab => "tab".into(),
        KeyCode::Esc => "esc".into(),
        KeyCode::Backspace => "backspace".into(),
        other => format!("{other:?}").to_lowercase(),
    }
}
