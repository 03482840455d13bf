//! Terminal input (engine-facing).
//!
//! Maps key presses to [`crate::types::Command`] through a configurable binding
//! table. The mapper never binds to a global event stream: it registers with a
//! [`KeySource`] handed to it and can deregister again.

pub mod config;
pub mod map;
pub mod source;

pub use blockfall_types as types;

pub use config::{key_name, parse_key, ConfigError, KeyBindings};
pub use map::{host_key, HostKey, InputMapper, KeyOutcome};
pub use source::{spawn_terminal_reader, KeyBus, KeyPress, KeySource, Listener, ListenerId, TerminalReader};
