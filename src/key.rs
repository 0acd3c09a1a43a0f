//! Key bindings with help metadata, matched against [`bubbletea_rs::KeyMsg`].

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// Help metadata for a key binding: the key label and what it does.
#[derive(Debug, Clone, Default)]
pub struct Help {
    /// Display label for the keys, e.g. `"←/h"`.
    pub key: String,
    /// What the binding does, e.g. `"prev page"`.
    pub desc: String,
}

/// A single action bound to one or more keys.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The keys that trigger the action.
    pub keys: Vec<KeyCode>,
    /// Help metadata for help views.
    pub help: Help,
    /// Disabled bindings never match and are hidden from help.
    pub disabled: bool,
}

impl Binding {
    /// Creates a binding for the given keys, with empty help.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help label and description (builder).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Disables the binding (builder).
    pub fn with_disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Reports whether the key event triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        !self.disabled && self.keys.contains(&msg.key)
    }
}

/// Implemented by component key maps so help views can enumerate bindings.
pub trait KeyMap {
    /// Bindings for the compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
