//! Diagnostic rendering for logging several values on one line

use std::hash::Hash;

use serde::Serialize;

use crate::counter::{Count, Counter};
use crate::rich_map::RichMap;

/// Human-readable rendering used in diagnostics
pub trait DebugRepr {
    fn debug(&self) -> String;
}

impl<K: Eq + Hash + Serialize, V: Serialize> DebugRepr for RichMap<K, V> {
    fn debug(&self) -> String {
        self.to_string()
    }
}

impl<K: Eq + Hash + Serialize, C: Count + Serialize> DebugRepr for Counter<K, C> {
    fn debug(&self) -> String {
        self.to_string()
    }
}

impl DebugRepr for serde_json::Value {
    fn debug(&self) -> String {
        self.to_string()
    }
}

/// Strings render JSON-quoted
impl DebugRepr for &str {
    fn debug(&self) -> String {
        serde_json::Value::from(*self).to_string()
    }
}

impl DebugRepr for String {
    fn debug(&self) -> String {
        self.as_str().debug()
    }
}

/// Renderings of `items` joined by single spaces
pub fn debug_line(items: &[&dyn DebugRepr]) -> String {
    items
        .iter()
        .map(|item| item.debug())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Emit [`debug_line`] at `debug` level
pub fn log_debug(items: &[&dyn DebugRepr]) {
    tracing::debug!("{}", debug_line(items));
}
