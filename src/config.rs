// Configuration module
// Internal representation of engine settings

use std::collections::HashMap;

use crate::core::history::DEFAULT_HISTORY_LIMIT;
use crate::core::state::DEFAULT_TAB_WIDTH;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    /// Get boolean setting
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// Get integer setting
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    /// Get string setting
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Non-negative integer setting, or `default` when unset or mistyped
    fn get_usize(&self, key: &str, default: usize) -> usize {
        self.get_int(key)
            .and_then(|i| usize::try_from(i).ok())
            .unwrap_or(default)
    }

    /// Maximum number of undo entries kept
    pub fn history_limit(&self) -> usize {
        self.get_usize("history_limit", DEFAULT_HISTORY_LIMIT).max(1)
    }

    pub fn tab_width(&self) -> usize {
        self.get_usize("tab_width", DEFAULT_TAB_WIDTH).max(1)
    }

    /// Soft-wrap width hint; 0 means no wrapping
    pub fn wrap_width(&self) -> usize {
        self.get_usize("wrap_width", 0)
    }

    pub fn yank_highlight(&self) -> bool {
        self.get_bool("yank_highlight").unwrap_or(true)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}
