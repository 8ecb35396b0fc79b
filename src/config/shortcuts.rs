use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::action::ShortcutAction;
use crate::error::NavError;

/// Per-session Alt+key overrides. Actions without an override keep their
/// default key.
///
/// In TOML this is a flat table of action id to a one-character string:
///
/// ```toml
/// open_new_lot = "z"
/// save_all = "w"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutMap {
    overrides: BTreeMap<ShortcutAction, char>,
}

impl ShortcutMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: ShortcutAction, key: char) -> Self {
        self.set(action, key);
        self
    }

    pub fn set(&mut self, action: ShortcutAction, key: char) {
        self.overrides.insert(action, normalize(key));
    }

    pub fn get(&self, action: ShortcutAction) -> Option<char> {
        self.overrides.get(&action).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Override if present, otherwise the action's default key.
    pub fn effective_key(&self, action: ShortcutAction) -> char {
        self.get(action).unwrap_or_else(|| action.default_key())
    }

    /// Pairs of actions that end up on the same key. The first action of
    /// each pair shadows the second at dispatch.
    pub fn conflicts(&self) -> Vec<(ShortcutAction, ShortcutAction, char)> {
        let mut seen: BTreeMap<char, ShortcutAction> = BTreeMap::new();
        let mut clashes = Vec::new();
        for action in ShortcutAction::ALL {
            let key = self.effective_key(*action);
            match seen.get(&key) {
                Some(winner) => clashes.push((*winner, *action, key)),
                None => {
                    seen.insert(key, *action);
                }
            }
        }
        clashes
    }

    pub fn warn_conflicts(&self) {
        for (winner, shadowed, key) in self.conflicts() {
            tracing::warn!(
                "Shortcut Alt+{} is bound to both {} and {}; {} wins",
                key,
                winner,
                shadowed,
                winner
            );
        }
    }

    fn from_raw(raw: BTreeMap<String, String>) -> Result<Self, NavError> {
        let mut map = Self::new();
        for (action_id, value) in raw {
            let action: ShortcutAction = action_id.parse()?;
            let mut chars = value.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(key), None) => map.set(action, key),
                _ => {
                    return Err(NavError::InvalidShortcut {
                        action: action_id,
                        value,
                    })
                }
            }
        }
        Ok(map)
    }
}

fn normalize(key: char) -> char {
    key.to_lowercase().next().unwrap_or(key)
}

impl<'de> Deserialize<'de> for ShortcutMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for ShortcutMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(
            self.overrides
                .iter()
                .map(|(action, key)| (action.as_str(), key.to_string())),
        )
    }
}

/// Commented template written next to the main config on first run.
pub fn shortcuts_template() -> String {
    let mut out = String::from(
        "# Alt+key shortcut overrides. Uncomment a line to rebind an action;\n\
         # unlisted actions keep the default key shown.\n",
    );
    for action in ShortcutAction::ALL {
        out.push_str(&format!("# {} = \"{}\"\n", action.as_str(), action.default_key()));
    }
    out
}
