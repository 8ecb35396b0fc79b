use std::fmt;
use std::str::FromStr;

use crate::error::NavError;

/// Semantic actions reachable through Alt+key shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShortcutAction {
    SaveAll,
    SwitchView1,
    SwitchView2,
    SwitchView3,
    SwitchView4,
    OpenImport,
    OpenConfig,
    OpenIntelligence,
    OpenLotSelector,
    OpenNewLot,
    OpenHistory,
    ClearWorkspace,
    ToggleHeader,
    EditLot,
    SnapshotLot,
    RemoveLot,
    DeleteRow,
    OpenCommandPalette,
}

impl ShortcutAction {
    /// Dispatch order. When two actions share a key the earlier one wins.
    pub const ALL: &'static [ShortcutAction] = &[
        ShortcutAction::SaveAll,
        ShortcutAction::SwitchView1,
        ShortcutAction::SwitchView2,
        ShortcutAction::SwitchView3,
        ShortcutAction::SwitchView4,
        ShortcutAction::OpenImport,
        ShortcutAction::OpenConfig,
        ShortcutAction::OpenIntelligence,
        ShortcutAction::OpenLotSelector,
        ShortcutAction::OpenNewLot,
        ShortcutAction::OpenHistory,
        ShortcutAction::ClearWorkspace,
        ShortcutAction::ToggleHeader,
        ShortcutAction::EditLot,
        ShortcutAction::SnapshotLot,
        ShortcutAction::RemoveLot,
        ShortcutAction::DeleteRow,
        ShortcutAction::OpenCommandPalette,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutAction::SaveAll => "save_all",
            ShortcutAction::SwitchView1 => "switch_view_1",
            ShortcutAction::SwitchView2 => "switch_view_2",
            ShortcutAction::SwitchView3 => "switch_view_3",
            ShortcutAction::SwitchView4 => "switch_view_4",
            ShortcutAction::OpenImport => "open_import",
            ShortcutAction::OpenConfig => "open_config",
            ShortcutAction::OpenIntelligence => "open_intelligence",
            ShortcutAction::OpenLotSelector => "open_lot_selector",
            ShortcutAction::OpenNewLot => "open_new_lot",
            ShortcutAction::OpenHistory => "open_history",
            ShortcutAction::ClearWorkspace => "clear_workspace",
            ShortcutAction::ToggleHeader => "toggle_header",
            ShortcutAction::EditLot => "edit_lot",
            ShortcutAction::SnapshotLot => "snapshot_lot",
            ShortcutAction::RemoveLot => "remove_lot",
            ShortcutAction::DeleteRow => "delete_row",
            ShortcutAction::OpenCommandPalette => "open_command_palette",
        }
    }

    /// Key used when the session's shortcut map has no override.
    pub fn default_key(&self) -> char {
        match self {
            ShortcutAction::SaveAll => 's',
            ShortcutAction::SwitchView1 => '1',
            ShortcutAction::SwitchView2 => '2',
            ShortcutAction::SwitchView3 => '3',
            ShortcutAction::SwitchView4 => '4',
            ShortcutAction::OpenImport => 'i',
            ShortcutAction::OpenConfig => 'o',
            ShortcutAction::OpenIntelligence => 'a',
            ShortcutAction::OpenLotSelector => 'l',
            ShortcutAction::OpenNewLot => 'n',
            ShortcutAction::OpenHistory => 'h',
            ShortcutAction::ClearWorkspace => 'c',
            ShortcutAction::ToggleHeader => 't',
            ShortcutAction::EditLot => 'e',
            ShortcutAction::SnapshotLot => 'p',
            ShortcutAction::RemoveLot => 'r',
            ShortcutAction::DeleteRow => 'd',
            ShortcutAction::OpenCommandPalette => 'k',
        }
    }

    /// Whether the action is carried out by the lot enclosing the focus.
    pub fn needs_lot(&self) -> bool {
        matches!(
            self,
            ShortcutAction::EditLot | ShortcutAction::SnapshotLot | ShortcutAction::RemoveLot
        )
    }

    /// Whether the action is carried out by the row enclosing the focus.
    pub fn needs_row(&self) -> bool {
        matches!(self, ShortcutAction::DeleteRow)
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShortcutAction {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ShortcutAction::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == needle)
            .ok_or_else(|| NavError::UnknownAction(s.to_string()))
    }
}

/// Nearest enclosing lot and row of the focused element, handed to the host
/// so per-lot and per-row actions can find their own action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionScope {
    pub lot: Option<usize>,
    pub row: Option<usize>,
}

impl ActionScope {
    pub fn satisfies(&self, action: ShortcutAction) -> bool {
        (!action.needs_lot() || self.lot.is_some()) && (!action.needs_row() || self.row.is_some())
    }
}

/// Callbacks the router fires into the host application.
pub trait ActionHost {
    fn invoke(&mut self, action: ShortcutAction, scope: ActionScope);

    /// Begin closing the type-selector menu of `lot`. The host calls
    /// `FocusRouter::menu_closed` once the menu is gone from the surface.
    fn close_type_menu(&mut self, lot: usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_ids_round_trip() {
        for action in ShortcutAction::ALL {
            let parsed: ShortcutAction = action.as_str().parse().unwrap();
            assert_eq!(parsed, *action);
        }
    }

    #[test]
    fn test_unknown_action_id() {
        let err = "open_everything".parse::<ShortcutAction>().unwrap_err();
        assert!(matches!(err, NavError::UnknownAction(_)));
    }

    #[test]
    fn test_default_keys_are_unique() {
        let mut keys: Vec<char> = ShortcutAction::ALL.iter().map(|a| a.default_key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ShortcutAction::ALL.len());
    }

    #[test]
    fn test_scope_requirements() {
        let lot_only = ActionScope { lot: Some(1), row: None };
        assert!(lot_only.satisfies(ShortcutAction::EditLot));
        assert!(!lot_only.satisfies(ShortcutAction::DeleteRow));
        assert!(ActionScope::default().satisfies(ShortcutAction::SaveAll));
        assert!(!ActionScope::default().satisfies(ShortcutAction::RemoveLot));
    }
}
