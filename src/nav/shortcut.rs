use crate::action::ShortcutAction;
use crate::config::ShortcutMap;
use crate::input::focus::{FocusedContext, GridCoordinate, Tactical};
use crate::input::key::{KeyStroke, NavKey};

/// Resolve an Alt+key stroke to the action bound to it, honouring the
/// session's overrides. Only Alt chords are shortcuts.
pub fn resolve_action(stroke: &KeyStroke, map: &ShortcutMap) -> Option<ShortcutAction> {
    if !stroke.alt {
        return None;
    }
    let NavKey::Char(c) = stroke.key else {
        return None;
    };
    let pressed = c.to_lowercase().next().unwrap_or(c);
    ShortcutAction::ALL
        .iter()
        .copied()
        .find(|action| map.effective_key(*action) == pressed)
}

/// Key label shown next to an action in the UI.
pub fn resolve_label(action: ShortcutAction, map: &ShortcutMap) -> String {
    map.effective_key(action).to_uppercase().collect()
}

/// Where Escape sends the operator from `focused`, if anywhere. Only
/// header, jump-bar and add-size controls recenter.
pub fn recenter_target(focused: &FocusedContext) -> Option<GridCoordinate> {
    match focused {
        FocusedContext::Tactical(t) if t.kind().recenters_on_escape() => {
            t.lot().map(GridCoordinate::lot_origin)
        }
        _ => None,
    }
}

/// The trigger whose menu an Escape on `focused` should close.
pub fn menu_to_close(focused: &FocusedContext) -> Option<usize> {
    match focused {
        FocusedContext::Tactical(Tactical::TypeOption { lot, .. }) => Some(*lot),
        _ => None,
    }
}
