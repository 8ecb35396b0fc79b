// In-memory rendered surface: a locator and host over a structural layout.
// Used by the driver binary and as the fake surface in tests.

mod layout;

pub use layout::{BlockLayout, LotLayout, OpenMenu, SurfaceLayout};

use crate::action::{ActionHost, ActionScope, ShortcutAction};
use crate::input::focus::{FocusedContext, GridCoordinate, GridLimits, Tactical, Target};
use crate::locator::{Axis, ElementLocator};

#[derive(Debug, Clone)]
pub struct Surface {
    layout: SurfaceLayout,
    focused: Option<Target>,
    reveals: Vec<(Target, Axis)>,
    invoked: Vec<(ShortcutAction, ActionScope)>,
    closing_menu: Option<usize>,
}

impl Surface {
    pub fn new(layout: SurfaceLayout) -> Self {
        Self {
            layout,
            focused: None,
            reveals: Vec::new(),
            invoked: Vec::new(),
            closing_menu: None,
        }
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut SurfaceLayout {
        &mut self.layout
    }

    pub fn focused_target(&self) -> Option<&Target> {
        self.focused.as_ref()
    }

    pub fn reveals(&self) -> &[(Target, Axis)] {
        &self.reveals
    }

    pub fn invoked(&self) -> &[(ShortcutAction, ActionScope)] {
        &self.invoked
    }

    /// Remove the menu the router asked to close. Returns whether a close
    /// was pending, i.e. whether the router should now be told.
    pub fn commit_menu_close(&mut self) -> bool {
        match self.closing_menu.take() {
            Some(lot) => {
                if self.layout.open_menu.as_ref().is_some_and(|m| m.lot == lot) {
                    self.layout.open_menu = None;
                }
                true
            }
            None => false,
        }
    }

    /// Current rendering of `t`; a type trigger keeps its identity while
    /// its menu opens and closes.
    fn current_rendering(&self, t: &Tactical) -> Option<Tactical> {
        let all = self.layout.tactical_elements();
        if let Tactical::TypeTrigger { lot, block, .. } = t {
            return all.into_iter().find(|candidate| {
                matches!(candidate, Tactical::TypeTrigger { lot: l, block: b, .. } if l == lot && b == block)
            });
        }
        all.into_iter().find(|candidate| candidate == t)
    }
}

impl ElementLocator for Surface {
    fn focused(&self) -> FocusedContext {
        match &self.focused {
            Some(Target::Cell(c)) if self.layout.has_cell(*c) => FocusedContext::Cell(*c),
            Some(Target::Tactical(t)) => self
                .current_rendering(t)
                .map(FocusedContext::Tactical)
                .unwrap_or_default(),
            _ => FocusedContext::Unmanaged,
        }
    }

    fn limits(&self, lot: usize) -> GridLimits {
        GridLimits {
            total_lots: self.layout.lots.len(),
            rows_in_lot: self.layout.rows_in_lot(lot),
        }
    }

    fn all_tactical(&self) -> Vec<Tactical> {
        self.layout.tactical_elements()
    }

    fn has_cell(&self, coord: GridCoordinate) -> bool {
        self.layout.has_cell(coord)
    }

    fn focus(&mut self, target: &Target) {
        self.focused = Some(target.clone());
    }

    fn reveal(&mut self, target: &Target, axis: Axis) {
        self.reveals.push((target.clone(), axis));
    }
}

impl ActionHost for Surface {
    fn invoke(&mut self, action: ShortcutAction, scope: ActionScope) {
        tracing::info!("Action {} (lot {:?}, row {:?})", action, scope.lot, scope.row);
        self.invoked.push((action, scope));
    }

    fn close_type_menu(&mut self, lot: usize) {
        self.closing_menu = Some(lot);
    }
}
