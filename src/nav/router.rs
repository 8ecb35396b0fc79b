// Single entry point for key events over the managed surface.
//
// Stages run in a fixed order and the first one that consumes the event
// wins:
//
// 1. Escape: recenter to the grid, or close an open type menu
// 2. Alt shortcuts
// 3. Tab: the tab cycle, falling back to plain document order
// 4. Arrows and Enter: region adjacency for tactical controls, vector
//    arithmetic for grid cells
//
// Anything else passes through to the host untouched.

use crate::action::{ActionHost, ShortcutAction};
use crate::config::ShortcutMap;
use crate::input::focus::{BlockTag, FocusedContext, GridCoordinate, RegionKind, Scope, Tactical, Target};
use crate::input::key::{KeyStroke, NavKey};
use crate::locator::{Axis, ElementLocator};

use super::{grid, region_arrows, shortcut, tab_cycle, tactical_order, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Escape,
    Shortcut,
    Tab,
    Arrow,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Escape => "escape",
            Stage::Shortcut => "shortcut",
            Stage::Tab => "tab",
            Stage::Arrow => "arrow",
        }
    }
}

/// Result of one key event. `Consumed` means the host must suppress the
/// key's default effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    PassThrough,
    Consumed {
        stage: Stage,
        moved_to: Option<Target>,
    },
}

impl Outcome {
    fn consumed(stage: Stage, moved_to: Option<Target>) -> Self {
        Outcome::Consumed { stage, moved_to }
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self, Outcome::Consumed { .. })
    }

    pub fn moved_to(&self) -> Option<&Target> {
        match self {
            Outcome::Consumed { moved_to, .. } => moved_to.as_ref(),
            Outcome::PassThrough => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct FocusRouter {
    shortcuts: ShortcutMap,
    /// Trigger to refocus once the host has removed its menu.
    pending_refocus: Option<(usize, BlockTag)>,
}

impl FocusRouter {
    pub fn new(shortcuts: ShortcutMap) -> Self {
        Self {
            shortcuts,
            pending_refocus: None,
        }
    }

    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }

    pub fn label(&self, action: ShortcutAction) -> String {
        shortcut::resolve_label(action, &self.shortcuts)
    }

    pub fn handle_key<H>(&mut self, stroke: KeyStroke, host: &mut H) -> Outcome
    where
        H: ElementLocator + ActionHost + ?Sized,
    {
        let focused = host.focused();

        if stroke.key == NavKey::Escape {
            if let Some(outcome) = self.escape(&focused, host) {
                return outcome;
            }
        }

        if let Some(action) = shortcut::resolve_action(&stroke, &self.shortcuts) {
            let scope = focused.scope();
            if scope.satisfies(action) {
                tracing::debug!("Shortcut {} -> {}", stroke, action);
                host.invoke(action, scope);
                return Outcome::consumed(Stage::Shortcut, None);
            }
            tracing::trace!("Shortcut {} has no enclosing lot/row here", action);
        }

        match (&focused, stroke.key) {
            (FocusedContext::Tactical(current), NavKey::Tab) => {
                let step = tab_cycle::next(&*host, current, stroke.shift).or_else(|| {
                    tactical_order::next(&*host, current, stroke.shift).map(|t| Step::between(current, t))
                });
                Self::finish(Stage::Tab, current, step, host)
            }
            (FocusedContext::Tactical(current), key) if key.is_arrow() => {
                let step = region_arrows::route(&*host, current, key);
                Self::finish(Stage::Arrow, current, step, host)
            }
            (FocusedContext::Cell(coord), key) if key.is_arrow() || key == NavKey::Enter => {
                Self::grid_move(*coord, stroke, host)
            }
            _ => Outcome::PassThrough,
        }
    }

    /// Second phase of closing a type menu: the host calls this once the
    /// menu is gone from the surface, and the owning trigger gets focus.
    pub fn menu_closed<L: ElementLocator + ?Sized>(&mut self, locator: &mut L) -> Option<Target> {
        let (lot, block) = self.pending_refocus.take()?;
        let Some(trigger) = locator.find_one(RegionKind::TypeTrigger, &Scope::lot(lot).with_block(&block)) else {
            tracing::trace!("Trigger for lot {} ({}) vanished before refocus", lot, block);
            return None;
        };
        let target = Target::Tactical(trigger);
        locator.focus(&target);
        tracing::debug!("Menu closed, focus returns to {}", target);
        Some(target)
    }

    fn escape<H>(&mut self, focused: &FocusedContext, host: &mut H) -> Option<Outcome>
    where
        H: ElementLocator + ActionHost + ?Sized,
    {
        let FocusedContext::Tactical(current) = focused else {
            return None;
        };

        if let Some(origin) = shortcut::recenter_target(focused) {
            if !host.has_cell(origin) {
                tracing::trace!("Recenter target {:?} not rendered", origin);
                return Some(Outcome::consumed(Stage::Escape, None));
            }
            return Some(Self::finish(Stage::Escape, current, Some(Step::between(current, origin)), host));
        }

        let lot = shortcut::menu_to_close(focused)?;
        let trigger = host
            .find_all(RegionKind::TypeTrigger, &Scope::lot(lot))
            .into_iter()
            .find(|t| matches!(t, Tactical::TypeTrigger { expanded: true, .. }));
        if let Some(Tactical::TypeTrigger { block, .. }) = trigger {
            self.pending_refocus = Some((lot, block));
        }
        tracing::debug!("Closing type menu of lot {}", lot);
        host.close_type_menu(lot);
        Some(Outcome::consumed(Stage::Escape, None))
    }

    fn grid_move<L: ElementLocator + ?Sized>(
        coord: GridCoordinate,
        stroke: KeyStroke,
        locator: &mut L,
    ) -> Outcome {
        let Some(next) = grid::next_cell(coord, stroke.key, stroke.shift, locator.limits(coord.lot)) else {
            return Outcome::PassThrough;
        };
        if !locator.has_cell(next) {
            tracing::trace!("Grid move to {:?} does not resolve", next);
            return Outcome::consumed(Stage::Arrow, None);
        }
        let step = Step {
            target: Target::Cell(next),
            reveal: (next.lot != coord.lot).then_some(Axis::Horizontal),
        };
        step.apply(locator);
        tracing::debug!("Grid {:?} -> {:?}", coord, next);
        Outcome::consumed(Stage::Arrow, Some(step.target))
    }

    fn finish<L: ElementLocator + ?Sized>(
        stage: Stage,
        current: &Tactical,
        step: Option<Step>,
        locator: &mut L,
    ) -> Outcome {
        match step {
            Some(step) => {
                step.apply(locator);
                tracing::debug!("{} {} -> {}", stage.as_str(), current, step.target);
                Outcome::consumed(stage, Some(step.target))
            }
            None => {
                tracing::trace!("{} from {} found nothing", stage.as_str(), current);
                Outcome::consumed(stage, None)
            }
        }
    }
}
