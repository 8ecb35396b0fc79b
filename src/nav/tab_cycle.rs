// The Tab loop over tactical regions.
//
// Forward, the loop runs:
//
// ```text
// toolbar(0..last)
//   -> lot 0: add-size(first..last) -> principal trigger -> header(first..last) -> jump-bar(0)
//   -> lot 1: ...
//   -> lot N-1: ... -> jump-bar(N-1)
//   -> toolbar(0)
// ```
//
// Shift+Tab walks the same loop backwards. Each hop has a fallback chain
// so that lots missing a region (no blocks, no principal block) are
// skipped rather than dead ends. Controls outside the loop (trash buttons,
// menu options, non-principal triggers) get no rule here; the router then
// falls back to plain document order.

use crate::input::focus::{RegionKind, Scope, Tactical};
use crate::locator::{step_within, ElementLocator};

use super::region_arrows::principal_trigger;
use super::Step;

pub fn next<L: ElementLocator + ?Sized>(locator: &L, current: &Tactical, shift: bool) -> Option<Step> {
    let cycle = Cycle { locator };
    let target = if shift {
        cycle.backward(current)
    } else {
        cycle.forward(current)
    };
    target.map(|t| Step::between(current, t))
}

struct Cycle<'a, L: ElementLocator + ?Sized> {
    locator: &'a L,
}

impl<'a, L: ElementLocator + ?Sized> Cycle<'a, L> {
    fn forward(&self, current: &Tactical) -> Option<Tactical> {
        match current {
            Tactical::Toolbar { .. } => self
                .sibling(RegionKind::Toolbar, Scope::any(), current, true)
                .or_else(|| self.first_entry_from(0))
                .or_else(|| self.locator.find_one(RegionKind::Toolbar, &Scope::any())),
            Tactical::AddSize { lot, .. } => self
                .sibling(RegionKind::AddSize, Scope::lot(*lot), current, true)
                .or_else(|| self.after_add_sizes(*lot))
                .or_else(|| self.after_lot(*lot)),
            Tactical::TypeTrigger {
                lot, principal: true, ..
            } => self.after_trigger(*lot).or_else(|| self.after_lot(*lot)),
            Tactical::Header { lot, .. } => self
                .sibling(RegionKind::Header, Scope::lot(*lot), current, true)
                .or_else(|| self.jump_for(*lot))
                .or_else(|| self.after_lot(*lot)),
            Tactical::JumpBar { lot, .. } => self.after_lot(*lot),
            Tactical::TypeTrigger { .. } | Tactical::Trash { .. } | Tactical::TypeOption { .. } => None,
        }
    }

    fn backward(&self, current: &Tactical) -> Option<Tactical> {
        match current {
            Tactical::Toolbar { .. } => self
                .sibling(RegionKind::Toolbar, Scope::any(), current, false)
                .or_else(|| self.before_lot(self.total_lots())),
            Tactical::AddSize { lot, .. } => self
                .sibling(RegionKind::AddSize, Scope::lot(*lot), current, false)
                .or_else(|| self.before_lot(*lot)),
            Tactical::TypeTrigger {
                lot, principal: true, ..
            } => self.before_trigger(*lot),
            Tactical::Header { lot, .. } => self
                .sibling(RegionKind::Header, Scope::lot(*lot), current, false)
                .or_else(|| self.before_headers(*lot)),
            Tactical::JumpBar { lot, .. } => self.before_jump(*lot),
            Tactical::TypeTrigger { .. } | Tactical::Trash { .. } | Tactical::TypeOption { .. } => None,
        }
    }

    // Forward hops. Each stays inside its lot; crossing lots goes through
    // `after_lot`.

    fn lot_entry(&self, lot: usize) -> Option<Tactical> {
        self.locator
            .find_one(RegionKind::AddSize, &Scope::lot(lot))
            .or_else(|| self.after_add_sizes(lot))
    }

    fn after_add_sizes(&self, lot: usize) -> Option<Tactical> {
        principal_trigger(self.locator, lot).or_else(|| self.after_trigger(lot))
    }

    fn after_trigger(&self, lot: usize) -> Option<Tactical> {
        self.locator
            .find_one(RegionKind::Header, &Scope::lot(lot))
            .or_else(|| self.jump_for(lot))
    }

    fn first_entry_from(&self, lot: usize) -> Option<Tactical> {
        (lot..self.total_lots()).find_map(|l| self.lot_entry(l))
    }

    /// Whatever follows `lot` in the loop: the next non-empty lot, else the
    /// toolbar, else a wrap to the first non-empty lot.
    fn after_lot(&self, lot: usize) -> Option<Tactical> {
        self.first_entry_from(lot + 1)
            .or_else(|| self.locator.find_one(RegionKind::Toolbar, &Scope::any()))
            .or_else(|| self.first_entry_from(0))
    }

    // Backward hops mirror the forward ones.

    fn before_jump(&self, lot: usize) -> Option<Tactical> {
        self.locator
            .find_last(RegionKind::Header, &Scope::lot(lot))
            .or_else(|| self.before_headers(lot))
    }

    fn before_headers(&self, lot: usize) -> Option<Tactical> {
        principal_trigger(self.locator, lot).or_else(|| self.before_trigger(lot))
    }

    fn before_trigger(&self, lot: usize) -> Option<Tactical> {
        self.locator
            .find_last(RegionKind::AddSize, &Scope::lot(lot))
            .or_else(|| self.before_lot(lot))
    }

    /// Whatever precedes `lot` in the loop: the previous non-empty lot's
    /// exit, or the toolbar's last button before lot 0.
    /// `before_lot(total_lots)` is therefore the loop's very last element.
    fn before_lot(&self, lot: usize) -> Option<Tactical> {
        (0..lot)
            .rev()
            .find_map(|prev| self.lot_exit(prev))
            .or_else(|| self.locator.find_last(RegionKind::Toolbar, &Scope::any()))
            .or_else(|| (0..self.total_lots()).rev().find_map(|last| self.lot_exit(last)))
    }

    fn lot_exit(&self, lot: usize) -> Option<Tactical> {
        self.jump_for(lot)
            .or_else(|| self.locator.find_last(RegionKind::Header, &Scope::lot(lot)))
            .or_else(|| principal_trigger(self.locator, lot))
            .or_else(|| self.locator.find_last(RegionKind::AddSize, &Scope::lot(lot)))
    }

    fn jump_for(&self, lot: usize) -> Option<Tactical> {
        self.locator.find_one(RegionKind::JumpBar, &Scope::lot(lot))
    }

    fn sibling(&self, kind: RegionKind, scope: Scope, current: &Tactical, forward: bool) -> Option<Tactical> {
        let items = self.locator.find_all(kind, &scope);
        step_within(&items, current, forward)
    }

    fn total_lots(&self) -> usize {
        self.locator.limits(0).total_lots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::focus::{BlockTag, Target};
    use crate::surface::{Surface, SurfaceLayout};
    use pretty_assertions::assert_eq;

    fn tab(surface: &Surface, from: Tactical, shift: bool) -> Option<Target> {
        next(surface, &from, shift).map(|step| step.target)
    }

    fn add_size(lot: usize, tag: &str) -> Tactical {
        Tactical::AddSize {
            lot,
            block: BlockTag::new(tag),
        }
    }

    #[test]
    fn test_lot_order() {
        let surface = Surface::new(SurfaceLayout::docked(2, 3, 2));
        let principal = Tactical::TypeTrigger {
            lot: 0,
            block: BlockTag::new("bulk"),
            principal: true,
            expanded: false,
        };
        assert_eq!(tab(&surface, add_size(0, "bulk"), false), Some(Target::from(add_size(0, "solo"))));
        assert_eq!(tab(&surface, add_size(0, "solo"), false), Some(Target::from(principal.clone())));
        assert_eq!(
            tab(&surface, principal, false),
            Some(Target::from(Tactical::Header { lot: 0, slot: 0 }))
        );
        assert_eq!(
            tab(&surface, Tactical::Header { lot: 0, slot: 2 }, false),
            Some(Target::from(Tactical::JumpBar { index: 0, lot: 0 }))
        );
        assert_eq!(
            tab(&surface, Tactical::JumpBar { index: 0, lot: 0 }, false),
            Some(Target::from(add_size(1, "bulk")))
        );
        assert_eq!(
            tab(&surface, Tactical::JumpBar { index: 1, lot: 1 }, false),
            Some(Target::from(Tactical::Toolbar { index: 0 }))
        );
    }

    #[test]
    fn test_backward_crosses_lots_through_the_jump_bar() {
        let surface = Surface::new(SurfaceLayout::docked(2, 3, 2));
        assert_eq!(
            tab(&surface, add_size(1, "bulk"), true),
            Some(Target::from(Tactical::JumpBar { index: 0, lot: 0 }))
        );
        assert_eq!(
            tab(&surface, add_size(0, "bulk"), true),
            Some(Target::from(Tactical::Toolbar { index: 2 }))
        );
        assert_eq!(
            tab(&surface, Tactical::Toolbar { index: 0 }, true),
            Some(Target::from(Tactical::JumpBar { index: 1, lot: 1 }))
        );
    }

    #[test]
    fn test_empty_lots_are_skipped() {
        let mut layout = SurfaceLayout::docked(3, 1, 1);
        layout.lots[1].blocks.clear();
        layout.lots[1].header_buttons = 0;
        let mut surface = Surface::new(layout);
        // Lot 1 still owns a jump-bar button, which becomes its only stop.
        assert_eq!(
            tab(&surface, Tactical::JumpBar { index: 0, lot: 0 }, false),
            Some(Target::from(Tactical::JumpBar { index: 1, lot: 1 }))
        );

        surface.layout_mut().toolbar_buttons = 0;
        assert_eq!(
            tab(&surface, Tactical::JumpBar { index: 2, lot: 2 }, false),
            Some(Target::from(add_size(0, "bulk")))
        );
        assert_eq!(
            tab(&surface, add_size(0, "bulk"), true),
            Some(Target::from(Tactical::JumpBar { index: 2, lot: 2 }))
        );
    }

    #[test]
    fn test_controls_outside_the_loop_have_no_rule() {
        let surface = Surface::new(SurfaceLayout::docked(1, 1, 1));
        let trash = Tactical::Trash {
            lot: 0,
            block: BlockTag::new("bulk"),
            row: 0,
        };
        assert_eq!(tab(&surface, trash, false), None);
    }
}
