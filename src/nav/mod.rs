// Navigation engines. Everything here is synchronous and side-effect free
// except `router`, which applies at most one focus change per key event.

pub mod grid;
pub mod region_arrows;
pub mod router;
pub mod shortcut;
pub mod tab_cycle;
pub mod tactical_order;

pub use router::{FocusRouter, Outcome, Stage};

use crate::input::focus::{RegionKind, Tactical, Target};
use crate::locator::{Axis, ElementLocator};

/// A computed focus transfer plus the scroll-into-view it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub target: Target,
    pub reveal: Option<Axis>,
}

impl Step {
    /// Lot-to-lot transfers (and anything leaving the jump bar for a lot)
    /// reveal horizontally; changes of region inside a lot reveal
    /// vertically; moves between siblings need no reveal.
    pub fn between(from: &Tactical, to: impl Into<Target>) -> Self {
        let target = to.into();
        let reveal = match &target {
            Target::Cell(c) => {
                if from.lot().is_some_and(|lot| lot != c.lot) {
                    Some(Axis::Horizontal)
                } else {
                    Some(Axis::Vertical)
                }
            }
            Target::Tactical(t) => {
                let crosses_lot = matches!((from.lot(), t.lot()), (Some(a), Some(b)) if a != b);
                let leaves_jump_bar = from.kind() == RegionKind::JumpBar && t.kind() != RegionKind::JumpBar;
                if crosses_lot || (leaves_jump_bar && t.lot().is_some()) {
                    Some(Axis::Horizontal)
                } else if from.kind() != t.kind() {
                    Some(Axis::Vertical)
                } else {
                    None
                }
            }
        };
        Self { target, reveal }
    }

    pub(crate) fn apply<L: ElementLocator + ?Sized>(&self, locator: &mut L) {
        locator.focus(&self.target);
        if let Some(axis) = self.reveal {
            locator.reveal(&self.target, axis);
        }
    }
}
