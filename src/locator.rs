use crate::input::focus::{FocusedContext, GridCoordinate, GridLimits, RegionKind, Scope, Tactical, Target};

/// Direction of a scroll-into-view request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Lot-to-lot transfers.
    Horizontal,
    /// Transfers between blocks and regions inside a lot.
    Vertical,
}

/// The host's view of the rendered surface. The router never owns
/// elements: it asks this trait what exists right now and commands focus.
pub trait ElementLocator {
    fn focused(&self) -> FocusedContext;

    /// Bounds for grid moves starting in `lot`.
    fn limits(&self, lot: usize) -> GridLimits;

    /// Every rendered tactical control in document order.
    fn all_tactical(&self) -> Vec<Tactical>;

    fn has_cell(&self, coord: GridCoordinate) -> bool;

    fn focus(&mut self, target: &Target);

    fn reveal(&mut self, target: &Target, axis: Axis);

    /// Same-kind controls matching `scope`, in traversal order.
    fn find_all(&self, kind: RegionKind, scope: &Scope) -> Vec<Tactical> {
        self.all_tactical()
            .into_iter()
            .filter(|t| t.matches(kind, scope))
            .collect()
    }

    fn find_one(&self, kind: RegionKind, scope: &Scope) -> Option<Tactical> {
        self.find_all(kind, scope).into_iter().next()
    }

    fn find_last(&self, kind: RegionKind, scope: &Scope) -> Option<Tactical> {
        self.find_all(kind, scope).pop()
    }
}

/// Neighbour of `current` within `items`, without wrapping.
pub fn step_within(items: &[Tactical], current: &Tactical, forward: bool) -> Option<Tactical> {
    let idx = items.iter().position(|t| t == current)?;
    if forward {
        items.get(idx + 1).cloned()
    } else {
        idx.checked_sub(1).and_then(|i| items.get(i)).cloned()
    }
}

/// Neighbour of `current` within `items`, wrapping at both ends.
pub fn cycle_within(items: &[Tactical], current: &Tactical, forward: bool) -> Option<Tactical> {
    let idx = items.iter().position(|t| t == current)?;
    let len = items.len();
    let next = if forward {
        (idx + 1) % len
    } else if idx == 0 {
        len - 1
    } else {
        idx - 1
    };
    items.get(next).cloned()
}
