use crate::input::focus::Tactical;
use crate::locator::{cycle_within, ElementLocator};

/// Successor (or predecessor with `shift`) of `current` in document order
/// across every rendered tactical control, wrapping at both ends.
///
/// This is the catch-all behind Tab: whatever the tab cycle has no rule
/// for still gets somewhere.
pub fn next<L: ElementLocator + ?Sized>(locator: &L, current: &Tactical, shift: bool) -> Option<Tactical> {
    let all = locator.all_tactical();
    cycle_within(&all, current, !shift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::focus::BlockTag;
    use crate::surface::{Surface, SurfaceLayout};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_order_wraps() {
        let surface = Surface::new(SurfaceLayout::docked(1, 1, 0));
        let last = Tactical::AddSize {
            lot: 0,
            block: BlockTag::new("bulk"),
        };
        assert_eq!(next(&surface, &last, false), Some(Tactical::Toolbar { index: 0 }));
        assert_eq!(next(&surface, &Tactical::Toolbar { index: 0 }, true), Some(last));
    }

    #[test]
    fn test_trash_steps_to_next_control() {
        let surface = Surface::new(SurfaceLayout::docked(1, 2, 0));
        let bulk = BlockTag::new("bulk");
        let first = Tactical::Trash { lot: 0, block: bulk.clone(), row: 0 };
        assert_eq!(
            next(&surface, &first, false),
            Some(Tactical::Trash { lot: 0, block: bulk, row: 1 })
        );
    }

    #[test]
    fn test_unrendered_control_has_no_successor() {
        let surface = Surface::new(SurfaceLayout::docked(1, 1, 1));
        assert_eq!(next(&surface, &Tactical::Header { lot: 4, slot: 0 }, false), None);
    }
}
