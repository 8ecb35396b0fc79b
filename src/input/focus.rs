use std::fmt;

use crate::action::ActionScope;
use crate::error::{NavError, Result};

/// One data-entry field: `cell` 0/1/2 is input / processed / balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoordinate {
    pub lot: usize,
    pub row: usize,
    pub cell: usize,
}

impl GridCoordinate {
    pub const CELLS_PER_ROW: usize = 3;
    pub const BALANCE_CELL: usize = 2;

    pub fn new(lot: usize, row: usize, cell: usize) -> Self {
        Self { lot, row, cell }
    }

    /// First input of a lot, where Escape recenters the operator.
    pub fn lot_origin(lot: usize) -> Self {
        Self::new(lot, 0, 0)
    }
}

/// Grid bounds recomputed for every navigation request. `rows_in_lot` is
/// advisory; row moves past it simply fail to resolve to a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridLimits {
    pub total_lots: usize,
    pub rows_in_lot: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Trash,
    Header,
    AddSize,
    TypeTrigger,
    TypeOption,
    JumpBar,
    Toolbar,
}

impl RegionKind {
    pub const ALL: &'static [RegionKind] = &[
        RegionKind::Trash,
        RegionKind::Header,
        RegionKind::AddSize,
        RegionKind::TypeTrigger,
        RegionKind::TypeOption,
        RegionKind::JumpBar,
        RegionKind::Toolbar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::Trash => "trash",
            RegionKind::Header => "header",
            RegionKind::AddSize => "add-size",
            RegionKind::TypeTrigger => "type-trigger",
            RegionKind::TypeOption => "type-option",
            RegionKind::JumpBar => "jump-bar",
            RegionKind::Toolbar => "toolbar",
        }
    }

    /// Regions from which Escape returns the operator to the grid.
    pub fn recenters_on_escape(&self) -> bool {
        matches!(self, RegionKind::Header | RegionKind::JumpBar | RegionKind::AddSize)
    }
}

/// Presentation type of a block. Opaque to navigation beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockTag(String);

impl BlockTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rendered control outside the data-entry grid, with its structural
/// address. Row indices are lot-global.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tactical {
    Trash { lot: usize, block: BlockTag, row: usize },
    Header { lot: usize, slot: usize },
    AddSize { lot: usize, block: BlockTag },
    TypeTrigger { lot: usize, block: BlockTag, principal: bool, expanded: bool },
    TypeOption { lot: usize, index: usize },
    JumpBar { index: usize, lot: usize },
    Toolbar { index: usize },
}

impl Tactical {
    pub fn kind(&self) -> RegionKind {
        match self {
            Tactical::Trash { .. } => RegionKind::Trash,
            Tactical::Header { .. } => RegionKind::Header,
            Tactical::AddSize { .. } => RegionKind::AddSize,
            Tactical::TypeTrigger { .. } => RegionKind::TypeTrigger,
            Tactical::TypeOption { .. } => RegionKind::TypeOption,
            Tactical::JumpBar { .. } => RegionKind::JumpBar,
            Tactical::Toolbar { .. } => RegionKind::Toolbar,
        }
    }

    /// Lot the control belongs to (for the jump bar: the lot it jumps to).
    pub fn lot(&self) -> Option<usize> {
        match self {
            Tactical::Trash { lot, .. }
            | Tactical::Header { lot, .. }
            | Tactical::AddSize { lot, .. }
            | Tactical::TypeTrigger { lot, .. }
            | Tactical::TypeOption { lot, .. }
            | Tactical::JumpBar { lot, .. } => Some(*lot),
            Tactical::Toolbar { .. } => None,
        }
    }

    pub fn block(&self) -> Option<&BlockTag> {
        match self {
            Tactical::Trash { block, .. }
            | Tactical::AddSize { block, .. }
            | Tactical::TypeTrigger { block, .. } => Some(block),
            _ => None,
        }
    }

    pub fn matches(&self, kind: RegionKind, scope: &Scope) -> bool {
        if self.kind() != kind {
            return false;
        }
        if let Some(lot) = scope.lot {
            if self.lot() != Some(lot) {
                return false;
            }
        }
        if let Some(ref block) = scope.block {
            if self.block() != Some(block) {
                return false;
            }
        }
        if let Some(want) = scope.principal {
            match self {
                Tactical::TypeTrigger { principal, .. } if *principal == want => {}
                _ => return false,
            }
        }
        true
    }
}

impl fmt::Display for Tactical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tactical::Trash { lot, block, row } => write!(f, "trash(lot {lot}, {block}, row {row})"),
            Tactical::Header { lot, slot } => write!(f, "header(lot {lot}, #{slot})"),
            Tactical::AddSize { lot, block } => write!(f, "add-size(lot {lot}, {block})"),
            Tactical::TypeTrigger {
                lot,
                block,
                principal,
                expanded,
            } => {
                write!(f, "type-trigger(lot {lot}, {block}")?;
                if *principal {
                    f.write_str(", principal")?;
                }
                if *expanded {
                    f.write_str(", open")?;
                }
                f.write_str(")")
            }
            Tactical::TypeOption { lot, index } => write!(f, "type-option(lot {lot}, #{index})"),
            Tactical::JumpBar { index, lot } => write!(f, "jump-bar(#{index} -> lot {lot})"),
            Tactical::Toolbar { index } => write!(f, "toolbar(#{index})"),
        }
    }
}

/// Partial address used to query the locator for same-kind controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub lot: Option<usize>,
    pub block: Option<BlockTag>,
    pub principal: Option<bool>,
}

impl Scope {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn lot(lot: usize) -> Self {
        Self {
            lot: Some(lot),
            ..Self::default()
        }
    }

    pub fn with_block(mut self, block: &BlockTag) -> Self {
        self.block = Some(block.clone());
        self
    }

    pub fn principal(mut self) -> Self {
        self.principal = Some(true);
        self
    }
}

/// Anything the router can move focus to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Cell(GridCoordinate),
    Tactical(Tactical),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Cell(c) => write!(f, "cell(lot {}, row {}, cell {})", c.lot, c.row, c.cell),
            Target::Tactical(t) => fmt::Display::fmt(t, f),
        }
    }
}

impl From<Tactical> for Target {
    fn from(t: Tactical) -> Self {
        Target::Tactical(t)
    }
}

impl From<GridCoordinate> for Target {
    fn from(c: GridCoordinate) -> Self {
        Target::Cell(c)
    }
}

/// What currently holds focus, resolved once at the start of an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FocusedContext {
    Cell(GridCoordinate),
    Tactical(Tactical),
    #[default]
    Unmanaged,
}

impl FocusedContext {
    pub fn scope(&self) -> ActionScope {
        match self {
            FocusedContext::Cell(c) => ActionScope {
                lot: Some(c.lot),
                row: Some(c.row),
            },
            FocusedContext::Tactical(Tactical::Trash { lot, row, .. }) => ActionScope {
                lot: Some(*lot),
                row: Some(*row),
            },
            // A jump-bar button names the lot it jumps to, not one it sits in.
            FocusedContext::Tactical(Tactical::JumpBar { .. }) => ActionScope::default(),
            FocusedContext::Tactical(t) => ActionScope {
                lot: t.lot(),
                row: None,
            },
            FocusedContext::Unmanaged => ActionScope::default(),
        }
    }

    pub fn is_managed(&self) -> bool {
        !matches!(self, FocusedContext::Unmanaged)
    }

    /// Classify an element described by its structural markers. Exactly one
    /// region-qualifying marker may be present; an element carrying several
    /// is rejected instead of being resolved by check order.
    pub fn classify(markers: &ElementMarkers) -> Result<FocusedContext> {
        let m = markers;
        let mut present: Vec<&'static str> = Vec::new();
        if m.trash {
            present.push(RegionKind::Trash.as_str());
        }
        if m.header_slot.is_some() {
            present.push(RegionKind::Header.as_str());
        }
        if m.add_size {
            present.push(RegionKind::AddSize.as_str());
        }
        if m.type_trigger.is_some() {
            present.push(RegionKind::TypeTrigger.as_str());
        }
        if m.type_option.is_some() {
            present.push(RegionKind::TypeOption.as_str());
        }
        if m.jump_index.is_some() {
            present.push(RegionKind::JumpBar.as_str());
        }
        if m.toolbar_index.is_some() {
            present.push(RegionKind::Toolbar.as_str());
        }
        if m.cell.is_some() {
            present.push("grid");
        }
        if present.len() > 1 {
            return Err(NavError::AmbiguousRegion(present));
        }

        let block = || m.block.clone();
        let ctx = if m.trash {
            match (m.lot, block(), m.row) {
                (Some(lot), Some(block), Some(row)) => Tactical::Trash { lot, block, row }.into(),
                _ => FocusedContext::Unmanaged,
            }
        } else if let Some(slot) = m.header_slot {
            m.lot
                .map(|lot| FocusedContext::from(Tactical::Header { lot, slot }))
                .unwrap_or_default()
        } else if m.add_size {
            match (m.lot, block()) {
                (Some(lot), Some(block)) => Tactical::AddSize { lot, block }.into(),
                _ => FocusedContext::Unmanaged,
            }
        } else if let Some(trigger) = m.type_trigger {
            match (m.lot, block()) {
                (Some(lot), Some(block)) => Tactical::TypeTrigger {
                    lot,
                    block,
                    principal: trigger.principal,
                    expanded: trigger.expanded,
                }
                .into(),
                _ => FocusedContext::Unmanaged,
            }
        } else if let Some(index) = m.type_option {
            m.lot
                .map(|lot| FocusedContext::from(Tactical::TypeOption { lot, index }))
                .unwrap_or_default()
        } else if let Some(index) = m.jump_index {
            m.lot
                .map(|lot| FocusedContext::from(Tactical::JumpBar { index, lot }))
                .unwrap_or_default()
        } else if let Some(index) = m.toolbar_index {
            Tactical::Toolbar { index }.into()
        } else if let Some(cell) = m.cell {
            match (m.lot, m.row) {
                (Some(lot), Some(row)) if cell < GridCoordinate::CELLS_PER_ROW => {
                    FocusedContext::Cell(GridCoordinate::new(lot, row, cell))
                }
                _ => FocusedContext::Unmanaged,
            }
        } else {
            FocusedContext::Unmanaged
        };
        Ok(ctx)
    }
}

impl From<Tactical> for FocusedContext {
    fn from(t: Tactical) -> Self {
        FocusedContext::Tactical(t)
    }
}

impl From<Target> for FocusedContext {
    fn from(t: Target) -> Self {
        match t {
            Target::Cell(c) => FocusedContext::Cell(c),
            Target::Tactical(t) => FocusedContext::Tactical(t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerMarker {
    pub principal: bool,
    pub expanded: bool,
}

/// Structural attributes a host attaches to a rendered element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMarkers {
    pub lot: Option<usize>,
    pub row: Option<usize>,
    pub cell: Option<usize>,
    pub block: Option<BlockTag>,
    pub trash: bool,
    pub header_slot: Option<usize>,
    pub add_size: bool,
    pub type_trigger: Option<TriggerMarker>,
    pub type_option: Option<usize>,
    pub jump_index: Option<usize>,
    pub toolbar_index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn principal() -> BlockTag {
        BlockTag::new("bulk")
    }

    #[test]
    fn test_scope_matching() {
        let trigger = Tactical::TypeTrigger {
            lot: 1,
            block: principal(),
            principal: true,
            expanded: false,
        };
        assert!(trigger.matches(RegionKind::TypeTrigger, &Scope::lot(1).principal()));
        assert!(!trigger.matches(RegionKind::TypeTrigger, &Scope::lot(0)));
        assert!(!trigger.matches(RegionKind::AddSize, &Scope::any()));

        let header = Tactical::Header { lot: 1, slot: 0 };
        assert!(!header.matches(RegionKind::Header, &Scope::lot(1).principal()));
        assert!(header.matches(RegionKind::Header, &Scope::lot(1)));

        let toolbar = Tactical::Toolbar { index: 0 };
        assert!(toolbar.matches(RegionKind::Toolbar, &Scope::any()));
        assert!(!toolbar.matches(RegionKind::Toolbar, &Scope::lot(0)));
    }

    #[test]
    fn test_action_scope_from_focus() {
        let cell = FocusedContext::Cell(GridCoordinate::new(2, 4, 1));
        assert_eq!(cell.scope(), ActionScope { lot: Some(2), row: Some(4) });

        let trash: FocusedContext = Tactical::Trash {
            lot: 1,
            block: principal(),
            row: 3,
        }
        .into();
        assert_eq!(trash.scope(), ActionScope { lot: Some(1), row: Some(3) });

        let toolbar: FocusedContext = Tactical::Toolbar { index: 2 }.into();
        assert_eq!(toolbar.scope(), ActionScope::default());

        let jump: FocusedContext = Tactical::JumpBar { index: 2, lot: 2 }.into();
        assert_eq!(jump.scope(), ActionScope::default());

        let header: FocusedContext = Tactical::Header { lot: 1, slot: 0 }.into();
        assert_eq!(header.scope(), ActionScope { lot: Some(1), row: None });
    }

    #[test]
    fn test_classify_single_marker() {
        let markers = ElementMarkers {
            lot: Some(2),
            header_slot: Some(1),
            ..Default::default()
        };
        assert_eq!(
            FocusedContext::classify(&markers).unwrap(),
            FocusedContext::from(Tactical::Header { lot: 2, slot: 1 })
        );

        let markers = ElementMarkers {
            lot: Some(0),
            row: Some(5),
            cell: Some(2),
            ..Default::default()
        };
        assert_eq!(
            FocusedContext::classify(&markers).unwrap(),
            FocusedContext::Cell(GridCoordinate::new(0, 5, 2))
        );
    }

    #[test]
    fn test_classify_rejects_overlapping_markers() {
        let markers = ElementMarkers {
            lot: Some(0),
            block: Some(principal()),
            row: Some(0),
            trash: true,
            add_size: true,
            ..Default::default()
        };
        match FocusedContext::classify(&markers) {
            Err(NavError::AmbiguousRegion(kinds)) => {
                assert_eq!(kinds, vec!["trash", "add-size"]);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_incomplete_address_is_unmanaged() {
        let markers = ElementMarkers {
            add_size: true,
            lot: Some(1),
            ..Default::default()
        };
        assert_eq!(
            FocusedContext::classify(&markers).unwrap(),
            FocusedContext::Unmanaged
        );
        assert_eq!(
            FocusedContext::classify(&ElementMarkers::default()).unwrap(),
            FocusedContext::Unmanaged
        );
    }
}
