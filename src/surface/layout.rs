use crate::input::focus::{BlockTag, GridCoordinate, Tactical};

pub const PRINCIPAL_TAG: &str = "bulk";
pub const SOLO_TAG: &str = "solo";
const DEFAULT_HEADER_BUTTONS: usize = 3;
const DEFAULT_TOOLBAR_BUTTONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    pub tag: BlockTag,
    pub principal: bool,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotLayout {
    pub blocks: Vec<BlockLayout>,
    pub header_buttons: usize,
}

impl LotLayout {
    pub fn rows(&self) -> usize {
        self.blocks.iter().map(|b| b.rows).sum()
    }
}

/// The type-selector menu currently open under a block's trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMenu {
    pub lot: usize,
    pub block: BlockTag,
    pub options: usize,
}

/// Structural shape of the workspace: just counts and tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceLayout {
    pub lots: Vec<LotLayout>,
    pub toolbar_buttons: usize,
    pub open_menu: Option<OpenMenu>,
}

impl SurfaceLayout {
    /// `lots` docked lots, each with a principal block and a solo block.
    /// A block with zero rows is left out.
    pub fn docked(lots: usize, principal_rows: usize, solo_rows: usize) -> Self {
        let lot = LotLayout {
            blocks: [
                (PRINCIPAL_TAG, true, principal_rows),
                (SOLO_TAG, false, solo_rows),
            ]
            .into_iter()
            .filter(|(_, _, rows)| *rows > 0)
            .map(|(tag, principal, rows)| BlockLayout {
                tag: BlockTag::new(tag),
                principal,
                rows,
            })
            .collect(),
            header_buttons: DEFAULT_HEADER_BUTTONS,
        };
        Self {
            lots: vec![lot; lots],
            toolbar_buttons: DEFAULT_TOOLBAR_BUTTONS,
            open_menu: None,
        }
    }

    pub fn open_type_menu(&mut self, lot: usize, block: BlockTag, options: usize) {
        self.open_menu = Some(OpenMenu { lot, block, options });
    }

    pub fn rows_in_lot(&self, lot: usize) -> usize {
        self.lots.get(lot).map_or(0, LotLayout::rows)
    }

    pub fn has_cell(&self, coord: GridCoordinate) -> bool {
        coord.lot < self.lots.len()
            && coord.row < self.rows_in_lot(coord.lot)
            && coord.cell < GridCoordinate::CELLS_PER_ROW
    }

    /// Every tactical control in document order: toolbar, jump bar, then
    /// per lot the header buttons followed by each block's trigger, open
    /// options, row trash buttons and add-size button.
    pub fn tactical_elements(&self) -> Vec<Tactical> {
        let mut out: Vec<Tactical> = (0..self.toolbar_buttons)
            .map(|index| Tactical::Toolbar { index })
            .collect();
        out.extend((0..self.lots.len()).map(|lot| Tactical::JumpBar { index: lot, lot }));

        for (lot, layout) in self.lots.iter().enumerate() {
            out.extend((0..layout.header_buttons).map(|slot| Tactical::Header { lot, slot }));

            let mut first_row = 0;
            for block in &layout.blocks {
                let menu = self
                    .open_menu
                    .as_ref()
                    .filter(|m| m.lot == lot && m.block == block.tag);
                out.push(Tactical::TypeTrigger {
                    lot,
                    block: block.tag.clone(),
                    principal: block.principal,
                    expanded: menu.is_some(),
                });
                if let Some(menu) = menu {
                    out.extend((0..menu.options).map(|index| Tactical::TypeOption { lot, index }));
                }
                out.extend((first_row..first_row + block.rows).map(|row| Tactical::Trash {
                    lot,
                    block: block.tag.clone(),
                    row,
                }));
                out.push(Tactical::AddSize {
                    lot,
                    block: block.tag.clone(),
                });
                first_row += block.rows;
            }
        }
        out
    }
}
