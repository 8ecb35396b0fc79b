// Arrow-key adjacency for tactical controls, one handler per region kind.
//
// Handlers only compute; the router applies the step. A handler returning
// `None` means "nothing there", and the router still swallows the arrow.

use crate::input::focus::{BlockTag, GridCoordinate, RegionKind, Scope, Tactical, Target};
use crate::input::key::NavKey;
use crate::locator::{cycle_within, step_within, ElementLocator};

use super::Step;

pub fn route<L: ElementLocator + ?Sized>(locator: &L, current: &Tactical, key: NavKey) -> Option<Step> {
    let target = match current {
        Tactical::Trash { lot, block, row } => trash(locator, *lot, block, *row, key),
        Tactical::Header { lot, .. } => header(locator, current, *lot, key),
        Tactical::AddSize { lot, block } => add_size(locator, current, *lot, block, key).map(Target::from),
        Tactical::TypeTrigger { lot, expanded, .. } => {
            type_trigger(locator, *lot, *expanded, key).map(Target::from)
        }
        Tactical::TypeOption { lot, .. } => type_option(locator, current, *lot, key).map(Target::from),
        Tactical::JumpBar { index, .. } => jump_bar(locator, current, *index, key).map(Target::from),
        Tactical::Toolbar { .. } => toolbar(locator, current, key).map(Target::from),
    };
    target.map(|t| Step::between(current, t))
}

fn trash<L: ElementLocator + ?Sized>(
    locator: &L,
    lot: usize,
    block: &BlockTag,
    row: usize,
    key: NavKey,
) -> Option<Target> {
    let rows = || locator.find_all(RegionKind::Trash, &Scope::lot(lot));
    match key {
        // Down leaves the block through its own add-size; Up may cross into
        // the previous block's last row.
        NavKey::Down => trash_at_row(
            locator.find_all(RegionKind::Trash, &Scope::lot(lot).with_block(block)),
            row + 1,
        )
            .or_else(|| locator.find_one(RegionKind::AddSize, &Scope::lot(lot).with_block(block)))
            .map(Target::from),
        NavKey::Up => row
            .checked_sub(1)
            .and_then(|prev| trash_at_row(rows(), prev))
            .map(Target::from),
        NavKey::Left => {
            let balance = GridCoordinate::new(lot, row, GridCoordinate::BALANCE_CELL);
            locator.has_cell(balance).then_some(Target::Cell(balance))
        }
        _ => None,
    }
}

fn trash_at_row(rows: Vec<Tactical>, wanted: usize) -> Option<Tactical> {
    rows.into_iter()
        .find(|t| matches!(t, Tactical::Trash { row, .. } if *row == wanted))
}

fn header<L: ElementLocator + ?Sized>(
    locator: &L,
    current: &Tactical,
    lot: usize,
    key: NavKey,
) -> Option<Target> {
    let found = match key {
        NavKey::Down => {
            let origin = GridCoordinate::lot_origin(lot);
            return locator.has_cell(origin).then_some(Target::Cell(origin));
        }
        NavKey::Up => principal_trigger(locator, lot)
            .or_else(|| locator.find_last(RegionKind::AddSize, &Scope::lot(lot))),
        NavKey::Right => {
            let headers = locator.find_all(RegionKind::Header, &Scope::lot(lot));
            step_within(&headers, current, true)
                .or_else(|| locator.find_one(RegionKind::Header, &Scope::lot(lot + 1)))
                .or_else(|| locator.find_one(RegionKind::Toolbar, &Scope::any()))
        }
        NavKey::Left => {
            let headers = locator.find_all(RegionKind::Header, &Scope::lot(lot));
            step_within(&headers, current, false).or_else(|| {
                lot.checked_sub(1)
                    .and_then(|prev| locator.find_last(RegionKind::Header, &Scope::lot(prev)))
            })
        }
        _ => None,
    };
    found.map(Target::from)
}

fn add_size<L: ElementLocator + ?Sized>(
    locator: &L,
    current: &Tactical,
    lot: usize,
    block: &BlockTag,
    key: NavKey,
) -> Option<Tactical> {
    let siblings = || locator.find_all(RegionKind::AddSize, &Scope::lot(lot));
    match key {
        NavKey::Down => step_within(&siblings(), current, true)
            .or_else(|| principal_trigger(locator, lot))
            .or_else(|| locator.find_one(RegionKind::Header, &Scope::lot(lot))),
        NavKey::Up => step_within(&siblings(), current, false)
            .or_else(|| locator.find_last(RegionKind::Trash, &Scope::lot(lot).with_block(block))),
        NavKey::Right => locator.find_one(RegionKind::AddSize, &Scope::lot(lot + 1).with_block(block)),
        NavKey::Left => lot
            .checked_sub(1)
            .and_then(|prev| locator.find_one(RegionKind::AddSize, &Scope::lot(prev).with_block(block))),
        _ => None,
    }
}

fn type_trigger<L: ElementLocator + ?Sized>(
    locator: &L,
    lot: usize,
    expanded: bool,
    key: NavKey,
) -> Option<Tactical> {
    match key {
        NavKey::Down if expanded => locator.find_one(RegionKind::TypeOption, &Scope::lot(lot)),
        NavKey::Down => locator.find_one(RegionKind::Header, &Scope::lot(lot)),
        NavKey::Up => locator.find_last(RegionKind::AddSize, &Scope::lot(lot)),
        // An open menu pins the trigger to its lot.
        NavKey::Right if !expanded => principal_trigger(locator, lot + 1),
        NavKey::Left if !expanded => lot.checked_sub(1).and_then(|prev| principal_trigger(locator, prev)),
        _ => None,
    }
}

fn type_option<L: ElementLocator + ?Sized>(
    locator: &L,
    current: &Tactical,
    lot: usize,
    key: NavKey,
) -> Option<Tactical> {
    let options = || locator.find_all(RegionKind::TypeOption, &Scope::lot(lot));
    match key {
        NavKey::Down => cycle_within(&options(), current, true),
        NavKey::Up => cycle_within(&options(), current, false),
        _ => None,
    }
}

fn jump_bar<L: ElementLocator + ?Sized>(
    locator: &L,
    current: &Tactical,
    index: usize,
    key: NavKey,
) -> Option<Tactical> {
    let button_at = |wanted: usize| {
        locator
            .find_all(RegionKind::JumpBar, &Scope::any())
            .into_iter()
            .find(|t| matches!(t, Tactical::JumpBar { index, .. } if *index == wanted))
    };
    match key {
        NavKey::Down => current
            .lot()
            .and_then(|lot| locator.find_one(RegionKind::Header, &Scope::lot(lot))),
        NavKey::Up => locator.find_one(RegionKind::Toolbar, &Scope::any()),
        NavKey::Right => button_at(index + 1),
        NavKey::Left => index.checked_sub(1).and_then(button_at),
        _ => None,
    }
}

fn toolbar<L: ElementLocator + ?Sized>(locator: &L, current: &Tactical, key: NavKey) -> Option<Tactical> {
    let buttons = || locator.find_all(RegionKind::Toolbar, &Scope::any());
    match key {
        NavKey::Down => locator
            .find_one(RegionKind::JumpBar, &Scope::any())
            .or_else(|| locator.find_one(RegionKind::Header, &Scope::any())),
        NavKey::Right => step_within(&buttons(), current, true),
        NavKey::Left => step_within(&buttons(), current, false),
        _ => None,
    }
}

pub(crate) fn principal_trigger<L: ElementLocator + ?Sized>(locator: &L, lot: usize) -> Option<Tactical> {
    locator.find_one(RegionKind::TypeTrigger, &Scope::lot(lot).principal())
}
