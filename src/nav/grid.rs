// Grid vector moves: (lot, row, cell) arithmetic for the data-entry grid

use crate::input::focus::{GridCoordinate, GridLimits};
use crate::input::key::NavKey;

const LAST_CELL: isize = GridCoordinate::CELLS_PER_ROW as isize - 1;

/// Next grid coordinate for `key`, or `None` when the key does not move
/// within the grid or the move leaves `[0, total_lots)` / goes above row 0.
///
/// Rows have no upper bound here: a row past the last populated one is
/// requested anyway and fails to resolve against the rendered surface.
pub fn next_cell(
    current: GridCoordinate,
    key: NavKey,
    shift: bool,
    limits: GridLimits,
) -> Option<GridCoordinate> {
    let mut lot = current.lot as isize;
    let mut row = current.row as isize;
    let mut cell = current.cell as isize;

    match key {
        NavKey::Down => row += 1,
        NavKey::Enter if !shift => row += 1,
        NavKey::Enter => row -= 1,
        NavKey::Up => row -= 1,
        NavKey::Right => {
            cell += 1;
            if cell > LAST_CELL {
                cell = 0;
                lot += 1;
            }
        }
        NavKey::Left => {
            cell -= 1;
            if cell < 0 {
                cell = LAST_CELL;
                lot -= 1;
            }
        }
        // Tab belongs to the tactical routers; grid cells are not in the cycle.
        NavKey::Tab | NavKey::Escape | NavKey::Char(_) | NavKey::Other => return None,
    }

    if lot < 0 || lot >= limits.total_lots as isize || row < 0 {
        return None;
    }

    Some(GridCoordinate::new(lot as usize, row as usize, cell as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn limits(total_lots: usize) -> GridLimits {
        GridLimits {
            total_lots,
            rows_in_lot: 5,
        }
    }

    fn at(lot: usize, row: usize, cell: usize) -> GridCoordinate {
        GridCoordinate::new(lot, row, cell)
    }

    #[rstest]
    #[case(NavKey::Down, false, at(1, 3, 1))]
    #[case(NavKey::Enter, false, at(1, 3, 1))]
    #[case(NavKey::Enter, true, at(1, 1, 1))]
    #[case(NavKey::Up, false, at(1, 1, 1))]
    #[case(NavKey::Up, true, at(1, 1, 1))]
    #[case(NavKey::Right, false, at(1, 2, 2))]
    #[case(NavKey::Left, false, at(1, 2, 0))]
    fn test_basic_moves(#[case] key: NavKey, #[case] shift: bool, #[case] expected: GridCoordinate) {
        assert_eq!(next_cell(at(1, 2, 1), key, shift, limits(3)), Some(expected));
    }

    #[rstest]
    #[case(NavKey::Tab, false)]
    #[case(NavKey::Tab, true)]
    #[case(NavKey::Escape, false)]
    #[case(NavKey::Char('7'), false)]
    #[case(NavKey::Other, false)]
    fn test_non_grid_keys(#[case] key: NavKey, #[case] shift: bool) {
        assert_eq!(next_cell(at(1, 1, 1), key, shift, limits(3)), None);
    }

    #[test]
    fn test_right_carries_into_next_lot() {
        assert_eq!(
            next_cell(at(1, 2, 2), NavKey::Right, false, limits(3)),
            Some(at(2, 2, 0))
        );
    }

    #[test]
    fn test_left_borrows_from_previous_lot() {
        assert_eq!(
            next_cell(at(2, 2, 0), NavKey::Left, false, limits(3)),
            Some(at(1, 2, 2))
        );
    }

    #[test]
    fn test_lot_boundaries_reject() {
        assert_eq!(next_cell(at(2, 0, 2), NavKey::Right, false, limits(3)), None);
        assert_eq!(next_cell(at(0, 0, 0), NavKey::Left, false, limits(3)), None);
        assert_eq!(next_cell(at(0, 0, 0), NavKey::Down, false, limits(0)), None);
    }

    #[test]
    fn test_row_floor() {
        assert_eq!(next_cell(at(0, 0, 1), NavKey::Up, false, limits(1)), None);
        assert_eq!(next_cell(at(0, 0, 1), NavKey::Enter, true, limits(1)), None);
    }

    #[test]
    fn test_no_row_ceiling() {
        assert_eq!(
            next_cell(at(0, 40, 0), NavKey::Down, false, limits(1)),
            Some(at(0, 41, 0))
        );
    }

    #[test]
    fn test_right_left_are_inverse() {
        let lim = limits(3);
        for lot in 0..3 {
            for row in 0..3 {
                for cell in 0..3 {
                    let start = at(lot, row, cell);
                    if let Some(right) = next_cell(start, NavKey::Right, false, lim) {
                        assert_eq!(next_cell(right, NavKey::Left, false, lim), Some(start));
                    }
                    if let Some(left) = next_cell(start, NavKey::Left, false, lim) {
                        assert_eq!(next_cell(left, NavKey::Right, false, lim), Some(start));
                    }
                }
            }
        }
    }
}
