use alloc::vec;

use crate::*;

/// Flood-opens the region around an empty cell.
///
/// The start cell and every hidden safe cell connected to it through empty cells get revealed, so the whole empty
/// region opens together with its numbered border. Numbered cells stop the expansion, flagged and already revealed
/// cells are left alone, mines are never touched.
///
/// The start cell is expected to be hidden and empty; callers reveal numbered cells one by one. Returns the number of
/// cells that changed from hidden to revealed.
pub fn open_multiple_cells(grid: &mut Grid, start: Coord2) -> CellCount {
    let mut opened: CellCount = 0;

    let start_cell = grid.cell_mut(start);
    if start_cell.is_hidden() && !start_cell.is_mine() {
        start_cell.state = CellState::Revealed;
        opened += 1;
    }

    let mut boundary = vec![start];
    while let Some(coords) = boundary.pop() {
        for neighbor in grid.iter_neighbors(coords) {
            let cell = grid.cell_mut(neighbor);
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }

            cell.state = CellState::Revealed;
            opened += 1;
            if cell.value.is_empty() {
                boundary.push(neighbor);
            }
        }
    }

    log::trace!("flood fill from {:?} opened {} cells", start, opened);
    opened
}
