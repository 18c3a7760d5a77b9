//! Dense tile storage for a cave and the coordinate queries built on it.

use serde::Serialize;

use crate::error::GenerationError;
use crate::types::{Cell, CellKind, Pos};

/// Largest grid, in cells, that [`Grid::new`] will allocate.
pub const MAX_GRID_CELLS: u64 = 1 << 24;

/// Checks that both sides are positive and the area fits under [`MAX_GRID_CELLS`].
pub fn check_dimensions(width: i64, height: i64) -> Result<(usize, usize), GenerationError> {
    let area = if width > 0 && height > 0 { width.checked_mul(height) } else { None };
    match area {
        Some(area) if area as u64 <= MAX_GRID_CELLS => Ok((width as usize, height as usize)),
        _ => Err(GenerationError::InvalidDimensions { width, height }),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Creates a grid with every cell [`CellKind::Invalid`].
    pub fn new(width: i64, height: i64) -> Result<Self, GenerationError> {
        let (width, height) = check_dimensions(width, height)?;
        Ok(Self { width, height, cells: vec![CellKind::Invalid; width * height] })
    }

    /// Parses rows of `#` (wall), `.` (floor) and `?` (invalid).
    ///
    /// Short rows are padded with walls; any other character is a wall too.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, GenerationError> {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width as i64, rows.len() as i64)?;
        for (y, row) in rows.iter().enumerate() {
            let mut chars = row.chars();
            for x in 0..width {
                let kind = match chars.next() {
                    Some('.') => CellKind::Floor,
                    Some('?') => CellKind::Invalid,
                    _ => CellKind::Wall,
                };
                grid.cells[y * width + x] = kind;
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_valid_coordinate(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        self.is_valid_coordinate(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.width - 1
                || pos.y as usize == self.height - 1)
    }

    /// Cell kind at `pos`; anything outside the grid reads as a wall.
    pub fn kind_at(&self, pos: Pos) -> CellKind {
        if !self.is_valid_coordinate(pos) {
            return CellKind::Wall;
        }
        self.cells[self.index(pos)]
    }

    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.is_valid_coordinate(pos).then(|| Cell { pos, kind: self.cells[self.index(pos)] })
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.kind_at(pos) == CellKind::Floor
    }

    pub fn set(&mut self, pos: Pos, kind: CellKind) {
        if !self.is_valid_coordinate(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = kind;
    }

    pub fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    pub fn pos_of(&self, index: usize) -> Pos {
        Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 }
    }

    /// Every coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(|index| self.pos_of(index))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().map(|(index, &kind)| Cell { pos: self.pos_of(index), kind })
    }

    pub fn floor_positions(&self) -> Vec<Pos> {
        self.cells().filter(|cell| cell.kind.is_floor()).map(|cell| cell.pos).collect()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    pub(crate) fn raw(&self) -> &[CellKind] {
        &self.cells
    }

    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            out.extend(row.iter().map(|kind| kind.glyph()));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GenerationError::InvalidDimensions { width: 0, height: 5 })
        );
        assert!(matches!(Grid::new(4, -1), Err(GenerationError::InvalidDimensions { .. })));
    }

    #[test]
    fn rejects_oversized_areas_without_allocating() {
        assert_eq!(
            Grid::new(2_000_000_000, 2_000_000_000),
            Err(GenerationError::InvalidDimensions { width: 2_000_000_000, height: 2_000_000_000 })
        );
        assert!(Grid::new(i64::MAX, 2).is_err());
        assert!(Grid::new(4097, 4096).is_err());
        assert_eq!(check_dimensions(4096, 4096), Ok((4096, 4096)));
        assert_eq!(check_dimensions(1, MAX_GRID_CELLS as i64), Ok((1, 1 << 24)));
    }

    #[test]
    fn new_grid_starts_invalid() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.count(CellKind::Invalid), 6);
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let grid = Grid::from_ascii(&["...", "...", "..."]).unwrap();
        assert_eq!(grid.kind_at(Pos::new(-1, 0)), CellKind::Wall);
        assert_eq!(grid.kind_at(Pos::new(3, 1)), CellKind::Wall);
        assert_eq!(grid.kind_at(Pos::new(2, 2)), CellKind::Floor);
        assert!(grid.cell(Pos::new(0, 3)).is_none());
    }

    #[test]
    fn ascii_round_trips_through_display() {
        let rows = ["#####", "#..?#", "#####"];
        let grid = Grid::from_ascii(&rows).unwrap();
        assert_eq!(grid.to_ascii(), "#####\n#..?#\n#####\n");
        assert_eq!(grid.floor_positions(), vec![Pos::new(1, 1), Pos::new(2, 1)]);
    }

    #[test]
    fn border_detection_covers_all_edges() {
        let grid = Grid::new(4, 3).unwrap();
        let border: Vec<Pos> = grid.positions().filter(|&pos| grid.is_border(pos)).collect();
        assert_eq!(border.len(), 10);
        assert!(!grid.is_border(Pos::new(1, 1)));
        assert!(!grid.is_border(Pos::new(9, 9)));
    }
}
