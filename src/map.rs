use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

#[rustfmt::skip]
const REFERENCE_LAYOUT: [u8; 64] = [
    1, 1, 1, 1, 1, 1, 1, 1,
    1, 0, 1, 0, 0, 0, 0, 1,
    1, 0, 1, 0, 0, 0, 0, 1,
    1, 0, 1, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 1, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 1,
    1, 1, 1, 1, 1, 1, 1, 1,
];

/// Static tile grid, row-major: cell `(col, row)` lives at `row * width + col`.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: usize,
    height: usize,
    cell_size: f32, // world units per cell side
    cells: Vec<Cell>,
}

impl GridMap {
    pub fn new(width: usize, height: usize, cell_size: f32, cells: Vec<Cell>) -> Result<Self> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(Error::MapSize {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        if !(cell_size > 0.0) {
            return Err(Error::Config(format!(
                "cell_size must be positive, got {cell_size}"
            )));
        }

        Ok(Self {
            width,
            height,
            cell_size,
            cells,
        })
    }

    /// The 8x8 demo level: solid border with a few interior walls.
    pub fn reference(cell_size: f32) -> Result<Self> {
        let cells = REFERENCE_LAYOUT
            .iter()
            .map(|&v| if v == 1 { Cell::Wall } else { Cell::Empty })
            .collect();
        Self::new(8, 8, cell_size, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// Cell indices containing a world-space point, or `None` off the grid.
    pub fn world_to_cell(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let col = (x / self.cell_size).floor();
        let row = (y / self.cell_size).floor();
        // NaN fails both comparisons and lands here too
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some((col, row))
    }

    /// Anything off the grid is open space, never a wall.
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        self.world_to_cell(x, y)
            .and_then(|(col, row)| self.cell(col, row))
            .is_some_and(|cell| cell == Cell::Wall)
    }

    /// Row-major scan of `(col, row, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (i % self.width, i / self.width, cell))
    }
}
